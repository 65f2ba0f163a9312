//! Chess rules module - the position oracle over `shakmaty`
//!
//! The voting core never generates moves or detects checkmate itself. It
//! asks the oracle whether a candidate is legal against a reference position
//! and asks it to apply the winning move.
//!
//! # Module Structure
//!
//! - `notation` - PGN movetext tokenizer and renderer
//! - `oracle` - [`Position`] snapshots, [`ValidatedMove`] and the
//!   [`PositionOracle`] that owns the live position

pub mod notation;
pub mod oracle;


// Re-export commonly used items
pub use oracle::{Position, PositionOracle, ValidatedMove};
