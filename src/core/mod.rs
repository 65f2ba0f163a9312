//! Core module - configuration and infrastructure errors
//!
//! Everything here is independent of the chess game itself: the
//! [`GameConfig`] that decides round length, selection policy and reset
//! scope, and the [`CoreError`] type for loading it.

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{GameConfig, ResetScope, SelectionPolicy};
pub use error::{CoreError, CoreResult};
