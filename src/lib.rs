//! Community chess - one shared game, moved by crowd vote
//!
//! Participants vote for the next move of a single game. At the end of every
//! round the pending votes are resolved into exactly one committed move (or
//! none, if nobody voted) and a new round opens against the new position.
//!
//! # Crate Layout
//!
//! - [`core`] - configuration and infrastructure errors
//! - [`game`] - rules oracle, vote ledger, turn resolver, round state,
//!   history and the [`game::GameSession`] that owns all of it
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use community_chess::core::GameConfig;
//! use community_chess::game::{GameSession, RoundScheduler};
//!
//! let session = Arc::new(GameSession::new(GameConfig::default()));
//! let scheduler = RoundScheduler::spawn(session.clone());
//!
//! session.cast_vote(&"player-1".into(), "1. e4")?;
//! ```

pub mod core;
pub mod game;
