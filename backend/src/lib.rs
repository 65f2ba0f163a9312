//! HTTP surface of the community chess game

pub mod api;
