//! Types exchanged between the backend and the web client

pub mod protocol;
