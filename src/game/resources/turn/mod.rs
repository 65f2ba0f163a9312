//! Round lifecycle: phase state machine, deadline and the round record

pub mod round;
pub mod state;
pub mod timer;

pub use round::Round;
pub use state::{RoundPhase, RoundStateContext};
pub use timer::RoundTimer;
