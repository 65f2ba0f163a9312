//! Round scheduler - fires one resolution per round boundary
//!
//! A tokio task that sleeps until the current round's deadline, resolves the
//! round, and goes back to sleep. The next deadline is set when resolution
//! returns, so resolutions never overlap and any time spent resolving pushes
//! later deadlines back (no catch-up).
//!
//! The task ends when its [`SchedulerHandle`] asks it to shut down, or when a
//! resolution fails. A failed resolution is a logic error in the game and is
//! handed back to whoever awaits the handle.

use crate::game::error::GameResult;
use crate::game::session::GameSession;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Drives round resolution for one [`GameSession`]
pub struct RoundScheduler {
    session: Arc<GameSession>,
}

/// Handle to a running scheduler task
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<GameResult<()>>,
}

impl SchedulerHandle {
    /// Ask the task to stop after the current sleep or resolution
    pub fn shutdown(&self) {
        // Receiver is gone only if the task already ended
        let _ = self.shutdown.send(true);
    }

    /// Wait for the task to end.
    ///
    /// `Err` carries the resolution error that stopped the task. A panic in
    /// the task is resumed on the caller.
    pub async fn join(self) -> GameResult<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Ok(()),
        }
    }
}

impl RoundScheduler {
    pub fn new(session: Arc<GameSession>) -> Self {
        Self { session }
    }

    /// Spawn the scheduler for `session` on the current tokio runtime
    pub fn spawn(session: Arc<GameSession>) -> SchedulerHandle {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(Self::new(session).run(shutdown_rx));
        SchedulerHandle { shutdown, task }
    }

    /// Main loop
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> GameResult<()> {
        info!(
            "[SCHEDULER] Running with {}s rounds",
            self.session.config().turn_length_secs
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(self.session.resolution_due()) => {
                    if let Err(e) = self.session.resolve_round() {
                        error!("[SCHEDULER] Stopping: {}", e);
                        return Err(e);
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[SCHEDULER] Shutting down");
                        return Ok(());
                    }
                }
            }
        }
    }
}
