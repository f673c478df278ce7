//! Reactive session holder.
//!
//! The identity provider resolves sessions asynchronously. A [`SessionHandle`]
//! carries the latest snapshot and lets callers re-run a guard whenever the
//! provider publishes a change.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::{GuardOutcome, Session, SessionSource};

#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: Arc<watch::Sender<Session>>,
}

impl SessionHandle {
    pub fn new(initial: Session) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the session, waking every subscriber.
    pub fn publish(&self, session: Session) {
        self.tx.send_replace(session);
    }

    pub fn update(&self, modify: impl FnOnce(&mut Session)) {
        self.tx.send_modify(modify);
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Re-run `decide` after every published change until it stops
    /// returning [`GuardOutcome::Loading`] or `wait` elapses.
    ///
    /// `decide` is expected to read this handle, typically through a guard
    /// constructed over a clone of it. Returns the last outcome, which is
    /// `Loading` when the session never became decidable in time.
    pub async fn settle<F>(&self, wait: Duration, decide: F) -> GuardOutcome
    where
        F: Fn() -> GuardOutcome,
    {
        let mut rx = self.subscribe();
        // None: `wait` is too long to represent, so wait without a deadline.
        let deadline = tokio::time::Instant::now().checked_add(wait);

        loop {
            // Mark the current value seen before deciding so no change is missed.
            rx.borrow_and_update();
            let outcome = decide();
            if !outcome.is_loading() {
                return outcome;
            }

            let changed = match deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, rx.changed()).await,
                None => Ok(rx.changed().await),
            };
            match changed {
                Ok(Ok(())) => continue,
                Ok(Err(_)) | Err(_) => {
                    tracing::debug!(?wait, "session still loading");
                    return outcome;
                }
            }
        }
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new(Session::loading())
    }
}

impl SessionSource for SessionHandle {
    fn current(&self) -> Session {
        self.snapshot()
    }
}
