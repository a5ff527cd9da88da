//! Interval polling for resources with transitional server-side state.
//!
//! A queued AI prediction flips from `in_progress` to a terminal status at
//! some unknown point; grids poll the series list on a fixed interval while
//! any visible row is transitional, and stop the moment none is.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// What the poll tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// At least one tracked row is still transitional; keep the interval
    /// armed.
    Continue,
    /// Nothing is transitional anymore; disarm immediately.
    Stop,
}

/// A cancellable interval poll.
///
/// The tick closure runs once per interval. It is expected to check its
/// rows first and return [`PollOutcome::Stop`] without fetching when none
/// is transitional; otherwise it re-issues the read (regardless of the
/// previous tick's success or failure) and returns
/// [`PollOutcome::Continue`].
///
/// Dropping the poller cancels it deterministically, so a poller owned by a
/// screen's state dies with the screen.
#[derive(Debug)]
pub struct StatusPoller {
    handle: JoinHandle<()>,
}

impl StatusPoller {
    /// Interval used by the series grids.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Start polling. The first tick fires one full interval from now.
    pub fn spawn<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = PollOutcome> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() fires immediately; swallow that so the first poll
            // waits a full period like a plain setInterval would
            timer.tick().await;

            loop {
                timer.tick().await;
                if tick().await == PollOutcome::Stop {
                    debug!("no transitional rows left, stopping poll");
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Start polling at [`Self::DEFAULT_INTERVAL`].
    pub fn spawn_default<F, Fut>(tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = PollOutcome> + Send,
    {
        Self::spawn(Self::DEFAULT_INTERVAL, tick)
    }

    /// Whether the poll has stopped, either by decision or cancellation.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the poll now.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
