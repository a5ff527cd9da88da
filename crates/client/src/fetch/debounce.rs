//! Debounced, cancellable search fetches.
//!
//! Autocomplete inputs fire on every keystroke. A [`SearchTask`] coalesces
//! rapid submissions into one request (400 ms of quiet by default) and
//! guarantees latest-request-wins: a superseded request is aborted, and
//! even a request that slips past the abort cannot publish over a newer
//! one thanks to a generation check.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A handle coalescing search fetches for one input's lifecycle.
///
/// Each [`submit`](Self::submit) supersedes the previous one; [`cancel`](Self::cancel)
/// discards whatever is pending without replacement. Results are published
/// to [`subscribe`](Self::subscribe)rs; `None` means "no result yet or
/// cancelled".
#[derive(Debug)]
pub struct SearchTask<T> {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    results: watch::Sender<Option<T>>,
}

impl<T> SearchTask<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Quiet period used by the search inputs.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(400);

    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            results: watch::Sender::new(None),
        }
    }

    /// Task with the default 400 ms quiet period.
    #[must_use]
    pub fn with_default_delay() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }

    /// Observe published results.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.results.subscribe()
    }

    /// Submit a fetch for the current input, superseding any pending one.
    ///
    /// The fetch runs after the quiet period; if another submission arrives
    /// first, this one is aborted and its result is never published.
    pub fn submit<Fut>(&self, fetch: Fut)
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation_check = Arc::clone(&self.generation);
        let results = self.results.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let value = fetch.await;
            // A newer submission may have started while the fetch was in
            // flight; its result owns the output now.
            if generation_check.load(Ordering::SeqCst) == generation {
                results.send_replace(Some(value));
            }
        });

        self.replace_pending(Some(handle));
    }

    /// Discard the pending fetch, if any, and clear the published result.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.replace_pending(None);
        self.results.send_replace(None);
    }

    fn replace_pending(&self, next: Option<JoinHandle<()>>) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.take() {
                previous.abort();
            }
            *pending = next;
        }
    }
}

impl<T> Drop for SearchTask<T> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(handle) = pending.take()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_submissions_coalesce_to_latest() {
        let task: SearchTask<String> = SearchTask::with_default_delay();
        let mut results = task.subscribe();
        let fetches = Arc::new(AtomicU32::new(0));

        let fetches_a = Arc::clone(&fetches);
        task.submit(async move {
            fetches_a.fetch_add(1, Ordering::SeqCst);
            "acme".to_string()
        });

        // Second keystroke arrives within the quiet period.
        let fetches_b = Arc::clone(&fetches);
        task.submit(async move {
            fetches_b.fetch_add(1, Ordering::SeqCst);
            "acme-health".to_string()
        });

        results.changed().await.unwrap();
        assert_eq!(results.borrow().as_deref(), Some("acme-health"));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_loses_to_newer_submission() {
        let task: SearchTask<&'static str> = SearchTask::new(Duration::from_millis(1));
        let mut results = task.subscribe();

        // First fetch takes long enough that the second submission lands
        // while it is in flight.
        task.submit(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "stale"
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        task.submit(async { "fresh" });

        results.changed().await.unwrap();
        assert_eq!(*results.borrow(), Some("fresh"));

        // Give the stale fetch every chance to publish; it must not.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(*results.borrow(), Some("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending() {
        let task: SearchTask<u32> = SearchTask::with_default_delay();
        let results = task.subscribe();

        task.submit(async { 1 });
        task.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(*results.borrow(), None);
    }
}
