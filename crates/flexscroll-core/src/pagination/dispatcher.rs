use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::types::Direction;

/// Caller-supplied load function
///
/// Runs off the interaction thread. It is expected to grow the content the
/// component later measures; the component never waits for it.
pub type LoadCallback = Arc<dyn Fn(Direction) + Send + Sync>;

/// In-flight marker for a load episode
///
/// Clones share state. Every episode gets an id so that a cooldown
/// scheduled for an older episode cannot end a newer one.
///
/// Episode id and loading bit share one word: `episode << 1 | loading`.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag {
    state: Arc<AtomicU64>,
}

const LOADING: u64 = 1;

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.state.load(Ordering::Acquire) & LOADING != 0
    }

    /// Start a new episode and return its id
    pub fn begin(&self) -> u64 {
        let next = |state: u64| (((state >> 1) + 1) << 1) | LOADING;
        let previous = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| Some(next(state)))
            .unwrap_or_else(|state| state);
        next(previous) >> 1
    }

    /// Id of the most recent episode (0 before the first one)
    pub fn episode(&self) -> u64 {
        self.state.load(Ordering::Acquire) >> 1
    }

    /// End `episode` if it is still the current one and loading; returns
    /// whether the flag was cleared
    pub fn finish(&self, episode: u64) -> bool {
        let current = (episode << 1) | LOADING;
        self.state
            .compare_exchange(current, episode << 1, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Background execution context for loads and cooldown timers
pub trait LoadDispatcher: Send + Sync {
    /// Run `load(direction)` without blocking the caller
    fn dispatch(&self, direction: Direction, load: LoadCallback);

    /// Clear `episode` on `flag` once `delay` has elapsed
    fn clear_after(&self, flag: LoadingFlag, episode: u64, delay: Duration);
}

/// Dispatcher backed by a tokio runtime
///
/// Loads run on the blocking pool since the callback is plain synchronous
/// code that may do disk or network work. Cooldowns are timer tasks.
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: Handle,
}

impl TokioDispatcher {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime of the calling context
    pub fn current() -> crate::Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl LoadDispatcher for TokioDispatcher {
    fn dispatch(&self, direction: Direction, load: LoadCallback) {
        debug!(%direction, "Dispatching load");
        // Detached: completion is observed through the next content measurement
        drop(self.handle.spawn_blocking(move || load(direction)));
    }

    fn clear_after(&self, flag: LoadingFlag, episode: u64, delay: Duration) {
        drop(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if flag.finish(episode) {
                info!(episode, "Load episode cooled down");
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_flag_episodes() {
        let flag = LoadingFlag::new();
        assert!(!flag.is_loading());
        assert_eq!(flag.episode(), 0);

        let first = flag.begin();
        assert!(flag.is_loading());
        assert!(flag.finish(first));
        assert!(!flag.is_loading());
        assert!(!flag.finish(first));
    }

    #[test]
    fn test_stale_clear_ignored() {
        let flag = LoadingFlag::new();
        let first = flag.begin();
        flag.finish(first);
        let second = flag.begin();

        assert!(!flag.finish(first));
        assert!(flag.is_loading());
        assert!(flag.finish(second));
    }

    #[test]
    fn test_finish_keeps_episode_id() {
        let flag = LoadingFlag::new();
        flag.begin();
        let second = flag.begin();
        assert_eq!(second, 2);
        assert!(flag.finish(second));
        assert_eq!(flag.episode(), 2);
        assert_eq!(flag.begin(), 3);
    }

    #[test]
    fn test_stale_clear_racing_new_episode() {
        for _ in 0..1000 {
            let flag = LoadingFlag::new();
            let first = flag.begin();
            let stale = flag.clone();
            let cooldown = std::thread::spawn(move || stale.finish(first));
            let second = flag.begin();
            cooldown.join().unwrap();
            assert!(flag.is_loading());
            assert_eq!(flag.episode(), second);
        }
    }

    #[test]
    fn test_current_without_runtime_fails() {
        assert!(matches!(
            TokioDispatcher::current(),
            Err(crate::Error::NoRuntime(_))
        ));
    }

    #[tokio::test]
    async fn test_dispatch_runs_callback_in_background() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let load: LoadCallback = Arc::new(move |direction| {
            tx.send(direction).unwrap();
        });

        let dispatcher = TokioDispatcher::current().unwrap();
        dispatcher.dispatch(Direction::End, load);

        assert_eq!(rx.recv().await, Some(Direction::End));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_after_delay() {
        let dispatcher = TokioDispatcher::current().unwrap();
        let flag = LoadingFlag::new();
        let episode = flag.begin();

        dispatcher.clear_after(flag.clone(), episode, Duration::from_millis(500));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(flag.is_loading());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(!flag.is_loading());
    }
}
