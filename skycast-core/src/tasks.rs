//! Task manager for debounced async work
//!
//! Every debounced call stores an explicit handle under its [`TaskKey`].
//! Calling [`TaskManager::debounce`] again with the same key before the
//! delay elapses supersedes the scheduled call, so only the last call of a
//! burst runs, `delay` after that last call.
//!
//! Supersession only reaches calls that are still waiting. Once the delay
//! has elapsed and the future has started, it runs to completion and its
//! action is delivered even if newer calls are scheduled under the same key.
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! tasks.debounce("weather", Duration::from_millis(500), async move {
//!     match source.fetch_forecast(&city).await {
//!         Ok(result) => Action::WeatherDidLoad(result),
//!         Err(e) => Action::WeatherDidError(e.to_string()),
//!     }
//! });
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::Action;

const WAITING: u8 = 0;
const STARTED: u8 = 1;
const SUPERSEDED: u8 = 2;

/// Identifies a debounced task slot.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Handle to one scheduled call.
///
/// `phase` moves from `WAITING` to exactly one of `STARTED` (the delay
/// elapsed first) or `SUPERSEDED` (a newer call won first).
struct Scheduled {
    handle: AbortHandle,
    phase: Arc<AtomicU8>,
}

impl Scheduled {
    /// Try to cancel while still waiting. Returns false if already started.
    fn supersede(&self) -> bool {
        let won = self
            .phase
            .compare_exchange(WAITING, SUPERSEDED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.handle.abort();
        }
        won
    }

    fn is_waiting(&self) -> bool {
        self.phase.load(Ordering::Acquire) == WAITING
    }

    fn is_running(&self) -> bool {
        self.phase.load(Ordering::Acquire) == STARTED && !self.handle.is_finished()
    }
}

/// Owns debounced task handles and the channel their actions go back on.
pub struct TaskManager<A> {
    scheduled: HashMap<TaskKey, Scheduled>,
    /// Started tasks whose slot was taken by a newer call.
    detached: Vec<AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            scheduled: HashMap::new(),
            detached: Vec::new(),
            action_tx,
        }
    }

    /// Schedule `future` to start `delay` from now under `key`.
    ///
    /// A call still waiting under the same key is superseded. A call that
    /// already started keeps running and still delivers its action.
    pub fn debounce<F>(&mut self, key: impl Into<TaskKey>, delay: Duration, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.release(&key);

        let deadline = Instant::now() + delay;
        let phase = Arc::new(AtomicU8::new(WAITING));
        let task_phase = Arc::clone(&phase);
        let tx = self.action_tx.clone();
        let name = key.name().to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if task_phase
                .compare_exchange(WAITING, STARTED, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return;
            }
            tracing::debug!(task = %name, "debounced task started");
            let action = future.await;
            let _ = tx.send(action);
        });

        self.scheduled.insert(
            key,
            Scheduled {
                handle: handle.abort_handle(),
                phase,
            },
        );
        self
    }

    /// Cancel the call waiting under `key`.
    ///
    /// Returns true if a waiting call was cancelled. A call that already
    /// started is left running.
    pub fn cancel(&mut self, key: &TaskKey) -> bool {
        self.release(key)
    }

    /// Abort everything, including started tasks. Used on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, scheduled) in self.scheduled.drain() {
            scheduled.handle.abort();
        }
        for handle in self.detached.drain(..) {
            handle.abort();
        }
    }

    /// Whether a call under `key` is still waiting for its delay.
    pub fn is_pending(&self, key: &TaskKey) -> bool {
        self.scheduled
            .get(key)
            .map(Scheduled::is_waiting)
            .unwrap_or(false)
    }

    /// Number of calls still waiting for their delay.
    pub fn pending_len(&self) -> usize {
        self.scheduled.values().filter(|s| s.is_waiting()).count()
    }

    /// Number of started tasks that have not finished yet.
    pub fn in_flight(&self) -> usize {
        let slotted = self.scheduled.values().filter(|s| s.is_running()).count();
        let detached = self.detached.iter().filter(|h| !h.is_finished()).count();
        slotted + detached
    }

    fn release(&mut self, key: &TaskKey) -> bool {
        self.detached.retain(|h| !h.is_finished());

        let Some(previous) = self.scheduled.remove(key) else {
            return false;
        };
        if previous.supersede() {
            tracing::debug!(task = %key.name(), "superseded waiting task");
            true
        } else {
            if !previous.handle.is_finished() {
                self.detached.push(previous.handle);
            }
            false
        }
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, scheduled) in self.scheduled.drain() {
            scheduled.handle.abort();
        }
        for handle in self.detached.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Done(usize),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Done"
        }
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<TestAction>) -> TestAction {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed")
    }

    #[test]
    fn test_task_key() {
        let k1 = TaskKey::new("weather");
        let k2: TaskKey = "weather".into();
        let k3 = TaskKey::from(String::from("weather"));

        assert_eq!(k1, k2);
        assert_eq!(k2, k3);
        assert_eq!(k1.name(), "weather");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_waits_for_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);
        let started = Instant::now();

        tasks.debounce("k", Duration::from_millis(500), async { TestAction::Done(1) });
        assert!(tasks.is_pending(&TaskKey::new("k")));

        assert_eq!(recv(&mut rx).await, TestAction::Done(1));
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(!tasks.is_pending(&TaskKey::new("k")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_burst_runs_only_last() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);
        let runs = Arc::new(AtomicUsize::new(0));

        for i in 1..=3 {
            let runs = Arc::clone(&runs);
            tasks.debounce("k", Duration::from_millis(50), async move {
                runs.fetch_add(1, Ordering::SeqCst);
                TestAction::Done(i)
            });
            tokio::time::sleep(Duration::from_millis(30)).await;
        }

        assert_eq!(recv(&mut rx).await, TestAction::Done(3));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_started_task_is_not_superseded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("k", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(1)
        });

        // First call has started and is now in flight.
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!tasks.is_pending(&TaskKey::new("k")));
        assert_eq!(tasks.in_flight(), 1);

        tasks.debounce("k", Duration::from_millis(50), async { TestAction::Done(2) });

        assert_eq!(recv(&mut rx).await, TestAction::Done(2));
        assert_eq!(recv(&mut rx).await, TestAction::Done(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("k", Duration::from_millis(50), async { TestAction::Done(1) });
        assert!(tasks.cancel(&TaskKey::new("k")));
        assert_eq!(tasks.pending_len(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_does_not_abort_started_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("k", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(7)
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!tasks.cancel(&TaskKey::new("k")));
        assert_eq!(recv(&mut rx).await, TestAction::Done(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_aborts_everything() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("a", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(1)
        });
        tasks.debounce("b", Duration::from_secs(1), async { TestAction::Done(2) });
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(tasks.in_flight(), 1);
        assert_eq!(tasks.pending_len(), 1);

        tasks.cancel_all();
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(tasks.in_flight(), 0);
    }
}
