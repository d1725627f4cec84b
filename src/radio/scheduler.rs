//! Poll scheduler
//!
//! Owns the single repeating poll task. Changing the cadence aborts the live
//! task (dropping any request it has in flight) before a new one is spawned,
//! so two repeating timers never run at the same time.

use super::api::NowPlayingPayload;
use super::client::NowPlayingSource;
use super::error::RadioError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Outcome of one poll, tagged with a monotonically increasing request number
/// so late responses can be recognised and dropped.
#[derive(Debug)]
pub struct PollResult {
    pub seq: u64,
    pub result: Result<NowPlayingPayload, RadioError>,
}

pub struct PollScheduler<S, E> {
    source: Arc<S>,
    tx: mpsc::Sender<E>,
    seq: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
    interval: Option<Duration>,
}

impl<S, E> PollScheduler<S, E>
where
    S: NowPlayingSource,
    E: From<PollResult> + Send + 'static,
{
    pub fn new(source: Arc<S>, tx: mpsc::Sender<E>) -> Self {
        Self {
            source,
            tx,
            seq: Arc::new(AtomicU64::new(0)),
            task: None,
            interval: None,
        }
    }

    /// Poll right away, then every `interval`.
    pub fn start(&mut self, interval: Duration) {
        self.spawn_loop(interval, Instant::now());
    }

    /// Switch cadence. The first poll of the new cadence happens one full
    /// interval from now. No-op when already polling at this interval.
    pub fn reschedule(&mut self, interval: Duration) {
        if self.is_running() && self.interval == Some(interval) {
            return;
        }
        self.spawn_loop(interval, Instant::now() + interval);
    }

    /// Fire one poll outside the regular cadence.
    pub fn refresh_now(&self) {
        let source = self.source.clone();
        let seq = self.seq.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            poll_once(source.as_ref(), &seq, &tx).await;
        });
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Poll loop stopped");
        }
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Number of requests issued so far
    pub fn issued(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    fn spawn_loop(&mut self, interval: Duration, first_tick: Instant) {
        self.stop();

        let source = self.source.clone();
        let seq = self.seq.clone();
        let tx = self.tx.clone();

        debug!(interval_secs = interval.as_secs_f32(), "Poll loop started");
        self.task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !poll_once(source.as_ref(), &seq, &tx).await {
                    break; // receiver gone
                }
            }
        }));
        self.interval = Some(interval);
    }
}

impl<S, E> Drop for PollScheduler<S, E> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll_once<S, E>(source: &S, seq: &AtomicU64, tx: &mpsc::Sender<E>) -> bool
where
    S: NowPlayingSource,
    E: From<PollResult>,
{
    let id = seq.fetch_add(1, Ordering::SeqCst) + 1;
    let result = source.fetch().await;
    debug!(seq = id, ok = result.is_ok(), "Poll finished");
    tx.send(PollResult { seq: id, result }.into()).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl NowPlayingSource for CountingSource {
        fn fetch(
            &self,
        ) -> impl Future<Output = Result<NowPlayingPayload, RadioError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(NowPlayingPayload::default()) }
        }
    }

    fn scheduler() -> (
        PollScheduler<CountingSource, PollResult>,
        Arc<CountingSource>,
        mpsc::Receiver<PollResult>,
    ) {
        let source = Arc::new(CountingSource::default());
        let (tx, rx) = mpsc::channel(32);
        (PollScheduler::new(source.clone(), tx), source, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn start_polls_immediately_then_on_interval() {
        let (mut sched, source, mut rx) = scheduler();
        sched.start(Duration::from_secs(10));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.seq, 1);

        time::sleep(Duration::from_secs(10)).await;
        let second = rx.recv().await.unwrap();
        assert_eq!(second.seq, 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_the_live_loop() {
        let (mut sched, source, mut rx) = scheduler();
        sched.start(Duration::from_secs(10));
        rx.recv().await.unwrap();

        sched.reschedule(Duration::from_secs(30));
        assert_eq!(sched.interval(), Some(Duration::from_secs(30)));

        // The old 10s loop must not fire any more
        time::sleep(Duration::from_secs(25)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(6)).await;
        let next = rx.recv().await.unwrap();
        assert_eq!(next.seq, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_same_interval_keeps_timer() {
        let (mut sched, source, mut rx) = scheduler();
        sched.start(Duration::from_secs(10));
        rx.recv().await.unwrap();

        time::sleep(Duration::from_secs(6)).await;
        sched.reschedule(Duration::from_secs(10));

        // Original timer fires at t=10, not t=16
        time::sleep(Duration::from_secs(5)).await;
        rx.recv().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_polling() {
        let (mut sched, source, mut rx) = scheduler();
        sched.start(Duration::from_secs(10));
        rx.recv().await.unwrap();

        sched.stop();
        assert!(!sched.is_running());

        time::sleep(Duration::from_secs(60)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_now_uses_next_sequence_number() {
        let (mut sched, _source, mut rx) = scheduler();
        sched.start(Duration::from_secs(30));
        assert_eq!(rx.recv().await.unwrap().seq, 1);

        sched.refresh_now();
        assert_eq!(rx.recv().await.unwrap().seq, 2);
        assert_eq!(sched.issued(), 2);
    }
}
