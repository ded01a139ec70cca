//! Event loop bridge.
//!
//! The Telegram client must live on exactly one thread. This bridge owns
//! that thread: a dedicated OS thread running a current-thread tokio runtime,
//! holding a context value that is built on the thread and never leaves it.
//! Request handlers submit work as closures over the context through an
//! unbounded channel (no backpressure, bounded only by memory).
//!
//! Two submission modes:
//! - [`EventLoopBridge::submit_forget`]: enqueue and return immediately.
//! - [`EventLoopBridge::submit_wait`]: enqueue and await the result up to a
//!   deadline. On timeout the job is orphaned: it keeps running to
//!   completion on the loop thread and its result is discarded.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Errors surfaced to bridge callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The loop thread has stopped (shutdown or crash); nothing was enqueued.
    #[error("Event loop is not available")]
    LoopUnavailable,

    /// The deadline passed before the job finished. The job itself keeps
    /// running on the loop thread.
    #[error("Timed out waiting for the event loop")]
    Timeout,
}

type Job<C> = Box<dyn FnOnce(Arc<C>) -> BoxFuture<'static, ()> + Send>;

enum LoopMessage<C> {
    Run(Job<C>),
    Shutdown,
}

/// Handle to the single event-loop thread.
///
/// Cheap to clone; all clones feed the same queue.
pub struct EventLoopBridge<C> {
    tx: mpsc::UnboundedSender<LoopMessage<C>>,
}

impl<C> Clone for EventLoopBridge<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C: Send + Sync + 'static> EventLoopBridge<C> {
    /// Spawns the loop thread and builds the context on it.
    ///
    /// Blocks until the context is ready, so a returned bridge is
    /// immediately usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned or its runtime
    /// fails to start.
    pub fn start<F>(thread_name: &str, build: F) -> io::Result<Self>
    where
        F: FnOnce() -> C + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<LoopMessage<C>>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<(), String>>();

        std::thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                runtime.block_on(async move {
                    let ctx = Arc::new(build());
                    let _ = ready_tx.send(Ok(()));

                    while let Some(message) = rx.recv().await {
                        match message {
                            LoopMessage::Run(job) => {
                                // Spawned, not awaited: a slow fulfillment
                                // must not starve status queries
                                tokio::task::spawn(job(ctx.clone()));
                            }
                            LoopMessage::Shutdown => break,
                        }
                    }
                });
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(e)) => Err(io::Error::new(io::ErrorKind::Other, e)),
            Err(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                "event loop thread exited before becoming ready",
            )),
        }
    }

    /// Enqueues work without waiting for it.
    ///
    /// Accepted work is never cancelled.
    pub fn submit_forget<F, Fut>(&self, work: F) -> Result<(), BridgeError>
    where
        F: FnOnce(Arc<C>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job: Job<C> = Box::new(move |ctx| Box::pin(work(ctx)));
        self.tx
            .send(LoopMessage::Run(job))
            .map_err(|_| BridgeError::LoopUnavailable)
    }

    /// Enqueues work and awaits its result, up to `timeout`.
    ///
    /// On timeout the job is orphaned: its side effects still happen, the
    /// result send lands in a dropped receiver and is discarded.
    pub async fn submit_wait<F, Fut, T>(&self, timeout: Duration, work: F) -> Result<T, BridgeError>
    where
        F: FnOnce(Arc<C>) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let job: Job<C> = Box::new(move |ctx| {
            Box::pin(async move {
                let result = work(ctx).await;
                // Caller may have timed out; the work is done either way
                let _ = done_tx.send(result);
            })
        });

        self.tx
            .send(LoopMessage::Run(job))
            .map_err(|_| BridgeError::LoopUnavailable)?;

        match tokio::time::timeout(timeout, done_rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(BridgeError::LoopUnavailable),
            Err(_) => Err(BridgeError::Timeout),
        }
    }

    /// Stops the loop. Already-enqueued work still runs; later submissions
    /// fail with [`BridgeError::LoopUnavailable`].
    pub fn shutdown(&self) {
        let _ = self.tx.send(LoopMessage::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        hits: Arc<AtomicUsize>,
    }

    fn start_counter_bridge() -> (EventLoopBridge<Counter>, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let bridge =
            EventLoopBridge::start("test-loop", move || Counter { hits: hits_clone }).unwrap();
        (bridge, hits)
    }

    async fn wait_for_hits(hits: &AtomicUsize, expected: usize) {
        for _ in 0..200 {
            if hits.load(Ordering::SeqCst) >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "expected {expected} hits, saw {}",
            hits.load(Ordering::SeqCst)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Submission Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn submit_wait_returns_job_result() {
        let (bridge, _hits) = start_counter_bridge();

        let result = bridge
            .submit_wait(Duration::from_secs(1), |ctx: Arc<Counter>| async move {
                ctx.hits.fetch_add(1, Ordering::SeqCst);
                41 + 1
            })
            .await;

        assert_eq!(result, Ok(42));
        bridge.shutdown();
    }

    #[tokio::test]
    async fn submit_forget_runs_the_job() {
        let (bridge, hits) = start_counter_bridge();

        bridge
            .submit_forget(|ctx: Arc<Counter>| async move {
                ctx.hits.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        wait_for_hits(&hits, 1).await;
        bridge.shutdown();
    }

    #[tokio::test]
    async fn orphaned_job_still_completes_after_timeout() {
        let (bridge, hits) = start_counter_bridge();

        let result = bridge
            .submit_wait(Duration::from_millis(20), |ctx: Arc<Counter>| async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                ctx.hits.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(result, Err(BridgeError::Timeout));
        // The job was not cancelled by the timeout
        wait_for_hits(&hits, 1).await;
        bridge.shutdown();
    }

    #[tokio::test]
    async fn slow_job_does_not_block_later_submissions() {
        let (bridge, hits) = start_counter_bridge();

        bridge
            .submit_forget(|_ctx: Arc<Counter>| async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
            })
            .unwrap();

        let result = bridge
            .submit_wait(Duration::from_secs(1), |ctx: Arc<Counter>| async move {
                ctx.hits.fetch_add(1, Ordering::SeqCst);
                "fast"
            })
            .await;

        assert_eq!(result, Ok("fast"));
        bridge.shutdown();
    }

    // ══════════════════════════════════════════════════════════════
    // Shutdown Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn submissions_after_shutdown_fail_loop_unavailable() {
        let (bridge, _hits) = start_counter_bridge();
        bridge.shutdown();

        // The loop drains its queue before exiting; give it a beat
        tokio::time::sleep(Duration::from_millis(50)).await;

        let forget = bridge.submit_forget(|_ctx: Arc<Counter>| async move {});
        assert_eq!(forget, Err(BridgeError::LoopUnavailable));

        let wait = bridge
            .submit_wait(Duration::from_secs(1), |_ctx: Arc<Counter>| async move { 1 })
            .await;
        assert_eq!(wait, Err(BridgeError::LoopUnavailable));
    }

    #[tokio::test]
    async fn clones_feed_the_same_loop() {
        let (bridge, hits) = start_counter_bridge();
        let clone = bridge.clone();

        clone
            .submit_forget(|ctx: Arc<Counter>| async move {
                ctx.hits.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        wait_for_hits(&hits, 1).await;
        bridge.shutdown();
    }
}
