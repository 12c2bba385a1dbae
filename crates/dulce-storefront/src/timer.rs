//! Timer tasks with cancellation handles.
//!
//! Every timer is a tokio task owned by a [`TaskHandle`]. Dropping the handle
//! or calling [`TaskHandle::cancel`] aborts the task. Nothing retries.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::StorefrontError;

/// Owner of a spawned task.
///
/// Awaiting the handle yields the task's output, or
/// [`StorefrontError::Cancelled`] if it was aborted first.
#[derive(Debug)]
#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle<T = ()> {
    inner: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Spawn `future` on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            inner: Some(tokio::spawn(future)),
        }
    }
}

impl<T> TaskHandle<T> {
    /// Abort the task. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.inner.take() {
            handle.abort();
        }
    }

    /// Whether the task has stopped (finished or cancelled).
    pub fn is_finished(&self) -> bool {
        self.inner.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl<T> Drop for TaskHandle<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, StorefrontError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(handle) = self.inner.as_mut() else {
            return Poll::Ready(Err(StorefrontError::Cancelled));
        };
        let result = futures::ready!(handle.poll_unpin(cx));
        self.inner = None;
        Poll::Ready(result.map_err(|e| {
            if e.is_cancelled() {
                StorefrontError::Cancelled
            } else {
                StorefrontError::TaskFailed(e.to_string())
            }
        }))
    }
}

/// Run `f` every `period`, first after one full period.
pub fn interval<F>(period: Duration, mut f: F) -> TaskHandle
where
    F: FnMut() + Send + 'static,
{
    TaskHandle::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            f();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + Clone + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn after(delay: Duration, mut f: impl FnMut() + Send + 'static) -> TaskHandle {
        TaskHandle::spawn(async move {
            time::sleep(delay).await;
            f();
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_timer_fires_once() {
        let (count, tick) = counter();
        let handle = after(Duration::from_secs(4), tick);

        time::sleep(Duration::from_millis(3999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        handle.await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_skips_immediate_tick() {
        let (count, tick) = counter();
        let _handle = interval(Duration::from_secs(10), tick);

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        time::sleep(Duration::from_secs(26)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_stop_timers() {
        let (count, tick) = counter();
        let mut cancelled = after(Duration::from_secs(1), tick.clone());
        cancelled.cancel();
        cancelled.cancel();
        assert!(cancelled.is_finished());

        drop(interval(Duration::from_secs(1), tick));

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(matches!(cancelled.await, Err(StorefrontError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_yields_output() {
        let handle = TaskHandle::spawn(async {
            time::sleep(Duration::from_millis(1500)).await;
            "listo"
        });
        assert_eq!(handle.await.unwrap(), "listo");
    }
}
