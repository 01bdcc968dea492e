//! Context implementation for request-scoped data and cancellation
//!
//! This module provides the Context type which carries request-scoped values
//! like cancellation signals, deadlines, and metadata across async boundaries.
//! Contexts form a tree: a child derived with [`Context::with_timeout`] is
//! cancelled when its own deadline passes or when its parent is cancelled.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, RwLock};
use tokio::time;

type Values = Arc<RwLock<HashMap<String, Box<dyn Any + Send + Sync>>>>;

/// Context carries request-scoped values like cancellation signals, timeouts, and metadata
/// CRITICAL: Pass this as first parameter to ALL async trait methods
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    deadline: Option<Instant>,
    values: Values,
    done: watch::Receiver<bool>,
    done_tx: watch::Sender<bool>,
}

impl Context {
    pub fn new() -> Self {
        let (done_tx, done_rx) = watch::channel(false);

        Self {
            inner: Arc::new(ContextInner {
                deadline: None,
                values: Arc::new(RwLock::new(HashMap::new())),
                done: done_rx,
                done_tx,
            }),
        }
    }

    /// Derive a child context that is cancelled after `timeout`, or earlier if
    /// this context is cancelled or has a sooner deadline. A timeout too large
    /// to represent leaves the child with the parent's deadline, if any.
    /// Dropping the parent does not cancel the child.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let requested = Instant::now().checked_add(timeout);
        let deadline = match (self.inner.deadline, requested) {
            (Some(parent), Some(requested)) => Some(parent.min(requested)),
            (parent, requested) => parent.or(requested),
        };

        let already_cancelled = self.is_cancelled();
        let (done_tx, done_rx) = watch::channel(already_cancelled);

        tracing::trace!(?timeout, ?deadline, "deriving context with deadline");

        if !already_cancelled {
            let tx = done_tx.clone();
            let mut parent_done = self.done();
            tokio::spawn(async move {
                let expired = async {
                    match deadline {
                        Some(deadline) => time::sleep_until(deadline.into()).await,
                        None => std::future::pending().await,
                    }
                };
                tokio::select! {
                    _ = expired => {}
                    // A closed channel means the parent was dropped, not cancelled
                    Ok(_) = parent_done.wait_for(|done| *done) => {}
                    // Every receiver is gone, nobody is left to notify
                    _ = tx.closed() => return,
                }
                let _ = tx.send(true);
            });
        }

        Self {
            inner: Arc::new(ContextInner {
                deadline,
                values: Arc::clone(&self.inner.values),
                done: done_rx,
                done_tx,
            }),
        }
    }

    /// Values are shared between a context and the children derived from it
    pub async fn with_value<T: Send + Sync + 'static>(self, key: &str, value: T) -> Self {
        let mut values = self.inner.values.write().await;
        values.insert(key.to_string(), Box::new(value));
        drop(values);
        self
    }

    pub async fn get_value<T>(&self, key: &str) -> Option<T>
    where
        T: Send + Sync + Clone + 'static,
    {
        let values = self.inner.values.read().await;
        values.get(key).and_then(|v| v.downcast_ref::<T>()).cloned()
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.done.borrow()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Time left before the deadline, zero once it has passed
    pub fn remaining(&self) -> Option<Duration> {
        self.inner
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Returns a channel that flips to true when work done on behalf of this
    /// context should be cancelled
    pub fn done(&self) -> watch::Receiver<bool> {
        self.inner.done.clone()
    }

    /// Resolves once this context is cancelled
    pub async fn cancelled(&self) {
        let mut done = self.done();
        // The sender lives in `inner`, which outlives this borrow
        let _ = done.wait_for(|done| *done).await;
    }

    pub fn cancel(&self) {
        let _ = self.inner.done_tx.send(true);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
