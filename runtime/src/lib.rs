//! # Marquee Runtime
//!
//! Runtime implementation for the Marquee storefront architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution,
//! effect handling, and state-change notification.
//!
//! ## Core Components
//!
//! - **Store**: the runtime that owns state and executes effects
//! - **Effect Executor**: executes effect descriptions and feeds produced
//!   actions back into the reducer
//! - **State Subscription**: a watch channel carrying an immutable snapshot
//!   of state after every mutation, consumed by redraw logic
//!
//! ## Example
//!
//! ```ignore
//! use marquee_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Observe state changes
//! let mut snapshots = store.subscribe();
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // React to the new snapshot
//! snapshots.changed().await?;
//! let current = snapshots.borrow().clone();
//! ```

use marquee_core::{effect::Effect, reducer::Reducer};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Timeout waiting for effects to complete
        ///
        /// Returned by [`EffectHandle::wait_with_timeout`] when the timeout
        /// expires with effects still running.
        ///
        /// [`EffectHandle::wait_with_timeout`]: crate::EffectHandle::wait_with_timeout
        #[error("Timeout waiting for effects to complete")]
        Timeout,
    }
}

pub use error::StoreError;

/// Tracks outstanding effects spawned by a single `send`
///
/// The counter is incremented before each effect task is spawned and
/// decremented when the task finishes (via [`DecrementGuard`], so panicking
/// tasks still decrement). When the counter reaches zero the notifier fires.
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Last effect finished, wake any waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Decrements effect tracking on drop, even if the effect task panics
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Handle for awaiting completion of the effects produced by one `send`
///
/// `send()` returns after *starting* effect execution, not after completion.
/// Hold the handle when a caller needs to know the effects (and any actions
/// they feed back) have finished.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::TriggerEffect).await;
/// handle.wait().await;
/// ```
#[derive(Debug)]
pub struct EffectHandle {
    counter: Arc<AtomicUsize>,
    notify: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (notifier, notify) = watch::channel(());

        (
            Self {
                counter: Arc::clone(&counter),
                notify,
            },
            EffectTracking { counter, notifier },
        )
    }

    /// Whether all tracked effects have completed
    #[must_use]
    pub fn completed(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == 0
    }

    /// Wait until all tracked effects have completed
    ///
    /// Returns immediately if no effects were spawned (the common case for
    /// pure state machines).
    pub async fn wait(&mut self) {
        while self.counter.load(Ordering::SeqCst) > 0 {
            if self.notify.changed().await.is_err() {
                // Tracking side dropped, nothing left to wait for
                break;
            }
        }
    }

    /// Wait for effect completion with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires with effects
    /// still running.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with action feedback loop)
/// 5. State snapshot broadcasting (for observers that redraw on change)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Concurrency
///
/// - The reducer executes synchronously while holding a write lock, so
///   concurrent `send()` calls serialize at the reducer and each mutation
///   runs to completion before the next
/// - Effects execute asynchronously in spawned tasks
/// - Observers receive a clone of the post-mutation state; they never see
///   partially applied mutations
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    /// State snapshot channel for observers that react to state changes.
    ///
    /// After every reduction the new state is cloned into this channel.
    /// Subscribers always see the latest snapshot; intermediate snapshots
    /// may be skipped under load, which is the desired redraw semantics.
    state_watch: Arc<watch::Sender<S>>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// # Arguments
    ///
    /// - `initial_state`: The starting state for the store
    /// - `reducer`: The reducer implementation (business logic)
    /// - `environment`: Injected dependencies
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        let (state_watch, _) = watch::channel(initial_state.clone());

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            state_watch: Arc::new(state_watch),
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires write lock on state
    /// 2. Calls reducer with (state, action, environment)
    /// 3. Publishes the new state snapshot to subscribers
    /// 4. Executes returned effects asynchronously
    /// 5. Effects may produce more actions (feedback loop)
    ///
    /// # Arguments
    ///
    /// - `action`: The action to process
    ///
    /// # Returns
    ///
    /// An [`EffectHandle`] that can be used to wait for effect completion.
    /// For pure state machines the handle completes immediately.
    ///
    /// # Panics
    ///
    /// If the reducer panics, the panic will propagate and halt the store.
    /// Reducers should be pure functions that do not panic.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> EffectHandle {
        tracing::debug!("Processing action");
        metrics::counter!("store.actions.total").increment(1);

        let (handle, tracking) = EffectHandle::new();

        let effects = {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut *state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());

            // Publish the post-mutation snapshot while still holding the
            // lock, so subscribers observe snapshots in mutation order
            self.state_watch.send_replace(state.clone());

            effects
        };

        for effect in effects {
            self.execute_effect(effect, tracking.clone());
        }
        tracing::debug!("Action processing completed, returning handle");

        handle
    }

    /// Subscribe to state snapshots
    ///
    /// Returns a watch receiver that holds the latest state snapshot.
    /// After each mutation, `changed()` resolves and `borrow()` yields the
    /// new snapshot. This is the redraw loop's input.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut snapshots = store.subscribe();
    /// while snapshots.changed().await.is_ok() {
    ///     let state = snapshots.borrow().clone();
    ///     redraw(&state);
    /// }
    /// ```
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state_watch.subscribe()
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure to ensure the lock is released
    /// promptly:
    ///
    /// ```ignore
    /// let item_count = store.state(|s| s.items.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Execute a top-level effect with completion tracking
    ///
    /// `None` is a no-op. Everything else runs in a spawned task; the
    /// [`DecrementGuard`] ensures the tracking counter is decremented even
    /// if the task panics.
    #[allow(clippy::needless_pass_by_value)] // tracking is cloned per effect by the caller
    fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
        if matches!(effect, Effect::None) {
            tracing::trace!("Executing Effect::None (no-op)");
            metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            return;
        }

        tracking.increment();
        let store = self.clone();

        tokio::spawn(async move {
            let _guard = DecrementGuard(tracking);
            run_effect(store, effect).await;
        });
    }
}

/// Run one effect to completion, feeding produced actions back to the store
///
/// Actions produced by `Future` and `Delay` effects are sent back through
/// `store.send`, so their state changes reach subscribers like any other
/// mutation.
fn run_effect<S, A, E, R>(
    store: Store<S, A, E, R>,
    effect: Effect<A>,
) -> std::pin::Pin<Box<dyn Future<Output = ()> + Send>>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
    E: Clone + Send + Sync + 'static,
{
    Box::pin(async move {
        match effect {
            Effect::None => {
                tracing::trace!("Executing Effect::None (no-op)");
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            },
            Effect::Future(fut) => {
                tracing::trace!("Executing Effect::Future");
                metrics::counter!("store.effects.executed", "type" => "future").increment(1);

                if let Some(action) = fut.await {
                    tracing::trace!("Effect::Future produced an action, sending to store");
                    let _ = store.send(action).await;
                } else {
                    tracing::trace!("Effect::Future completed with no action");
                }
            },
            Effect::Delay { duration, action } => {
                tracing::trace!("Executing Effect::Delay (duration: {:?})", duration);
                metrics::counter!("store.effects.executed", "type" => "delay").increment(1);

                tokio::time::sleep(duration).await;
                tracing::trace!("Effect::Delay completed, sending action");
                let _ = store.send(*action).await;
            },
            Effect::Parallel(effects) => {
                tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                let tasks: Vec<_> = effects
                    .into_iter()
                    .map(|effect| tokio::spawn(run_effect(store.clone(), effect)))
                    .collect();
                for task in tasks {
                    if let Err(error) = task.await {
                        // Fire-and-forget semantics: log and keep going
                        tracing::error!(%error, "Parallel effect task failed");
                    }
                }
            },
            Effect::Sequential(effects) => {
                tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);

                for effect in effects {
                    run_effect(store.clone(), effect).await;
                }
            },
        }
    })
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            state_watch: Arc::clone(&self.state_watch),
        }
    }
}
