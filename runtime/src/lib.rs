//! # EventHub Runtime
//!
//! Runtime for the EventHub view models.
//!
//! This crate provides the [`Store`], which owns a screen's state, serialises
//! reducer execution and runs the effects reducers return.
//!
//! ## Core Components
//!
//! - **Store**: manages state and executes effects
//! - **Effect Executor**: runs effect descriptions and feeds resulting actions back
//! - **Action broadcast**: lets front ends observe actions produced by effects
//!
//! ## Example
//!
//! ```ignore
//! use eventhub_runtime::Store;
//!
//! let store = Store::new(StudentPortalState::default(), StudentPortalReducer, env);
//!
//! // Send an action and wait for its API call to land
//! let mut handle = store.send(StudentPortalAction::LoadData).await;
//! handle.wait().await;
//!
//! // Read state
//! let events = store.state(|s| s.events.len()).await;
//! ```

use eventhub_core::{effect::Effect, reducer::Reducer};
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
        /// Timeout waiting for a matching action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is observed.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`]. Awaiting [`EffectHandle::wait`] returns once
/// every effect spawned by that action has finished *and* any action it fed
/// back has been reduced. Effects started by those feedback actions are not
/// tracked; observe them with [`Store::send_and_wait_for`] or
/// [`Store::subscribe_actions`].
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle and the tracking context that feeds it
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running for this handle
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracking context is gone, so nothing can still be running.
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: tracking context carried through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Register one spawned effect; the guard releases it on drop
    fn guard(&self) -> DecrementGuard {
        self.increment();
        DecrementGuard(self.clone())
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// The counter is released even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{Arc, Duration, Effect, EffectHandle, EffectTracking, Reducer, RwLock, StoreError};
    use tokio::sync::broadcast;

    /// Default number of buffered actions for observers.
    const DEFAULT_BROADCAST_CAPACITY: usize = 64;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent reads)
    /// 2. Reducer (view logic)
    /// 3. Environment (API client, clock)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Reducer calls are serialised by the write lock, so a store behaves like
    /// a single UI thread even when effects complete concurrently.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        /// Every action produced by an effect is broadcast here once the
        /// reducer has applied it.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(
                initial_state,
                reducer,
                environment,
                DEFAULT_BROADCAST_CAPACITY,
            )
        }

        /// Create a new store with a custom action broadcast capacity
        ///
        /// Increase the capacity if observers frequently lag.
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Spawns the returned effects
        ///
        /// `send()` returns after starting effect execution, not completion.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> EffectHandle
        where
            R: Clone,
            E: Clone,
        {
            metrics::counter!("store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!(effects = effects.len(), "Reducer completed");
                effects
            };

            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            handle
        }

        /// Send an action and wait for a matching result action
        ///
        /// Subscribes to the action broadcast *before* sending, so a result
        /// produced immediately cannot be missed. Because actions are broadcast
        /// after they are reduced, state read after this returns already
        /// reflects the matching action.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before a matching action arrived
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            R: Clone,
            E: Clone,
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to all actions produced by effects
        ///
        /// Actions sent directly through [`Store::send`] are not broadcast.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.events.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Feed an action produced by an effect back into the store
        async fn feed_back(&self, action: A)
        where
            R: Clone,
            E: Clone,
        {
            self.send(action.clone()).await;
            // No receivers is fine; observers are optional.
            let _ = self.action_broadcast.send(action);
        }

        /// Execute an effect with tracking
        ///
        /// - `None`: No-op
        /// - `Future`: runs the computation, feeds back the resulting action if `Some`
        ///
        /// Effect panics are isolated in their spawned task; the guard still
        /// releases the counter.
        #[allow(clippy::needless_pass_by_value)] // tracking is cloned into each spawned task
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    let guard = tracking.guard();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action");
                            store.feed_back(action).await;
                        }
                    });
                },
            }
        }
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
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
    use std::time::Duration;

    #[derive(Debug, Clone)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
        ProduceEffect,
        ProduceTwoEffects,
        ProduceSilentEffect,
        ProducePanickingEffect,
        ProduceChain,
    }

    #[derive(Debug, Clone)]
    struct TestEnv;

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.value -= 1;
                    smallvec![Effect::None]
                },
                TestAction::NoOp => smallvec![Effect::None],
                TestAction::ProduceEffect => {
                    smallvec![Effect::Future(Box::pin(async {
                        Some(TestAction::Increment)
                    }))]
                },
                TestAction::ProduceTwoEffects => smallvec![
                    Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                    Effect::Future(Box::pin(async {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Some(TestAction::Increment)
                    })),
                ],
                TestAction::ProduceSilentEffect => {
                    smallvec![Effect::Future(Box::pin(async { None }))]
                },
                TestAction::ProducePanickingEffect => {
                    #[allow(clippy::panic)] // Intentional panic for testing error handling
                    {
                        smallvec![Effect::Future(Box::pin(async {
                            panic!("Intentional panic in effect for testing");
                        }))]
                    }
                },
                TestAction::ProduceChain => {
                    // Feedback action itself produces another effect
                    smallvec![Effect::Future(Box::pin(async {
                        Some(TestAction::ProduceEffect)
                    }))]
                },
            }
        }
    }

    fn store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState { value: 0 }, TestReducer, TestEnv)
    }

    #[tokio::test]
    async fn test_send_action() {
        let store = store();

        store.send(TestAction::Increment).await;
        store.send(TestAction::Increment).await;
        store.send(TestAction::Decrement).await;
        store.send(TestAction::NoOp).await;

        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_wait_covers_feedback_reduction() {
        let store = store();

        let mut handle = store.send(TestAction::ProduceEffect).await;
        handle.wait().await;

        assert_eq!(handle.pending(), 0);
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_wait_covers_every_effect_of_an_action() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TestAction::ProduceTwoEffects).await;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert_eq!(store.state(|s| s.value).await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_effect_without_action_is_not_broadcast() -> Result<(), StoreError> {
        let store = store();
        let mut rx = store.subscribe_actions();

        let mut handle = store.send(TestAction::ProduceSilentEffect).await;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        assert!(rx.try_recv().is_err());
        assert_eq!(store.state(|s| s.value).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for_sees_reduced_state() -> Result<(), StoreError> {
        let store = store();

        let action = store
            .send_and_wait_for(
                TestAction::ProduceChain,
                |a| *a == TestAction::Increment,
                Duration::from_secs(1),
            )
            .await?;

        assert_eq!(action, TestAction::Increment);
        assert_eq!(store.state(|s| s.value).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for_times_out() {
        let store = store();

        let result = store
            .send_and_wait_for(
                TestAction::NoOp,
                |a| *a == TestAction::Increment,
                Duration::from_millis(20),
            )
            .await;

        assert!(matches!(result, Err(StoreError::Timeout)));
    }

    #[tokio::test]
    async fn test_subscribe_actions_receives_feedback() {
        let store = store();
        let mut rx = store.subscribe_actions();

        let mut handle = store.send(TestAction::ProduceEffect).await;
        handle.wait().await;

        assert!(matches!(rx.try_recv(), Ok(TestAction::Increment)));
    }

    #[tokio::test]
    async fn test_store_clone_shares_state() {
        let store1 = store();
        let store2 = store1.clone();

        store1.send(TestAction::Increment).await;
        assert_eq!(store2.state(|s| s.value).await, 1);

        store2.send(TestAction::Increment).await;
        assert_eq!(store1.state(|s| s.value).await, 2);
    }

    #[tokio::test]
    async fn test_effect_panic_isolation() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TestAction::ProducePanickingEffect).await;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        // Store still processes actions after an effect panicked
        store.send(TestAction::Increment).await;
        assert_eq!(store.state(|s| s.value).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_completed_handle_returns_immediately() -> Result<(), StoreError> {
        let mut handle = EffectHandle::completed();
        handle.wait_with_timeout(Duration::from_millis(10)).await
    }
}
