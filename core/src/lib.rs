//! # EventHub Core
//!
//! Core traits and types for the EventHub front ends.
//!
//! Every screen of the campus event portals is modelled as a reducer: a pure
//! function `(State, Action, Environment) → (State, Effects)`. Network calls
//! never happen inside a reducer; they are returned as [`effect::Effect`]
//! values and executed by the runtime, which feeds their results back as
//! actions.
//!
//! ## Core Concepts
//!
//! - **State**: the view model of a screen (lists, forms, modals, notices)
//! - **Action**: every input a screen reacts to (user intents and API results)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: description of asynchronous work, not its execution
//! - **Environment**: injected dependencies (API client, clock)
//!
//! ## Example
//!
//! ```
//! use eventhub_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let effects = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! assert_eq!(effects.len(), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Declarative macros for building effects
pub mod effect_macros;

/// Reducer module - The core trait for view logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all presentational logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for view logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The view state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Most reducers return zero or one effect, so effects are collected in a
    /// `SmallVec` that stays on the stack for up to four entries.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action against the current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe work to be performed by the runtime. They are values,
/// not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation, usually one or more API calls
        ///
        /// Requests that must land together are joined inside the future, so
        /// a screen sees a single result action.
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External dependencies are abstracted behind traits and injected via the
/// Environment parameter of a reducer.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
