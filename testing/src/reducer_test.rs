//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use eventhub_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use eventhub_testing::ReducerTest;
///
/// ReducerTest::new(EventsListReducer)
///     .with_env(Persona::User)
///     .given_state(EventsListState::default())
///     .when_action(EventsListAction::ToggleInterest(EventId(1)))
///     .then_state(|state| {
///         assert!(state.interest.is_interested(EventId(1)));
///     })
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
    A: Clone,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        // Execute reducer
        let effects = self.reducer.reduce(&mut state, action, &env);

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run effect assertions
        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use eventhub_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Run the first `Future` effect and return the action it produces
    ///
    /// Reducer tests use this to check which action an API call feeds back
    /// without spinning up a store.
    ///
    /// # Panics
    ///
    /// Panics if there is no `Future` effect.
    #[allow(clippy::panic)] // Test assertion
    pub async fn run_first_future<A>(effects: Vec<Effect<A>>) -> Option<A> {
        for effect in effects {
            if let Effect::Future(fut) = effect {
                return fut.await;
            }
        }
        panic!("Expected a Future effect, but none found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::effect::Effect;
    use eventhub_core::reducer::Reducer;

    #[derive(Clone, Debug, Default)]
    struct TestState {
        titles: Vec<String>,
        loading: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Load,
        Loaded(Vec<String>),
    }

    struct TestReducer;

    struct TestEnv {
        titles: Vec<String>,
    }

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Load => {
                    state.loading = true;
                    let titles = env.titles.clone();
                    smallvec::smallvec![Effect::Future(Box::pin(async move {
                        Some(TestAction::Loaded(titles))
                    }))]
                },
                TestAction::Loaded(titles) => {
                    state.loading = false;
                    state.titles = titles;
                    smallvec::smallvec![Effect::None]
                },
            }
        }
    }

    fn env() -> TestEnv {
        TestEnv {
            titles: vec!["Hackathon".to_string()],
        }
    }

    #[test]
    fn test_given_when_then() {
        ReducerTest::new(TestReducer)
            .with_env(env())
            .given_state(TestState::default())
            .when_action(TestAction::Loaded(vec!["Cultural Fest".to_string()]))
            .then_state(|state| {
                assert_eq!(state.titles, vec!["Cultural Fest".to_string()]);
                assert!(!state.loading);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_effect_assertions() {
        ReducerTest::new(TestReducer)
            .with_env(env())
            .given_state(TestState::default())
            .when_action(TestAction::Load)
            .then_state(|state| assert!(state.loading))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[tokio::test]
    async fn test_run_first_future() {
        let mut state = TestState::default();
        let effects = TestReducer.reduce(&mut state, TestAction::Load, &env());

        let action = assertions::run_first_future(effects.into_vec()).await;
        assert_eq!(action, Some(TestAction::Loaded(vec!["Hackathon".to_string()])));
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<TestAction>(&[Effect::None]);
        assertions::assert_no_effects::<TestAction>(&[]);
    }
}
