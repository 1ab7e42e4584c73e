//! Declarative macros for ergonomic effect construction
//!
//! Reducers hand every API call to the runtime through [`async_effect!`].

/// Create an `Effect::Future` from an async block
///
/// The block must evaluate to `Option<Action>`.
///
/// # Example
///
/// ```
/// use eventhub_core::{async_effect, effect::Effect};
///
/// #[derive(Debug)]
/// enum Action {
///     Loaded(u32),
/// }
///
/// let effect: Effect<Action> = async_effect! {
///     Some(Action::Loaded(3))
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
