//! Pure state-transition contract.

/// A reducer folds actions into state.
///
/// Implementations must be deterministic and free of IO: the same state and
/// action always yield the same next state. Reducers are total; an action that
/// does not apply returns the state unchanged instead of failing.
pub trait Reducer {
    type State: Clone + core::fmt::Debug;
    type Action: Clone + core::fmt::Debug;

    /// Produce the next state from the current one and an action.
    fn reduce(&self, state: Self::State, action: Self::Action) -> Self::State;

    /// Fold a sequence of actions, left to right.
    fn reduce_all<I>(&self, state: Self::State, actions: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Action>,
    {
        actions
            .into_iter()
            .fold(state, |state, action| self.reduce(state, action))
    }
}
