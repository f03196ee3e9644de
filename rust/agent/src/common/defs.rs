use crate::Result;
use serde::{Deserialize, Serialize};

/// One observed `(state, action, next_state, reward)` step.
///
/// Fields are private so a transition cannot be changed once recorded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition<S, A, R> {
    state: S,
    action: A,
    next_state: S,
    reward: R,
}

impl<S, A, R> Transition<S, A, R> {
    pub fn new(state: S, action: A, next_state: S, reward: R) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn next_state(&self) -> &S {
        &self.next_state
    }

    pub fn reward(&self) -> &R {
        &self.reward
    }
}

/// Records Markov transitions and derives the context a policy acts on.
pub trait Memory {
    type Observation;
    /// The agent's Markov state, derived from observations.
    type Context;
    type Action;
    type Reward;

    fn add_transition(
        &mut self,
        observation: Self::Observation,
        action: Self::Action,
        next_observation: Self::Observation,
        reward: Self::Reward,
    );

    fn get_context(&self, observation: &Self::Observation) -> Self::Context;

    /// Recorded transitions, in insertion order, with both ends mapped through
    /// [`Memory::get_context`]. Each call starts a fresh pass.
    fn context_transitions(
        &self,
    ) -> Box<dyn Iterator<Item = Transition<Self::Context, Self::Action, Self::Reward>> + '_>;

    /// Hook run before the policy learns from this memory.
    fn update(&mut self) {}

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Action selection and learning over a [`Memory`].
pub trait Policy {
    type Context;
    type Action;
    type Reward;

    fn sample_action(&mut self, context: &Self::Context) -> Result<Self::Action>;

    fn update<M>(&mut self, memory: &M) -> Result<()>
    where
        M: Memory<Context = Self::Context, Action = Self::Action, Reward = Self::Reward>;
}
