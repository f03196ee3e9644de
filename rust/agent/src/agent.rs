use super::*;
use tracing::debug;

/// Drives a [`Policy`] from the transitions recorded in a [`Memory`].
#[derive(Debug, Clone)]
pub struct Agent<M, P> {
    memory: M,
    policy: P,
}

impl<M, P> Agent<M, P>
where
    M: Memory,
    P: Policy<Context = M::Context, Action = M::Action, Reward = M::Reward>,
{
    pub fn new(memory: M, policy: P) -> Self {
        Self { memory, policy }
    }

    /// Picks the action for `observation`.
    pub fn step(&mut self, observation: &M::Observation) -> Result<M::Action> {
        let context = self.memory.get_context(observation);
        self.policy.sample_action(&context)
    }

    pub fn observe(
        &mut self,
        observation: M::Observation,
        action: M::Action,
        next_observation: M::Observation,
        reward: M::Reward,
    ) {
        self.memory
            .add_transition(observation, action, next_observation, reward);
    }

    /// Refreshes the memory, then lets the policy learn from all of it.
    pub fn update(&mut self) -> Result<()> {
        self.memory.update();
        debug!(transitions = self.memory.len(), "updating policy");
        self.policy.update(&self.memory)
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}
