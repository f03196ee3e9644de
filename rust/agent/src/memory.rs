use super::*;

fn identity<O: Clone>(observation: &O) -> O {
    observation.clone()
}

/// Unbounded, append-only replay buffer.
///
/// Transitions are stored over raw observations and mapped to contexts only when
/// read back, so the context function can be swapped without losing history.
#[derive(Debug, Clone)]
pub struct ReplayMemory<O, C, A, R> {
    transitions: Vec<Transition<O, A, R>>,
    context_fn: fn(&O) -> C,
}

impl<O: Clone, A, R> ReplayMemory<O, O, A, R> {
    /// Observations are used as contexts as-is.
    pub fn new() -> Self {
        Self::with_context(identity::<O>)
    }
}

impl<O: Clone, A, R> Default for ReplayMemory<O, O, A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, C, A, R> ReplayMemory<O, C, A, R> {
    pub fn with_context(context_fn: fn(&O) -> C) -> Self {
        Self {
            transitions: Vec::new(),
            context_fn,
        }
    }

    pub fn transitions(&self) -> &[Transition<O, A, R>] {
        &self.transitions
    }
}

impl<O, C, A, R> Memory for ReplayMemory<O, C, A, R>
where
    A: Clone,
    R: Clone,
{
    type Observation = O;
    type Context = C;
    type Action = A;
    type Reward = R;

    fn add_transition(&mut self, observation: O, action: A, next_observation: O, reward: R) {
        self.transitions
            .push(Transition::new(observation, action, next_observation, reward));
    }

    fn get_context(&self, observation: &O) -> C {
        (self.context_fn)(observation)
    }

    fn context_transitions(&self) -> Box<dyn Iterator<Item = Transition<C, A, R>> + '_> {
        Box::new(self.transitions.iter().map(|t| {
            Transition::new(
                self.get_context(t.state()),
                t.action().clone(),
                self.get_context(t.next_state()),
                t.reward().clone(),
            )
        }))
    }

    fn len(&self) -> usize {
        self.transitions.len()
    }
}
