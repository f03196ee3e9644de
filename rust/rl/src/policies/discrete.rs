use crate::algos::model_based::mdp::{estimator::estimate, vi::solve, DiscreteTransition};
use crate::config::SolverConfig;
use itertools::Itertools;
use ndarray::Array2;
use rand::prelude::*;
use rl_agent::{common::utils::check_index, *};
use tracing::debug;

/// Model-based policy over finite contexts and actions.
///
/// Each update re-estimates the MDP from the whole memory, solves it with value
/// iteration and swaps in the resulting Q-table.
#[derive(Debug, Clone)]
pub struct DiscretePolicy {
    n_contexts: usize,
    n_actions: usize,
    q: Array2<Continous>,
    config: SolverConfig,
    rng: StdRng,
    last_unobserved: Vec<(Discrete, Discrete)>,
}

impl DiscretePolicy {
    pub fn new(n_contexts: usize, n_actions: usize) -> Result<Self> {
        Self::with_rng(n_contexts, n_actions, StdRng::from_entropy())
    }

    pub fn with_seed(n_contexts: usize, n_actions: usize, seed: u64) -> Result<Self> {
        Self::with_rng(n_contexts, n_actions, StdRng::seed_from_u64(seed))
    }

    fn with_rng(n_contexts: usize, n_actions: usize, rng: StdRng) -> Result<Self> {
        if n_contexts == 0 || n_actions == 0 {
            return Err(RlError::InvalidParameter(format!(
                "need at least one context and one action, got {n_contexts}x{n_actions}"
            )));
        }

        Ok(Self {
            n_contexts,
            n_actions,
            q: Array2::zeros((n_contexts, n_actions)),
            config: SolverConfig::default(),
            rng,
            last_unobserved: vec![],
        })
    }

    pub fn with_config(mut self, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn n_contexts(&self) -> usize {
        self.n_contexts
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    pub fn q(&self) -> &Array2<Continous> {
        &self.q
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Pairs that had no data in the last update and were modeled as self-loops.
    pub fn last_unobserved(&self) -> &[(Discrete, Discrete)] {
        &self.last_unobserved
    }

    /// All actions attaining the row maximum of `context`.
    pub fn greedy_actions(&self, context: Discrete) -> Result<Vec<Discrete>> {
        let context = check_index("context", context, self.n_contexts)?;
        let row = self.q.row(context);
        let best = row.fold(Continous::NEG_INFINITY, |m, &x| m.max(x));

        Ok(row.iter().positions(|&x| x == best).collect())
    }
}

impl Policy for DiscretePolicy {
    type Context = Discrete;
    type Action = Discrete;
    type Reward = Continous;

    /// Greedy, with ties broken uniformly at random.
    fn sample_action(&mut self, context: &Discrete) -> Result<Discrete> {
        let actions = self.greedy_actions(*context)?;
        actions.choose(&mut self.rng).copied().ok_or_else(|| {
            RlError::InvalidParameter(format!("no greedy action for context {context}"))
        })
    }

    /// On error the current Q-table is kept.
    fn update<M>(&mut self, memory: &M) -> Result<()>
    where
        M: Memory<Context = Discrete, Action = Discrete, Reward = Continous>,
    {
        let transitions = memory
            .context_transitions()
            .collect::<Vec<DiscreteTransition>>();
        let model = estimate(&transitions, self.n_contexts, self.n_actions)?;
        let solution = solve(&model, &self.config)?;
        debug!(
            transitions = transitions.len(),
            unobserved = model.unobserved.len(),
            iterations = solution.iterations,
            "q-table updated"
        );

        self.q = solution.q;
        self.last_unobserved = model.unobserved;

        Ok(())
    }
}

pub type DiscreteMemory = ReplayMemory<Discrete, Discrete, Discrete, Continous>;

pub type DiscreteAgent = Agent<DiscreteMemory, DiscretePolicy>;

/// Agent whose observations are already its contexts.
pub fn discrete_agent(n_states: usize, n_actions: usize) -> Result<DiscreteAgent> {
    Ok(Agent::new(
        DiscreteMemory::new(),
        DiscretePolicy::new(n_states, n_actions)?,
    ))
}
