use super::{pick_next, Weighted};
use crate::algos::model_based::mdp::{Mdp, TabularMdp};
use ndarray::{Array1, Array3};
use rand::Rng;
use rl_agent::{common::utils::check_index, Continous, Discrete, Result, RlError};
use std::collections::HashMap;

pub const FAIRWAY: Discrete = 0;
pub const GREEN: Discrete = 1;
pub const HOLE: Discrete = 2;

pub const DRIVE: Discrete = 0;
pub const CHIP: Discrete = 1;
pub const PUTT: Discrete = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub next_state: Discrete,
    pub reward: Continous,
    pub done: bool,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Branch {
    pub(super) outcome: StepOutcome,
    pub(super) probability: Continous,
}

impl Weighted<StepOutcome> for Branch {
    fn s(&self) -> StepOutcome {
        self.outcome
    }

    fn p(&self) -> Continous {
        self.probability
    }
}

/// https://towardsdatascience.com/reinforcement-learning-an-easy-introduction-to-value-iteration-e4cfe0731fd5
///
/// The ball is scored when it is picked out of the hole, so rewards depend only
/// on the state being left. Picking it out ends the episode and puts the ball
/// back on the fairway. Moves not listed leave the ball where it is.
type Branches = HashMap<(Discrete, Discrete), Vec<Branch>>;

#[derive(Debug, Clone)]
pub struct SimpleGolf {
    branches: Branches,
    model: TabularMdp,
}

impl SimpleGolf {
    pub fn new() -> Result<Self> {
        let go = |next_state, probability, reward, done| Branch {
            outcome: StepOutcome {
                next_state,
                reward,
                done,
            },
            probability,
        };

        let mut branches = HashMap::from([
            (
                (FAIRWAY, DRIVE),
                vec![go(GREEN, 0.9, 0., false), go(FAIRWAY, 0.1, 0., false)],
            ),
            (
                (GREEN, CHIP),
                vec![go(FAIRWAY, 0.9, 0., false), go(GREEN, 0.1, 0., false)],
            ),
            (
                (GREEN, PUTT),
                vec![go(HOLE, 0.9, 0., false), go(GREEN, 0.1, 0., false)],
            ),
        ]);
        for a in [DRIVE, CHIP, PUTT] {
            branches.insert((HOLE, a), vec![go(FAIRWAY, 1., 10., true)]);
        }

        let model = Self::exact_model(&branches)?;
        Ok(Self { branches, model })
    }

    /// Rewards here depend only on the state being left, so every action out of
    /// a state must have the same expected reward; that value becomes `r[s]`.
    fn exact_model(branches: &Branches) -> Result<TabularMdp> {
        let (n_s, n_a) = (3, 3);
        let mut p = Array3::<Continous>::zeros((n_s, n_a, n_s));
        let mut r = Array1::<Continous>::zeros(n_s);
        for s in 0..n_s {
            let mut state_reward = None;
            for a in 0..n_a {
                let expected: Continous = match branches.get(&(s, a)) {
                    Some(bs) => {
                        for b in bs {
                            p[[s, a, b.outcome.next_state]] += b.probability;
                        }
                        bs.iter().map(|b| b.probability * b.outcome.reward).sum()
                    }
                    None => {
                        p[[s, a, s]] = 1.;
                        0.
                    }
                };

                match state_reward {
                    None => state_reward = Some(expected),
                    Some(reward) if (reward - expected).abs() > 1e-12 => {
                        return Err(RlError::InvalidParameter(format!(
                            "state {s} pays {reward} for action 0 but {expected} for action {a}"
                        )));
                    }
                    Some(_) => {}
                }
            }
            r[s] = state_reward.unwrap_or_default();
        }

        TabularMdp::new(p, r)
    }

    pub fn reset(&self) -> Discrete {
        FAIRWAY
    }

    pub fn step<G: Rng + ?Sized>(
        &self,
        rng: &mut G,
        s: Discrete,
        a: Discrete,
    ) -> Result<StepOutcome> {
        let s = check_index("state", s, self.n_s())?;
        let a = check_index("action", a, self.n_a())?;

        match self.branches.get(&(s, a)) {
            Some(bs) => pick_next(rng, bs),
            None => Ok(StepOutcome {
                next_state: s,
                reward: 0.,
                done: false,
            }),
        }
    }
}

impl Mdp for SimpleGolf {
    fn n_s(&self) -> usize {
        self.model.n_s()
    }

    fn n_a(&self) -> usize {
        self.model.n_a()
    }

    fn p(&self) -> &Array3<Continous> {
        self.model.p()
    }

    fn r(&self) -> &Array1<Continous> {
        self.model.r()
    }
}
