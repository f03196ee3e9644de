pub mod estimator;
pub mod vi;

use ndarray::{Array1, Array3, Axis};
use rl_agent::{Continous, Discrete, Result, RlError, Transition};

pub type DiscreteTransition = Transition<Discrete, Discrete, Continous>;

/// Markov Decision Process - Sutton & Barto 2018, with rewards attached to states.
///
/// `p()` has shape `(n_s, n_a, n_s)`, `r()` has shape `(n_s)`.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn p(&self) -> &Array3<Continous>;

    fn r(&self) -> &Array1<Continous>;
}

/// An MDP given by its exact model.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularMdp {
    p: Array3<Continous>,
    r: Array1<Continous>,
}

impl TabularMdp {
    /// Checks shapes and that every `p[s, a, ..]` sums to 1.
    pub fn new(p: Array3<Continous>, r: Array1<Continous>) -> Result<Self> {
        check_shapes(&p, &r)?;

        for ((s, a), row_sum) in p.sum_axis(Axis(2)).indexed_iter() {
            if (row_sum - 1.).abs() > 1e-8 {
                return Err(RlError::InvalidParameter(format!(
                    "p[{s}, {a}, ..] sums to {row_sum}, expected 1"
                )));
            }
        }

        Ok(Self { p, r })
    }
}

impl Mdp for TabularMdp {
    fn n_s(&self) -> usize {
        self.r.len()
    }

    fn n_a(&self) -> usize {
        self.p.dim().1
    }

    fn p(&self) -> &Array3<Continous> {
        &self.p
    }

    fn r(&self) -> &Array1<Continous> {
        &self.r
    }
}

pub(crate) fn check_shapes(p: &Array3<Continous>, r: &Array1<Continous>) -> Result<()> {
    let (n_s, n_a, n_s_next) = p.dim();
    if n_s != n_s_next || r.len() != n_s {
        return Err(RlError::DimensionMismatch(format!(
            "p has shape ({n_s}, {n_a}, {n_s_next}), r has length {}",
            r.len()
        )));
    }

    if n_s > 0 && n_a == 0 {
        return Err(RlError::DimensionMismatch("p has no actions".into()));
    }

    Ok(())
}
