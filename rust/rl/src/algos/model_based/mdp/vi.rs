//! Value iteration for state-reward MDPs.

use super::{check_shapes, Mdp};
use crate::config::SolverConfig;
use ndarray::{Array1, Array2, Array3, Axis};
use rl_agent::{Continous, Discrete, Result, RlError};
use tracing::{debug, trace};

pub const DEFAULT_GAMMA: Continous = 0.999;
pub const DEFAULT_THRESHOLD: Continous = 1e-5;
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Converged state values and the action values they induce.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub v: Array1<Continous>,
    /// One Bellman backup of `v`.
    pub q: Array2<Continous>,
    pub iterations: usize,
}

impl Solution {
    pub fn v_star(&self, s: Discrete) -> Option<Continous> {
        self.v.get(s).copied()
    }

    pub fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous> {
        self.q.get((s, a)).copied()
    }

    /// Lowest-index greedy action.
    pub fn pi_star(&self, s: Discrete) -> Option<Discrete> {
        if s >= self.q.nrows() {
            return None;
        }

        let row = self.q.row(s);
        let best = row.fold(Continous::NEG_INFINITY, |m, &x| m.max(x));
        row.iter().position(|&x| x == best)
    }
}

/// `q[s, a] = sum_s' p[s, a, s'] * (r[s'] + gamma * v[s'])`
pub fn bellman_backup(
    p: &Array3<Continous>,
    r: &Array1<Continous>,
    gamma: Continous,
    v: &Array1<Continous>,
) -> Array2<Continous> {
    let target = v.mapv(|v| gamma * v) + r;
    p.map_axis(Axis(2), |row| row.dot(&target))
}

pub(crate) fn check_params(
    gamma: Continous,
    threshold: Continous,
    max_iterations: usize,
) -> Result<()> {
    if !(gamma > 0. && gamma < 1.) {
        return Err(RlError::InvalidParameter(format!(
            "gamma must be in (0, 1), got {gamma}"
        )));
    }

    if !(threshold > 0. && threshold.is_finite()) {
        return Err(RlError::InvalidParameter(format!(
            "threshold must be positive, got {threshold}"
        )));
    }

    if max_iterations == 0 {
        return Err(RlError::InvalidParameter(
            "max_iterations must be positive".into(),
        ));
    }

    Ok(())
}

/// Iterates the Bellman optimality operator from `v = 0` until no state value
/// moves by `threshold` or more.
///
/// `p` rows are expected to be distributions; this is not checked. Stops with
/// [`RlError::NonConvergence`] after `max_iterations` sweeps
/// (default [`DEFAULT_MAX_ITERATIONS`]).
pub fn value_iteration(
    p: &Array3<Continous>,
    r: &Array1<Continous>,
    gamma: Continous,
    threshold: Continous,
    max_iterations: Option<usize>,
) -> Result<Solution> {
    let max_iterations = max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
    check_shapes(p, r)?;
    check_params(gamma, threshold, max_iterations)?;

    let (n_s, n_a, _) = p.dim();
    let mut v = Array1::<Continous>::zeros(n_s);
    let mut q = Array2::<Continous>::zeros((n_s, n_a));
    let mut delta = Continous::INFINITY;
    for iterations in 1..=max_iterations {
        q = bellman_backup(p, r, gamma, &v);
        if q.iter().any(|x| !x.is_finite()) {
            return Err(RlError::NonFinite { iterations });
        }

        let v_new = q.map_axis(Axis(1), |row| {
            row.fold(Continous::NEG_INFINITY, |m, &x| m.max(x))
        });
        delta = v_new
            .iter()
            .zip(v.iter())
            .fold(0., |m: Continous, (a, b)| m.max((a - b).abs()));
        trace!(iterations, delta, "value iteration sweep");

        if delta < threshold {
            debug!(iterations, delta, "value iteration converged");
            return Ok(Solution { v, q, iterations });
        }

        v = v_new;
    }

    Err(RlError::NonConvergence {
        iterations: max_iterations,
        delta,
        v: v.to_vec(),
        q: q.outer_iter().map(|row| row.to_vec()).collect(),
    })
}

pub fn solve<M: Mdp + ?Sized>(mdp: &M, config: &SolverConfig) -> Result<Solution> {
    value_iteration(
        mdp.p(),
        mdp.r(),
        config.gamma,
        config.threshold,
        Some(config.max_iterations),
    )
}
