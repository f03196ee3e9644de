//! Empirical MDP model from a batch of observed transitions.

use super::{DiscreteTransition, Mdp};
use itertools::iproduct;
use ndarray::{s, Array1, Array3, Zip};
use rl_agent::{common::utils::check_index, Continous, Discrete, Result};
use tracing::debug;

/// Best-fit tabular model of a batch of transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalModel {
    pub p: Array3<Continous>,
    pub r: Array1<Continous>,
    /// `(s, a)` pairs absent from the batch. Their rows in `p` are self-loops.
    pub unobserved: Vec<(Discrete, Discrete)>,
}

impl Mdp for EmpiricalModel {
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

pub fn estimate(
    transitions: &[DiscreteTransition],
    n_s: usize,
    n_a: usize,
) -> Result<EmpiricalModel> {
    let (p, unobserved) = estimate_transition_probabilities(transitions, n_s, n_a)?;
    let r = estimate_rewards(transitions, n_s)?;

    Ok(EmpiricalModel { p, r, unobserved })
}

/// Mean reward of the transitions leaving each state, whatever the action.
/// States never left get 0.
pub fn estimate_rewards(
    transitions: &[DiscreteTransition],
    n_s: usize,
) -> Result<Array1<Continous>> {
    let mut r = Array1::<Continous>::zeros(n_s);
    let mut counts = Array1::<Continous>::zeros(n_s);
    for t in transitions {
        let s = check_index("state", *t.state(), n_s)?;
        r[s] += *t.reward();
        counts[s] += 1.;
    }

    Zip::from(&mut r)
        .and(&counts)
        .for_each(|r, &c| *r /= c.max(1.));

    Ok(r)
}

/// Normalized next-state histograms per `(s, a)`.
///
/// A pair with no observations gets `p[s, a, s] = 1` and is listed in the
/// returned vector.
pub fn estimate_transition_probabilities(
    transitions: &[DiscreteTransition],
    n_s: usize,
    n_a: usize,
) -> Result<(Array3<Continous>, Vec<(Discrete, Discrete)>)> {
    let mut p = Array3::<Continous>::zeros((n_s, n_a, n_s));
    for t in transitions {
        let s = check_index("state", *t.state(), n_s)?;
        let a = check_index("action", *t.action(), n_a)?;
        let s_next = check_index("next_state", *t.next_state(), n_s)?;
        p[[s, a, s_next]] += 1.;
    }

    let mut unobserved = vec![];
    for (s, a) in iproduct!(0..n_s, 0..n_a) {
        let mut row = p.slice_mut(s![s, a, ..]);
        let total = row.sum();
        if total > 0. {
            row /= total;
        } else {
            row[s] = 1.;
            unobserved.push((s, a));
        }
    }

    if !unobserved.is_empty() {
        debug!(
            count = unobserved.len(),
            "unobserved state-action pairs default to self-loops"
        );
    }

    Ok((p, unobserved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;
    use ndarray::arr1;
    use rl_agent::RlError;
    use rstest::rstest;

    fn t(s: Discrete, a: Discrete, s_next: Discrete, r: Continous) -> DiscreteTransition {
        DiscreteTransition::new(s, a, s_next, r)
    }

    #[test]
    fn test_estimate_matches_observed_frequencies() {
        let ts = vec![
            t(0, 0, 0, 1.),
            t(0, 0, 1, 2.),
            t(0, 0, 1, 3.),
            t(0, 0, 1, 6.),
            t(0, 1, 1, 3.),
            t(1, 0, 0, -1.),
            t(1, 0, 1, 0.),
            t(1, 1, 0, 4.),
        ];

        let m = estimate(&ts, 2, 2).unwrap();

        assert!(m.unobserved.is_empty());
        assert_float_eq!(m.p[[0, 0, 0]], 0.25, abs <= 1e-12);
        assert_float_eq!(m.p[[0, 0, 1]], 0.75, abs <= 1e-12);
        assert_float_eq!(m.p[[0, 1, 0]], 0., abs <= 1e-12);
        assert_float_eq!(m.p[[0, 1, 1]], 1., abs <= 1e-12);
        assert_float_eq!(m.p[[1, 0, 0]], 0.5, abs <= 1e-12);
        assert_float_eq!(m.p[[1, 0, 1]], 0.5, abs <= 1e-12);
        assert_float_eq!(m.p[[1, 1, 0]], 1., abs <= 1e-12);
        assert_float_eq!(m.p[[1, 1, 1]], 0., abs <= 1e-12);

        // Rewards pool over all actions taken from a state.
        assert_float_eq!(m.r.to_vec(), vec![3., 1.], abs_all <= 1e-12);
    }

    #[test]
    fn test_unvisited_state_gets_zero_reward() {
        let ts = vec![t(0, 0, 2, 5.), t(0, 0, 2, 7.)];

        let r = estimate_rewards(&ts, 3).unwrap();

        assert_float_eq!(r.to_vec(), vec![6., 0., 0.], abs_all <= 1e-12);
    }

    #[test]
    fn test_unobserved_pairs_become_self_loops() {
        let ts = vec![t(0, 1, 1, 0.)];

        let (p, unobserved) = estimate_transition_probabilities(&ts, 2, 2).unwrap();

        assert_eq!(unobserved, vec![(0, 0), (1, 0), (1, 1)]);
        assert_float_eq!(p.slice(s![0, 0, ..]).to_vec(), vec![1., 0.], abs_all <= 1e-12);
        assert_float_eq!(p.slice(s![0, 1, ..]).to_vec(), vec![0., 1.], abs_all <= 1e-12);
        assert_float_eq!(p.slice(s![1, 0, ..]).to_vec(), vec![0., 1.], abs_all <= 1e-12);
        assert_float_eq!(p.slice(s![1, 1, ..]).to_vec(), vec![0., 1.], abs_all <= 1e-12);
        assert!(p.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_empty_batch() {
        let m = estimate(&[], 3, 2).unwrap();

        assert_eq!(m.unobserved.len(), 6);
        assert_eq!(m.r, arr1(&[0., 0., 0.]));
        assert_eq!((m.n_s(), m.n_a()), (3, 2));
    }

    #[rstest]
    #[case(t(3, 0, 0, 0.), "state", 3)]
    #[case(t(0, 2, 0, 0.), "action", 2)]
    #[case(t(0, 0, 5, 0.), "next_state", 5)]
    fn test_out_of_range_indices(
        #[case] bad: DiscreteTransition,
        #[case] what: &str,
        #[case] index: Discrete,
    ) {
        let ts = vec![t(0, 0, 1, 0.), bad];

        match estimate(&ts, 3, 2) {
            Err(RlError::IndexOutOfRange { what: w, index: i, .. }) => {
                assert_eq!((w, i), (what, index))
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }
}
