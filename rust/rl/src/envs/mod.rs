pub mod simple_golf;

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rl_agent::{Continous, Result, RlError};

pub trait Weighted<S> {
    fn s(&self) -> S;

    fn p(&self) -> Continous;
}

/// Draws one item with probability proportional to its weight.
pub fn pick_next<T, S, G>(rng: &mut G, ts: &[T]) -> Result<S>
where
    T: Weighted<S>,
    G: Rng + ?Sized,
{
    let dist = WeightedIndex::new(ts.iter().map(|item| item.p()))
        .map_err(|e| RlError::InvalidParameter(format!("bad transition weights: {e}")))?;
    Ok(ts[dist.sample(rng)].s())
}

#[cfg(test)]
mod tests {
    use super::simple_golf::*;
    use super::*;
    use float_eq::*;
    use rl_agent::Discrete;
    use rstest::rstest;

    fn branch(next_state: Discrete, probability: Continous) -> Branch {
        Branch {
            outcome: StepOutcome {
                next_state,
                reward: 0.,
                done: next_state == HOLE,
            },
            probability,
        }
    }

    #[test]
    fn test_pick_next_follows_weights() {
        let putt = [branch(HOLE, 0.9), branch(GREEN, 0.1)];
        let rng = &mut StdRng::seed_from_u64(2718);

        let n = 20000;
        let mut holed = 0;
        for _ in 0..n {
            let out: StepOutcome = pick_next(rng, &putt).unwrap();
            assert!(out.next_state == HOLE || out.next_state == GREEN);
            assert_eq!(out.done, out.next_state == HOLE);
            if out.done {
                holed += 1;
            }
        }

        assert_float_eq!(holed as f64 / n as f64, 0.9, abs <= 1e-2);
    }

    #[test]
    fn test_pick_next_never_picks_zero_weight() {
        let rng = &mut StdRng::seed_from_u64(7);
        let branches = [branch(FAIRWAY, 0.), branch(GREEN, 1.), branch(HOLE, 0.)];

        for _ in 0..500 {
            let out: StepOutcome = pick_next(rng, &branches).unwrap();
            assert_eq!(out.next_state, GREEN);
        }
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![branch(GREEN, 0.), branch(HOLE, 0.)])]
    #[case(vec![branch(GREEN, -0.5), branch(HOLE, 1.)])]
    fn test_pick_next_rejects_bad_weights(#[case] branches: Vec<Branch>) {
        let rng = &mut StdRng::seed_from_u64(1);

        let picked: Result<StepOutcome> = pick_next(rng, &branches);

        assert!(matches!(picked, Err(RlError::InvalidParameter(_))));
    }
}
