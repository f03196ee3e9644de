use rand::prelude::*;
use rl_agent::{logging, Agent, Continous, Result};
use rl_tabular::envs::simple_golf::SimpleGolf;
use rl_tabular::{DiscreteMemory, DiscretePolicy, Mdp, SolverConfig};
use tracing::info;

const EPISODES: usize = 60;
// Random play first, so every move has been tried before acting greedily.
const WARMUP_EPISODES: usize = 20;
const MAX_STEPS: usize = 100;

fn main() -> Result<()> {
    logging::init("info");

    let config = match std::env::args().nth(1) {
        Some(path) => SolverConfig::from_path(path)?,
        None => SolverConfig::default(),
    };
    info!(?config, "solver config");

    let golf = SimpleGolf::new()?;
    let policy = DiscretePolicy::new(golf.n_s(), golf.n_a())?.with_config(config)?;
    let mut agent = Agent::new(DiscreteMemory::new(), policy);
    let rng = &mut StdRng::from_entropy();

    for episode in 0..EPISODES {
        let explore = episode < WARMUP_EPISODES;
        let mut s = golf.reset();
        let mut total_reward: Continous = 0.;
        let mut steps = 0;
        for _ in 0..MAX_STEPS {
            let a = if explore {
                rng.gen_range(0..golf.n_a())
            } else {
                agent.step(&s)?
            };
            let out = golf.step(rng, s, a)?;
            agent.observe(s, a, out.next_state, out.reward);
            total_reward += out.reward;
            steps += 1;
            s = out.next_state;
            if out.done {
                break;
            }
        }

        agent.update()?;
        info!(episode, explore, steps, total_reward, "episode finished");
    }

    let policy = agent.policy();
    println!("Q-table:\n{:?}", policy.q());
    let greedy = (0..golf.n_s())
        .map(|s| policy.greedy_actions(s))
        .collect::<Result<Vec<_>>>()?;
    println!("Greedy actions per state: {greedy:?}");
    println!("Unobserved pairs: {:?}", policy.last_unobserved());

    Ok(())
}
