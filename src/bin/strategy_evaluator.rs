use clap::Parser;
use blocks_world_solver::engine::{block_names, Configuration};
use blocks_world_solver::solver::{solve, SearchConfig, Strategy};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random instances to evaluate
    #[clap(short, long, default_value_t = 20)]
    instances: usize,

    /// Blocks per instance
    #[clap(short, long, default_value_t = 6)]
    blocks: usize,

    /// Seed of the first instance; later instances use consecutive seeds
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Per-search timeout in seconds
    #[clap(short, long, default_value_t = 10)]
    timeout: u64,
}

// Instances take seed pairs (start, goal); the sequence wraps around at u64::MAX.
fn instance_seed(first: u64, index: usize) -> u64 {
    first.wrapping_add((index as u64).wrapping_mul(2))
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_moves: usize,
    total_iterations: usize,
}

fn main() {
    let args = Args::parse();
    env_logger::init();

    let names = block_names(args.blocks);
    let mut tallies: HashMap<Strategy, Tally> = HashMap::new();

    println!(
        "Evaluating {} strategies on {} random instances of {} blocks...",
        Strategy::ALL.len(),
        args.instances,
        args.blocks
    );

    for index in 0..args.instances {
        // Each instance draws its start and goal from two fresh seeds.
        let seed = instance_seed(args.seed, index);
        let initial = Configuration::random_with_seed(&names, seed);
        let goal = Configuration::random_with_seed(&names, seed.wrapping_add(1));

        println!("\nInstance {} (Seed: {})", index, seed);

        for strategy in Strategy::ALL {
            let config = SearchConfig::builder(strategy)
                .timeout(Duration::from_secs(args.timeout))
                .build();
            let outcome = solve(&initial, &goal, &config);
            let tally = tallies.entry(strategy).or_default();

            match outcome.path() {
                Some(path) => {
                    tally.solved += 1;
                    tally.total_moves += path.len();
                    tally.total_iterations += outcome.iterations();
                    println!(
                        "  Strategy: {:<8}, Moves: {:<5}, Iterations: {}",
                        strategy,
                        path.len(),
                        outcome.iterations()
                    );
                }
                None => println!(
                    "  Strategy: {:<8}, {} after {} iterations",
                    strategy,
                    outcome.label(),
                    outcome.iterations()
                ),
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("{:<10} {:>8} {:>12} {:>16}", "Strategy", "Solved", "Avg moves", "Avg iterations");
    for strategy in Strategy::ALL {
        let Some(tally) = tallies.get(&strategy) else {
            continue;
        };
        if tally.solved == 0 {
            println!("{:<10} {:>8} {:>12} {:>16}", strategy.name(), 0, "-", "-");
            continue;
        }
        println!(
            "{:<10} {:>8} {:>12.2} {:>16.1}",
            strategy.name(),
            tally.solved,
            tally.total_moves as f64 / tally.solved as f64,
            tally.total_iterations as f64 / tally.solved as f64
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_seed_wraps() {
        assert_eq!(instance_seed(0, 3), 6);
        assert_eq!(instance_seed(u64::MAX, 0), u64::MAX);
        assert_eq!(instance_seed(u64::MAX, 1), 1);
        assert_eq!(instance_seed(u64::MAX - 1, 1).wrapping_add(1), 1);
    }
}
