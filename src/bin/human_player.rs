use clap::Parser;
use blocks_world_solver::engine::{block_names, Configuration, Puzzle};
use blocks_world_solver::solver::{solve, SearchConfig, Strategy};
use blocks_world_solver::utils::read_problem;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// BLOCKS problem file; a random instance is generated when omitted
    problem_file: Option<PathBuf>,

    /// Number of blocks in a random instance
    #[clap(short, long, default_value_t = 4)]
    blocks: usize,

    /// Seed for the random instance
    #[clap(short, long, default_value_t = 514514)]
    seed: u64,
}

fn load_puzzle(args: &Args) -> Result<Puzzle, String> {
    match &args.problem_file {
        Some(path) => read_problem(path)
            .map(|problem| Puzzle::new(problem.initial, problem.goal))
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e)),
        None => {
            let names = block_names(args.blocks);
            Ok(Puzzle::new(
                Configuration::random_with_seed(&names, args.seed),
                Configuration::random_with_seed(&names, args.seed.wrapping_add(1)),
            ))
        }
    }
}

fn main() {
    let args = Args::parse();
    env_logger::init();

    let mut puzzle = match load_puzzle(&args) {
        Ok(puzzle) => puzzle,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };
    println!("Welcome to Blocks World!");
    println!("Goal:\n{}", puzzle.goal());

    loop {
        println!("---------------------");
        println!("Steps: {}", puzzle.steps());
        println!("{}", puzzle.configuration());

        if puzzle.is_solved() {
            println!("---------------------");
            println!("🎉 SOLVED in {} moves! 🎉", puzzle.steps());
            for (i, mv) in puzzle.moves_made().enumerate() {
                println!("  {}. {}", i + 1, mv);
            }
            println!("---------------------");
            break;
        }

        print!("Enter your move (block destination), 'g' goal, 'h' hint, 'u' undo, 'q' quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["q"] => {
                println!("Thanks for playing!");
                break;
            }
            ["g"] => println!("Goal:\n{}", puzzle.goal()),
            ["u"] => {
                if puzzle.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (no moves made).");
                }
            }
            ["h"] => {
                let config = SearchConfig::builder(Strategy::Breadth)
                    .timeout(Duration::from_secs(10))
                    .build();
                let outcome = solve(puzzle.configuration(), puzzle.goal(), &config);
                match outcome.path().and_then(|path| path.first()) {
                    Some(next) => println!(
                        "Hint: {} ({} moves left)",
                        next,
                        outcome.path().map_or(0, <[_]>::len)
                    ),
                    None => println!("No hint available ({}).", outcome.label()),
                }
            }
            [object, destination] => match puzzle.process_move(object, destination) {
                Ok(mv) => println!("{}", mv),
                Err(e) => println!("Invalid move: {}.", e),
            },
            _ => println!("Invalid input format. Use 'block destination' (e.g. 'A table'), 'g', 'h', 'u', or 'q'."),
        }
    }
}
