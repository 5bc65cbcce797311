use clap::Parser;
use blocks_world_solver::solver::{solve, SearchConfig, SearchOutcome, Strategy};
use blocks_world_solver::utils::{read_problem, write_solution, DEFAULT_SOLUTION_FILE};
use env_logger::TimestampPrecision;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm to use
    #[clap(value_enum)]
    strategy: Strategy,

    /// Path to the BLOCKS problem file
    problem_file: PathBuf,

    /// Where to write the numbered move list
    output_file: Option<PathBuf>,

    /// Give up after this many seconds
    #[clap(short, long, default_value_t = 60)]
    timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let problem = match read_problem(&args.problem_file) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.problem_file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let config = SearchConfig::builder(args.strategy)
        .timeout(Duration::from_secs(args.timeout))
        .build();

    let started = Instant::now();
    let outcome = solve(&problem.initial, &problem.goal, &config);
    let elapsed = started.elapsed();

    let names: Vec<&str> = problem.blocks.iter().map(|block| block.name()).collect();
    println!("| Problem name:          {}", args.problem_file.display());
    println!("| Algorithm used:        {}", args.strategy);
    println!("| Number of blocks:      {}", problem.blocks.len());
    println!("| Blocks:                {}", names.join(" "));

    match outcome {
        SearchOutcome::Solved { path, stats } => {
            println!("| Solved in:             {:.6}s", elapsed.as_secs_f64());
            println!("| Algorithm iterations:  {}", stats.iterations);
            println!("| Moves:                 {}", path.len());
            println!("| Solution:              Found!");

            let output = args
                .output_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOLUTION_FILE));
            if let Err(e) = write_solution(&output, &path) {
                eprintln!("Failed to write {}: {}", output.display(), e);
                return ExitCode::FAILURE;
            }
            println!("| Written to:            {}", output.display());
        }
        SearchOutcome::TimedOut { stats } => {
            println!("| Algorithm iterations:  {}", stats.iterations);
            println!("| Solution:              NOT found, search timed out.");
        }
        SearchOutcome::Exhausted { stats } => {
            println!("| Algorithm iterations:  {}", stats.iterations);
            println!("| Solution:              NOT found, search space exhausted.");
        }
    }

    ExitCode::SUCCESS
}
