use clap::Parser;
use rummikub_scorer::timing::Stopwatch;
use rummikub_scorer::{ScoringRule, SolverConfig, Tile, solve};
use std::process::ExitCode;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_COMMIT"),
    ", ",
    env!("BUILD_PROFILE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "rummikub-scorer", version = VERSION)]
#[command(about = "Check whether Rummikub tiles can all be laid out in runs and groups", long_about = None)]
#[command(after_help = "Tiles use compact notation: r13 (red 13), b1 (blue), y7 (yellow), k9 (black), w (joker)")]
struct Args {
    /// Tiles in hand
    #[arg(value_name = "HAND", value_parser = Tile::from_string)]
    hand: Vec<Tile>,

    /// Tiles already on the table
    #[arg(long, value_name = "TILE", num_args = 1.., value_parser = Tile::from_string)]
    table: Vec<Tile>,

    /// Score with the incremental rule instead of the strict one
    #[arg(long)]
    incremental: bool,

    /// Fraction of the total face value the best score must reach (default 0.8)
    #[arg(long)]
    threshold: Option<f64>,
}

impl Args {
    fn config(&self) -> SolverConfig {
        let mut config = SolverConfig::default();
        if self.incremental {
            config.scoring = ScoringRule::Incremental;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let watch = Stopwatch::start();
    let result = match solve(&args.hand, &args.table, &args.config()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    println!("Solvable:   {}", if result.solvable { "yes" } else { "no" });
    println!("Best score: {} / {}", result.best_score, result.total_face_value);
    println!("{}", result.explanation);
    if !result.suggestions.is_empty() {
        println!("\nSuggested moves:");
        for suggestion in &result.suggestions {
            println!("  {}", suggestion);
        }
    }
    println!(
        "\n{} states explored in {:.2} ms",
        result.states_explored,
        watch.elapsed_ms()
    );

    if result.solvable {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
