use std::num::NonZeroU64;
use std::path::PathBuf;

use ai_vertici::{
  gen::DEFAULT_SWEEP_THRESHOLD,
  persist::{self, FileBackup, SaveMode, SolutionsFile},
  random::*,
  render::render,
  solve::{driver::solve_all, Outcome, SolveConfig, Searcher},
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Searches for ways to place the digits 0-9 on the ten vertices of the
/// triangular board so that all six triangles have the same sum.
#[derive(Parser, Debug)]
#[command(name = "ai-vertici", version)]
struct Args {
  /// Finds every solution instead of stopping at the first one.
  #[arg(short, long)]
  all: bool,

  /// Where the set of tried permutations is loaded from and saved to.
  #[arg(short, long, default_value = "tries.json")]
  tried: PathBuf,

  /// Saves the tried set every N tries; 0 saves only at the end.
  #[arg(short, long, default_value_t = 0)]
  backup_every: u64,

  /// Keeps every periodic backup, numbering them, instead of overwriting.
  #[arg(long)]
  keep_backups: bool,

  /// The text file that solutions are appended to, with --all.
  #[arg(short, long, default_value = "sols.txt")]
  log: PathBuf,

  /// Seeds the random search, making it repeatable.
  #[arg(long)]
  seed: Option<String>,

  /// Ignores any saved tried set and starts from scratch.
  #[arg(long)]
  fresh: bool,

  /// Below this many untried permutations, draws from a list of them
  /// rather than redrawing at random; 0 never does.
  #[arg(long, default_value_t = DEFAULT_SWEEP_THRESHOLD)]
  sweep_threshold: u32,

  /// Logs every try.
  #[arg(short, long)]
  verbose: bool,
}

impl Args {
  fn solve_config(&self) -> SolveConfig {
    SolveConfig {
      backup_every: NonZeroU64::new(self.backup_every),
      verbose: self.verbose,
      sweep_threshold: self.sweep_threshold,
    }
  }

  fn save_mode(&self) -> SaveMode {
    if self.keep_backups {
      SaveMode::Numbered
    } else {
      SaveMode::Overwrite
    }
  }
}

fn main() -> Result<()> {
  let args = Args::parse();
  init_tracing(args.verbose);

  let tried = if args.fresh {
    None
  } else {
    let tried = persist::load_or_default(&args.tried)
      .with_context(|| format!("failed to load tried set from {}", args.tried.display()))?;
    Some(tried)
  };
  match &args.seed {
    Some(seed) => run(&args, tried, new_random(seed)),
    None => run(&args, tried, new_unseeded()),
  }
}

fn run<R: Rng>(args: &Args, tried: Option<ai_vertici::core::TriedSet>, random: R) -> Result<()> {
  let mut backup = FileBackup::new(&args.tried, args.save_mode());
  let mut searcher = Searcher::new(tried, args.solve_config(), random, &mut backup);

  if args.all {
    let mut log = SolutionsFile::new(&args.log).echo(true);
    let summary = solve_all(&mut searcher, &mut log).context("search failed")?;
    println!(
      "Found {} solution(s) in {} tries. Total time: {}",
      summary.solutions.len(),
      summary.total_tries,
      summary.elapsed
    );
    return Ok(());
  }

  match searcher.run().context("search failed")? {
    Outcome::Found(solution) => println!("{}", render(&solution.assignment)),
    Outcome::Exhausted => println!("No solution found"),
  }
  searcher
    .finish()
    .with_context(|| format!("failed to save tried set to {}", args.tried.display()))
}

/// Logs to stderr, at the level in `RUST_LOG` if set.
fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}
