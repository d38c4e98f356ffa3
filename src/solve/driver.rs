//! Collects every solution reachable from a tried set.

use core::fmt;
use std::time::Instant;

use tracing::info;

use super::*;
use crate::elapsed::Elapsed;
use crate::render::render;

/// One discovery, as written to a solutions log.
pub struct LogEntry<'s> {
  /// The 1-based position of the solution within the run.
  pub index: usize,
  pub solution: &'s Solution,
  /// How long the search for this particular solution took.
  pub elapsed: Elapsed,
}

impl fmt::Display for LogEntry<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "Sol. {} (try #{}) : {}",
      self.index, self.solution.tries, self.solution.assignment
    )?;
    writeln!(f, "{}", render(&self.solution.assignment))?;
    writeln!(f, "Exec. time: {}", self.elapsed)
  }
}

/// Receives each solution as soon as it's found.
pub trait SolutionLog {
  fn record(&mut self, entry: &LogEntry) -> Result<(), PersistError>;
}

/// What `solve_all` found.
#[derive(Clone, Debug)]
pub struct RunSummary {
  /// The solutions, in the order found.
  pub solutions: Vec<Attempt>,
  pub total_tries: u64,
  pub elapsed: Elapsed,
}

/// Runs the searcher until its tried set is exhausted, logging each
/// solution found.
///
/// Solutions are held in the tried set while the run lasts, so none is
/// reported twice.  Periodic snapshots leave them out, and at the end they
/// are taken out again before the tried set is saved through the searcher's
/// backup: a later run starting from any of those files reports them anew
/// instead of treating them as dead ends.
pub fn solve_all<R: Rng>(
  searcher: &mut Searcher<R>,
  log: &mut dyn SolutionLog,
) -> Result<RunSummary, PersistError> {
  let start = Instant::now();
  let mut solutions = Vec::new();
  loop {
    let lap = Instant::now();
    let solution = match searcher.run()? {
      Outcome::Found(solution) => solution,
      Outcome::Exhausted => break,
    };
    solutions.push(solution.attempt);
    searcher.hold(solution.attempt);
    let entry = LogEntry {
      index: solutions.len(),
      solution: &solution,
      elapsed: Elapsed::since(lap),
    };
    info!(
      "Solution {} after {} tries, in {}: {}",
      entry.index, solution.tries, entry.elapsed, solution.assignment
    );
    log.record(&entry)?;
  }

  searcher.release();
  searcher.finish()?;

  let summary = RunSummary {
    solutions,
    total_tries: searcher.total_tries,
    elapsed: Elapsed::since(start),
  };
  info!(
    "Found {} solutions in {} tries; total time {}",
    summary.solutions.len(),
    summary.total_tries,
    summary.elapsed
  );
  Ok(summary)
}
