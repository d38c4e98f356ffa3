//! Defines the Ai Vertici solver loop.

use std::num::NonZeroU64;

use tracing::{debug, info};

use crate::core::*;
use crate::gen::*;
use crate::persist::PersistError;
use crate::random::*;

pub mod driver;

/// Settings for a search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolveConfig {
  /// Saves the tried set after this many tries; never when None.
  pub backup_every: Option<NonZeroU64>,

  /// Logs every try, with the assignment and how much of the space has been
  /// seen.
  pub verbose: bool,

  /// See `AttemptGenerator::with_sweep_threshold`.
  pub sweep_threshold: u32,
}

impl Default for SolveConfig {
  fn default() -> Self {
    Self {
      backup_every: None,
      verbose: false,
      sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
    }
  }
}

/// Where a search snapshots its tried set.
pub trait Backup {
  /// Saves a periodic snapshot, taken while the search is running.
  fn save(&mut self, tried: &TriedSet) -> Result<(), PersistError>;

  /// Saves the tried set at the end of a run.
  fn finish(&mut self, tried: &TriedSet) -> Result<(), PersistError> {
    self.save(tried)
  }
}

/// A `Backup` that discards its snapshots.
pub struct NoBackup;

impl Backup for NoBackup {
  fn save(&mut self, _tried: &TriedSet) -> Result<(), PersistError> {
    Ok(())
  }
}

/// A valid assignment, as found by `Searcher::run`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Solution {
  pub attempt: Attempt,
  pub assignment: Assignment,

  /// The searcher's total try count when it found this solution, counting
  /// the winning try.
  pub tries: u64,
}

/// How a call to `Searcher::run` ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
  Found(Solution),
  /// Every attempt not already in the tried set fails.
  Exhausted,
}

impl Outcome {
  pub fn solution(&self) -> Option<&Solution> {
    match self {
      Outcome::Found(solution) => Some(solution),
      Outcome::Exhausted => None,
    }
  }
}

/// Runs the random search, one solution at a time.
pub struct Searcher<'a, R: Rng> {
  /// The board, overwritten with each attempt.
  pub assignment: Assignment,
  pub tried: TriedSet,
  pub total_tries: u64,
  pub backups: u64,
  since_backup: u64,
  /// Solutions kept in `tried` for the rest of a run, but left out of
  /// snapshots.
  held: Vec<Attempt>,
  config: SolveConfig,
  generator: AttemptGenerator<R>,
  backup: &'a mut dyn Backup,
}

impl<'a, R: Rng> Searcher<'a, R> {
  /// Makes a searcher that picks up from `tried`, or from scratch when
  /// that's None.
  pub fn new(
    tried: Option<TriedSet>,
    config: SolveConfig,
    random: R,
    backup: &'a mut dyn Backup,
  ) -> Self {
    Searcher {
      assignment: Assignment::new(),
      tried: tried.unwrap_or_default(),
      total_tries: 0,
      backups: 0,
      since_backup: 0,
      held: Vec::new(),
      config,
      generator: AttemptGenerator::new(random).with_sweep_threshold(config.sweep_threshold),
      backup,
    }
  }

  /// Searches for the next valid assignment not in the tried set.  Every
  /// failed attempt is added to the tried set; the winning one is not, so
  /// running again without recording it may find it again.
  ///
  /// Errors only when a periodic backup fails.
  pub fn run(&mut self) -> Result<Outcome, PersistError> {
    while let Some(attempt) = self.generator.next_attempt(&self.tried) {
      self.total_tries += 1;
      self.assignment.apply(&attempt);
      if self.config.verbose {
        debug!(
          "Try #{} - {:.3}% of the space: {}",
          self.tried.len(),
          explored_percent(&self.tried),
          self.assignment
        );
      }
      if let Some(every) = self.config.backup_every {
        self.since_backup += 1;
        if self.since_backup >= every.get() {
          self.checkpoint()?;
        }
      }
      if is_valid(&self.assignment) {
        return Ok(Outcome::Found(Solution {
          attempt,
          assignment: self.assignment,
          tries: self.total_tries,
        }));
      }
      self.tried.insert(attempt);
    }
    Ok(Outcome::Exhausted)
  }

  /// Saves a snapshot of the tried set now, without any held solutions, and
  /// restarts the backup count.
  pub fn checkpoint(&mut self) -> Result<(), PersistError> {
    let saved = if self.held.is_empty() {
      self.backup.save(&self.tried)?;
      self.tried.len()
    } else {
      let mut snapshot = self.tried.clone();
      for attempt in &self.held {
        snapshot.remove(attempt);
      }
      self.backup.save(&snapshot)?;
      snapshot.len()
    };
    self.backups += 1;
    self.since_backup = 0;
    info!(
      tried = saved,
      "backed up tried set ({:.3}% of the space)",
      explored_percent(&self.tried)
    );
    Ok(())
  }

  /// Saves the tried set as the run's final state.
  pub fn finish(&mut self) -> Result<(), PersistError> {
    self.backup.finish(&self.tried)?;
    info!(tried = self.tried.len(), "saved final tried set");
    Ok(())
  }

  /// Marks a solution as tried for the rest of the run, so `run` won't find
  /// it again.  Snapshots leave it out until `release` puts it back in play.
  pub fn hold(&mut self, attempt: Attempt) {
    if self.tried.insert(attempt) {
      self.held.push(attempt);
    }
  }

  /// Takes every held solution out of the tried set again.
  pub fn release(&mut self) {
    for attempt in std::mem::take(&mut self.held) {
      self.forget(&attempt);
    }
  }

  /// Removes an attempt from the tried set, making it eligible again.
  pub fn forget(&mut self, attempt: &Attempt) -> bool {
    let removed = self.tried.remove(attempt);
    if removed {
      self.generator.reset();
    }
    removed
  }

  /// How many random draws were wasted on attempts already tried.
  pub fn redraws(&self) -> u64 {
    self.generator.redraws()
  }
}

/// The share of the space the tried set covers, as a percentage.
pub fn explored_percent(tried: &TriedSet) -> f64 {
  100.0 * tried.len() as f64 / space_size() as f64
}
