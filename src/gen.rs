//! Generates the attempts a search tries: random permutations of the digits
//! that aren't already in the tried set.

use tracing::warn;

use crate::core::*;
use crate::random::*;

pub use crate::core::SPACE_SIZE;

/// Below this many untried permutations, `AttemptGenerator` stops redrawing
/// blindly and draws from a list of what's left.
pub const DEFAULT_SWEEP_THRESHOLD: u32 = 4096;

/// The number of distinct attempts, 10!.
pub const fn space_size() -> u32 {
  SPACE_SIZE
}

/// Tells whether every attempt has been tried.
pub fn is_exhausted(tried: &TriedSet) -> bool {
  tried.len() >= space_size() as usize
}

/// Draws uniformly random permutations until one isn't in `tried`, and
/// returns it.  Returns None when the set is exhausted.
///
/// The expected number of draws is `SPACE_SIZE / untried`, which gets large
/// as the set fills up.  `AttemptGenerator` bounds that cost.
pub fn next_attempt<R: Rng + ?Sized>(tried: &TriedSet, random: &mut R) -> Option<Attempt> {
  if is_exhausted(tried) {
    return None;
  }
  loop {
    let attempt = Attempt::random(random);
    if !tried.contains(&attempt) {
      return Some(attempt);
    }
  }
}

/// Produces novel attempts for a search, owning the random source.
///
/// Draws like `next_attempt` until the untried remainder shrinks to the sweep
/// threshold.  From then on it lists the untried attempts once and draws from
/// that list at random, discarding entries that have since been tried.
pub struct AttemptGenerator<R> {
  random: R,
  sweep_threshold: u32,
  pool: Option<Vec<Attempt>>,
  redraws: u64,
}

impl<R: Rng> AttemptGenerator<R> {
  pub fn new(random: R) -> Self {
    Self {
      random,
      sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
      pool: None,
      redraws: 0,
    }
  }

  /// Sets the untried count at which to switch to a sweep; 0 never sweeps.
  pub fn with_sweep_threshold(mut self, sweep_threshold: u32) -> Self {
    self.sweep_threshold = sweep_threshold;
    self
  }

  /// How many random draws were discarded as already tried.
  pub fn redraws(&self) -> u64 {
    self.redraws
  }

  /// Whether the generator has switched to drawing from a list.
  pub fn is_sweeping(&self) -> bool {
    self.pool.is_some()
  }

  /// Forgets the sweep list.  Call this when attempts have been removed from
  /// the tried set, so they can be drawn again.
  pub fn reset(&mut self) {
    self.pool = None;
  }

  /// Returns an attempt not in `tried`, or None if it's exhausted.  The
  /// attempt is not added to `tried`.
  pub fn next_attempt(&mut self, tried: &TriedSet) -> Option<Attempt> {
    if is_exhausted(tried) {
      return None;
    }
    let untried = SPACE_SIZE as usize - tried.len();
    loop {
      if self.pool.is_none() && untried <= self.sweep_threshold as usize {
        warn!(untried, "few permutations left untried, sweeping the remainder");
        self.pool = Some(tried.untried().collect());
      }
      let Some(pool) = &mut self.pool else {
        break;
      };
      while !pool.is_empty() {
        let i = self.random.random_range(0..pool.len());
        if tried.contains(&pool[i]) {
          pool.swap_remove(i);
        } else {
          return Some(pool[i]);
        }
      }
      // Everything listed has been tried, so the set must have lost entries
      // since the list was made: list again.
      self.pool = None;
    }
    loop {
      let attempt = Attempt::random(&mut self.random);
      if !tried.contains(&attempt) {
        return Some(attempt);
      }
      self.redraws += 1;
    }
  }
}
