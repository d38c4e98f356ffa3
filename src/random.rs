//! Random number sources for the search.

pub use rand::{seq::SliceRandom, Rng, SeedableRng};
pub use rand_pcg::Pcg64 as Random;
use rand_seeder::Seeder;

/// Makes a random generator whose whole sequence is determined by the given
/// string.
pub fn new_random(seed: &str) -> Random {
  Seeder::from(seed).into_rng()
}

/// Makes a random generator seeded from the operating system.
pub fn new_unseeded() -> Random {
  Random::from_os_rng()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_seeded_is_repeatable() {
    let mut r1 = new_random("vertici");
    let mut r2 = new_random("vertici");
    let mut r3 = new_random("triangoli");
    let a: Vec<u64> = (0..8).map(|_| r1.random()).collect();
    let b: Vec<u64> = (0..8).map(|_| r2.random()).collect();
    let c: Vec<u64> = (0..8).map(|_| r3.random()).collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
  }
}
