//! Defines `Attempt`, one full permutation of the digits tried against the
//! board, and its ranking within the space of all such permutations.

use core::fmt;
use std::ops::Index;

use static_assertions::{assert_eq_size, const_assert_eq};

use super::vertex::Vertex;
use crate::random::*;

/// `FACTORIALS[n]` is n!.
const FACTORIALS: [u32; Vertex::COUNT + 1] =
  [1, 1, 2, 6, 24, 120, 720, 5040, 40320, 362880, 3628800];

/// The number of distinct attempts: 10!.
pub const SPACE_SIZE: u32 = FACTORIALS[Vertex::COUNT];

const_assert_eq!(SPACE_SIZE, 3_628_800);

/// A permutation of the digits 0 through 9, listed in vertex order.  This is
/// the key the search uses to avoid trying the same placement twice.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Attempt([u8; Vertex::COUNT]);

assert_eq_size!(Attempt, [u8; Vertex::COUNT]);

impl Attempt {
  /// The attempt that puts 0 on `a`, 1 on `b`, and so on.
  pub const fn identity() -> Self {
    Self([0, 1, 2, 3, 4, 5, 6, 7, 8, 9])
  }

  /// Ensures that the given array is a permutation of 0..=9, and absorbs it
  /// into a new Attempt (or returns None).
  pub fn new(digits: [u8; Vertex::COUNT]) -> Option<Self> {
    let mut seen = [false; Vertex::COUNT];
    for d in digits {
      let slot = seen.get_mut(d as usize)?;
      if *slot {
        return None;
      }
      *slot = true;
    }
    Some(Self(digits))
  }

  /// Makes a uniformly random attempt.
  pub fn random<R: Rng + ?Sized>(random: &mut R) -> Self {
    let mut digits = Self::identity().0;
    digits.shuffle(random);
    Self(digits)
  }

  /// The digits, in vertex order.
  pub fn digits(&self) -> &[u8; Vertex::COUNT] {
    &self.0
  }

  /// This attempt's position among all attempts in lexicographic order, in
  /// the range 0..SPACE_SIZE.
  pub fn rank(&self) -> u32 {
    let mut unused: u16 = (1 << Vertex::COUNT) - 1;
    let mut rank = 0;
    for (i, &d) in self.0.iter().enumerate() {
      let smaller = (unused & ((1 << d) - 1)).count_ones();
      rank += smaller * FACTORIALS[Vertex::COUNT - 1 - i];
      unused &= !(1 << d);
    }
    rank
  }

  /// The inverse of `rank`: returns None when `rank` is out of range.
  pub fn from_rank(mut rank: u32) -> Option<Self> {
    if rank >= SPACE_SIZE {
      return None;
    }
    let mut unused = Self::identity().0;
    let mut remaining = Vertex::COUNT;
    let mut digits = [0; Vertex::COUNT];
    for (i, slot) in digits.iter_mut().enumerate() {
      let f = FACTORIALS[Vertex::COUNT - 1 - i];
      let pick = (rank / f) as usize;
      rank %= f;
      *slot = unused[pick];
      // Keeps the unused digits sorted and packed at the front.
      unused.copy_within(pick + 1..remaining, pick);
      remaining -= 1;
    }
    Some(Self(digits))
  }
}

impl Index<Vertex> for Attempt {
  type Output = u8;

  fn index(&self, v: Vertex) -> &u8 {
    &self.0[v.index()]
  }
}

impl fmt::Display for Attempt {
  /// Shows the attempt as a tuple of digits.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;
    for (i, d) in self.0.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", d)?;
    }
    write!(f, ")")
  }
}
