//! Defines `TriedSet`, the memo of attempts already explored.

use core::fmt;

use super::attempt::{Attempt, SPACE_SIZE};

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = (SPACE_SIZE as usize).div_ceil(WORD_BITS);

/// A set of `Attempt`s, stored as one bit per attempt rank.  The whole space
/// fits in well under a megabyte, so membership tests stay cheap even when
/// nearly every permutation has been tried.
#[derive(Clone, Eq, PartialEq)]
pub struct TriedSet {
  words: Box<[u64]>,
  len: usize,
}

impl TriedSet {
  /// Makes a new empty TriedSet.
  pub fn new() -> Self {
    Self {
      words: vec![0; WORDS].into_boxed_slice(),
      len: 0,
    }
  }

  /// Makes a new TriedSet containing every attempt.
  pub fn full() -> Self {
    let mut answer = Self::new();
    for rank in 0..SPACE_SIZE {
      answer.insert_rank(rank);
    }
    answer
  }

  /// How many attempts are in the set.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn contains(&self, attempt: &Attempt) -> bool {
    let (word, bit) = Self::locate(attempt.rank());
    self.words[word] & bit != 0
  }

  /// Adds the attempt; returns true if it wasn't already present.
  pub fn insert(&mut self, attempt: Attempt) -> bool {
    self.insert_rank(attempt.rank())
  }

  /// Removes the attempt; returns true if it was present.
  pub fn remove(&mut self, attempt: &Attempt) -> bool {
    let (word, bit) = Self::locate(attempt.rank());
    let present = self.words[word] & bit != 0;
    if present {
      self.words[word] &= !bit;
      self.len -= 1;
    }
    present
  }

  /// Iterates the ranks of the attempts in the set, in ascending order.
  pub fn ranks(&self) -> impl Iterator<Item = u32> + '_ {
    self
      .words
      .iter()
      .enumerate()
      .flat_map(|(i, &word)| bit_indices(word, i))
  }

  /// Iterates the attempts in the set, in lexicographic order.
  pub fn iter(&self) -> impl Iterator<Item = Attempt> + '_ {
    self.ranks().filter_map(Attempt::from_rank)
  }

  /// Iterates the attempts that are not in the set, in lexicographic order.
  pub fn untried(&self) -> impl Iterator<Item = Attempt> + '_ {
    self
      .words
      .iter()
      .enumerate()
      .flat_map(|(i, &word)| bit_indices(!word, i))
      .filter_map(Attempt::from_rank)
  }

  fn insert_rank(&mut self, rank: u32) -> bool {
    let (word, bit) = Self::locate(rank);
    let absent = self.words[word] & bit == 0;
    if absent {
      self.words[word] |= bit;
      self.len += 1;
    }
    absent
  }

  fn locate(rank: u32) -> (usize, u64) {
    let rank = rank as usize;
    (rank / WORD_BITS, 1 << (rank % WORD_BITS))
  }
}

/// Iterates the positions of the set bits in a word, offset by the word's
/// place in the set.  Positions past the end of the space are dropped by
/// `Attempt::from_rank` downstream.
fn bit_indices(mut word: u64, word_index: usize) -> impl Iterator<Item = u32> {
  let base = (word_index * WORD_BITS) as u32;
  std::iter::from_fn(move || {
    if word == 0 {
      return None;
    }
    let bit = word.trailing_zeros();
    word &= word - 1;
    Some(base + bit)
  })
}

impl Default for TriedSet {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for TriedSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TriedSet({} of {})", self.len, SPACE_SIZE)
  }
}

impl Extend<Attempt> for TriedSet {
  fn extend<T: IntoIterator<Item = Attempt>>(&mut self, iter: T) {
    for attempt in iter {
      self.insert(attempt);
    }
  }
}

impl FromIterator<Attempt> for TriedSet {
  fn from_iter<T: IntoIterator<Item = Attempt>>(iter: T) -> Self {
    let mut answer = Self::new();
    answer.extend(iter);
    answer
  }
}
