//! Defines `Assignment`, the digits currently written on the board's
//! vertices.

use core::fmt;
use std::ops::{Index, IndexMut};

use itertools::Itertools;

use super::attempt::Attempt;
use super::vertex::Vertex;

/// Maps each vertex to the digit written on it.  A search keeps exactly one
/// of these live and overwrites it with each attempt in turn.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Assignment([u8; Vertex::COUNT]);

impl Assignment {
  /// Makes a new assignment with every vertex set to 0.
  pub fn new() -> Self {
    Self::default()
  }

  /// Writes the attempt's digits onto the vertices, in vertex order.
  pub fn apply(&mut self, attempt: &Attempt) {
    self.0 = *attempt.digits();
  }

  /// Captures the current values as an Attempt, if they form a permutation
  /// of the digits.
  pub fn snapshot(&self) -> Option<Attempt> {
    Attempt::new(self.0)
  }

  /// The values, in vertex order.
  pub fn values(&self) -> &[u8; Vertex::COUNT] {
    &self.0
  }

  /// Iterates the vertices paired with their values.
  pub fn iter(&self) -> impl Iterator<Item = (Vertex, u8)> + '_ {
    Vertex::all().zip(self.0.iter().copied())
  }
}

impl From<Attempt> for Assignment {
  fn from(attempt: Attempt) -> Self {
    Self(*attempt.digits())
  }
}

impl Index<Vertex> for Assignment {
  type Output = u8;

  fn index(&self, v: Vertex) -> &u8 {
    &self.0[v.index()]
  }
}

impl IndexMut<Vertex> for Assignment {
  fn index_mut(&mut self, v: Vertex) -> &mut u8 {
    &mut self.0[v.index()]
  }
}

impl fmt::Display for Assignment {
  /// Shows the assignment as a mapping, `{a: 3, b: 1, ...}`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{{{}}}",
      self.iter().map(|(v, d)| format!("{}: {}", v, d)).join(", ")
    )
  }
}
