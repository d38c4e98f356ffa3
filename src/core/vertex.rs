//! Defines the Vertex type, which identifies the labeled points of the board.

use core::fmt;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Identifies one of the 10 vertices of the triangular board.
///
/// The declaration order matters: it is the order in which an `Attempt`'s
/// digits are written onto the board, and the order of a rendered mapping.
#[derive(Clone, Copy, Debug, Eq, FromPrimitive, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Vertex {
  A = 0,
  B,
  C,
  D,
  E,
  F,
  G,
  H,
  I,
  L,
}

impl Vertex {
  /// How many distinct vertices there are.
  pub const COUNT: usize = 10;

  /// Makes an optional Vertex from an index, present when it's in the range
  /// 0..10 and absent otherwise.
  pub fn from_index(i: usize) -> Option<Self> {
    Self::from_usize(i)
  }

  /// Returns this vertex's position in the fixed vertex order.
  pub const fn index(self) -> usize {
    self as usize
  }

  /// Iterates all vertices, in order.
  pub fn all() -> impl Iterator<Item = Self> {
    (0..Self::COUNT).filter_map(Self::from_index)
  }

  /// The lower-case letter this vertex is known by.  There is no `j` or `k`:
  /// the labels skip from `i` to `l`.
  pub const fn label(self) -> char {
    match self {
      Vertex::A => 'a',
      Vertex::B => 'b',
      Vertex::C => 'c',
      Vertex::D => 'd',
      Vertex::E => 'e',
      Vertex::F => 'f',
      Vertex::G => 'g',
      Vertex::H => 'h',
      Vertex::I => 'i',
      Vertex::L => 'l',
    }
  }

  /// Finds the vertex with the given label.
  pub fn from_label(label: char) -> Option<Self> {
    Self::all().find(|v| v.label() == label)
  }
}

impl fmt::Display for Vertex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}
