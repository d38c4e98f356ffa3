//! Defines the board's six triangles and the rule they impose.

use itertools::Itertools;

use super::asgmt::Assignment;
use super::vertex::Vertex::{self, *};

/// Three vertices whose values are summed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Triangle(pub [Vertex; 3]);

impl Triangle {
  /// Adds up the values on this triangle's vertices.  At most 9 + 8 + 7 for
  /// digits, but any `u8` values are summed without overflow.
  pub fn sum(&self, asgmt: &Assignment) -> u16 {
    self.0.iter().map(|&v| u16::from(asgmt[v])).sum()
  }
}

/// How many triangles the board has.
pub const TRIANGLE_COUNT: usize = 6;

/// The upward-pointing triangles of the board, top to bottom and left to
/// right.
pub const TRIANGLES: [Triangle; TRIANGLE_COUNT] = [
  Triangle([A, B, C]),
  Triangle([B, D, E]),
  Triangle([C, E, F]),
  Triangle([D, G, H]),
  Triangle([E, H, I]),
  Triangle([F, I, L]),
];

/// Computes each triangle's sum, in the order of `TRIANGLES`.
pub fn triangle_sums(asgmt: &Assignment) -> [u16; TRIANGLE_COUNT] {
  TRIANGLES.map(|t| t.sum(asgmt))
}

/// Tells whether every triangle has the same sum.
pub fn is_valid(asgmt: &Assignment) -> bool {
  sums_match(&TRIANGLES, asgmt)
}

/// Tells whether the given triangles all have the same sum.  Vacuously true
/// when there are no triangles.
pub fn sums_match(triangles: &[Triangle], asgmt: &Assignment) -> bool {
  triangles.iter().map(|t| t.sum(asgmt)).all_equal()
}

/// Every solution of the puzzle, in lexicographic order.
#[cfg(test)]
pub(crate) const KNOWN_SOLUTIONS: [[u8; Vertex::COUNT]; 12] = [
  [0, 5, 9, 6, 3, 2, 1, 7, 4, 8],
  [0, 9, 5, 2, 3, 6, 8, 4, 7, 1],
  [1, 5, 7, 2, 6, 0, 8, 3, 4, 9],
  [1, 6, 7, 5, 3, 4, 0, 9, 2, 8],
  [1, 7, 5, 0, 6, 2, 9, 4, 3, 8],
  [1, 7, 6, 4, 3, 5, 8, 2, 9, 0],
  [8, 2, 3, 5, 6, 4, 1, 7, 0, 9],
  [8, 2, 4, 9, 3, 7, 0, 5, 6, 1],
  [8, 3, 2, 4, 6, 5, 9, 0, 7, 1],
  [8, 4, 2, 7, 3, 9, 1, 6, 5, 0],
  [9, 0, 4, 7, 6, 3, 1, 5, 2, 8],
  [9, 4, 0, 3, 6, 7, 8, 2, 5, 1],
];

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::{Attempt, SPACE_SIZE};
  use paste::paste;

  macro_rules! sums_test {
    ($name:ident, $digits:expr, $sums:expr, $valid:expr) => {
      paste! {
        #[test]
        fn [<test_sums_ $name>]() {
          let a = asgmt($digits);
          assert_eq!($sums, triangle_sums(&a));
          assert_eq!($valid, is_valid(&a));
        }
      }
    };
  }

  sums_test!(identity, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9], [3, 8, 11, 16, 19, 22], false);
  sums_test!(first_solution, [0, 5, 9, 6, 3, 2, 1, 7, 4, 8], [14; 6], true);
  sums_test!(last_solution, [9, 4, 0, 3, 6, 7, 8, 2, 5, 1], [13; 6], true);
  sums_test!(one_off, [0, 5, 9, 6, 3, 2, 1, 8, 4, 7], [14, 14, 14, 15, 15, 13], false);

  fn asgmt(digits: [u8; Vertex::COUNT]) -> Assignment {
    let mut answer = Assignment::new();
    for (v, d) in Vertex::all().zip(digits) {
      answer[v] = d;
    }
    answer
  }

  #[test]
  fn test_mismatched_sums() {
    let a = asgmt([3, 1, 5, 4, 0, 8, 9, 2, 7, 6]);
    let sums = triangle_sums(&a);
    assert_eq!(9, sums[0]);
    assert_eq!(5, sums[1]);
    assert!(!is_valid(&a));
  }

  #[test]
  fn test_known_solutions() {
    for digits in KNOWN_SOLUTIONS {
      let a = asgmt(digits);
      let sums = triangle_sums(&a);
      assert!(sums.iter().all(|&s| s == sums[0]), "{:?}", sums);
      assert!(is_valid(&a));
    }
  }

  #[test]
  fn test_single_difference_is_invalid() {
    // Swapping two vertices of a solution that sit in different triangle
    // groups breaks at least one sum.
    let mut a = asgmt(KNOWN_SOLUTIONS[0]);
    let (g, l) = (a[G], a[L]);
    a[G] = l;
    a[L] = g;
    assert!(!is_valid(&a));
  }

  #[test]
  fn test_non_permutations_are_judged_by_sums_alone() {
    assert!(is_valid(&Assignment::new()));
    assert!(!is_valid(&asgmt([1, 0, 0, 0, 0, 0, 0, 0, 0, 0])));
  }

  #[test]
  fn test_large_values_do_not_overflow() {
    let mut a = Assignment::new();
    a[A] = 200;
    a[B] = 100;
    assert_eq!([300, 100, 0, 0, 0, 0], triangle_sums(&a));
    assert!(!is_valid(&a));

    let a = asgmt([255; Vertex::COUNT]);
    assert_eq!([765; TRIANGLE_COUNT], triangle_sums(&a));
    assert!(is_valid(&a));
  }

  #[test]
  fn test_empty_triangle_set() {
    assert!(sums_match(&[], &asgmt([3, 1, 5, 4, 0, 8, 9, 2, 7, 6])));
  }

  #[test]
  fn test_exactly_the_known_solutions_are_valid() {
    let found: Vec<[u8; Vertex::COUNT]> = (0..SPACE_SIZE)
      .filter_map(Attempt::from_rank)
      .map(Assignment::from)
      .filter(is_valid)
      .map(|a| *a.values())
      .collect();
    assert_eq!(KNOWN_SOLUTIONS.to_vec(), found);
  }
}
