//! Defines the core Ai Vertici types.
//!
//! Among these are:
//!
//! - Vertex: the 10 labeled points of the triangular board
//! - Attempt: a permutation of the digits 0 through 9, in vertex order
//! - Assignment: the digits currently written on the board
//! - Triangle: the 6 groups of vertices whose sums must all match
//! - TriedSet: the permutations already explored

mod asgmt;
mod attempt;
mod graph;
mod tried;
mod vertex;

pub use asgmt::*;
pub use attempt::*;
pub use graph::*;
pub use tried::*;
pub use vertex::*;
