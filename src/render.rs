//! Draws the board as text.

use once_cell::sync::Lazy;

use crate::core::*;

/// The board, with each vertex shown by its label.  Every label appears
/// exactly once, and no other letter in the drawing is a label.
pub const BOARD: &str = r"
            a
           / \
          / x \
         b --- c
        / \   / \
       / x \ / x \
      d --- e --- f
     / \   / \   / \
    / x \ / x \ / x \
   g --- h --- i --- l
";

/// The byte offset of each vertex's label within `BOARD`.
static SLOTS: Lazy<[usize; Vertex::COUNT]> = Lazy::new(|| {
  let mut slots = [0; Vertex::COUNT];
  for v in Vertex::all() {
    slots[v.index()] = BOARD
      .find(v.label())
      .unwrap_or_else(|| panic!("board has no `{}`", v));
  }
  slots
});

/// Draws the board with each label replaced by the vertex's digit.
pub fn render(asgmt: &Assignment) -> String {
  let mut bytes = BOARD.as_bytes().to_vec();
  for (v, d) in asgmt.iter() {
    bytes[SLOTS[v.index()]] = digit_char(d);
  }
  unsafe {
    // Safe because the board is ASCII and only ASCII bytes were written.
    String::from_utf8_unchecked(bytes)
  }
}

fn digit_char(d: u8) -> u8 {
  if d < 10 {
    b'0' + d
  } else {
    b'?'
  }
}
