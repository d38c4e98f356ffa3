pub mod core;
pub mod elapsed;
pub mod gen;
pub mod persist;
pub mod random;
pub mod render;
pub mod solve;
