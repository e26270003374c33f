//! Push-box puzzle engine.
//!
//! A player pushes boxes onto goal tiles on a fixed rectangular board. The
//! [`core`] module holds the board, the collision rules between entities and
//! the recursive move resolution; the other modules are the level parser,
//! renderers, input sources and the turn loop that connects them.

pub mod console_interface;
pub mod core;
pub mod game;
pub mod input;
pub mod level;
pub mod models;
pub mod render;

#[cfg(test)]
mod test;
