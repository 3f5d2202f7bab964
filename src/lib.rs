//! # treasure_engine
//!
//! The core engine for the treasure map game.
//! Parses a textual map description, runs the scripted exploration of its
//! adventurers and serializes the final world back into the same format.

pub mod game;
pub use game::Game;

mod entities;
mod error;
mod map;
mod parser;
mod replay;

pub use entities::{Adventurer, Coordinate, Dimension, Mountain, Movement, Orientation, Treasure};
pub use error::MapError;
pub use map::{Advance, Cell, Map};
pub use parser::parse;
