//! Core game types and representations
//!
//! This module contains the fundamental building blocks:
//! - Quarter-turn coordinate rotation between player views
//! - Board, cell and piece representation
//! - Player sequence (turn order, teams, view rotations)
//! - Move encoding and classified move lists
//! - Board description file formats

pub mod board;
pub mod layout;
pub mod moves;
pub mod rotation;
pub mod sequence;

pub use board::{Board, Cell, Color, Piece};
pub use layout::{Layout, LayoutError};
pub use moves::{Move, MoveList, MoveParseError, Square};
pub use rotation::rotate;
pub use sequence::{PlayerSequence, Seat, SequenceError};
pub use shakmaty::Role;
