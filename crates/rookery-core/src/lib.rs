//! Bitboard-based chess board representation: position state, FEN codec,
//! and precomputed knight/king jump tables.
//!
//! This crate is the substrate for a chess program. It deliberately stops
//! short of move generation and game rules: it models *what is on the
//! board*, not what is legal to do with it.

mod bitboard;
mod error;
mod fen;
mod jumps;
mod piece;
mod position;
mod square;

pub use bitboard::Bitboard;
pub use error::{NotationError, PositionError};
pub use fen::STARTING_FEN;
pub use jumps::{king_jumps, knight_jumps};
pub use piece::{Color, Piece, PieceKind};
pub use position::{Diagram, Flags, Position};
pub use square::Square;
