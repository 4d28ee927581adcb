//! FEN parsing and serialization for [`Position`].
//!
//! A record has six whitespace-separated fields: piece placement, side to
//! move, castling availability, en-passant target, half-move clock, and
//! full-move number. Parsing is strict and all-or-nothing; serialization
//! emits the unique canonical form, so parse-then-serialize round-trips.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::NotationError;
use crate::piece::{Color, PieceKind};
use crate::position::{Flags, Position};
use crate::square::Square;

/// The FEN record for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse the castling availability field ("KQkq", "Kq", "-", ...).
fn parse_castling(field: &str) -> Result<Flags, NotationError> {
    if field == "-" {
        return Ok(Flags::NONE);
    }

    let mut rights = Flags::NONE;
    for c in field.chars() {
        let flag = match c {
            'K' => Flags::WHITE_KING_SIDE,
            'Q' => Flags::WHITE_QUEEN_SIDE,
            'k' => Flags::BLACK_KING_SIDE,
            'q' => Flags::BLACK_QUEEN_SIDE,
            _ => return Err(NotationError::InvalidCastlingChar { character: c }),
        };
        rights = rights | flag;
    }
    Ok(rights)
}

/// Serialize castling rights in the fixed K, Q, k, q order, or "-".
fn castling_field(flags: Flags) -> String {
    let letters = [
        (Flags::WHITE_KING_SIDE, 'K'),
        (Flags::WHITE_QUEEN_SIDE, 'Q'),
        (Flags::BLACK_KING_SIDE, 'k'),
        (Flags::BLACK_QUEEN_SIDE, 'q'),
    ];

    let field: String = letters
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, letter)| *letter)
        .collect();
    if field.is_empty() { "-".to_string() } else { field }
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(record: &str) -> Result<Position, NotationError> {
        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(NotationError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let mut pos = Position::empty();

        // Field 1: piece placement, rank 8 down to rank 1.
        let segments: Vec<&str> = fields[0].split('/').collect();
        if segments.len() != 8 {
            return Err(NotationError::WrongRankCount {
                found: segments.len(),
            });
        }

        for (i, segment) in segments.iter().enumerate() {
            let rank = 8 - i as u8;
            // 1-based file cursor; a letter places and advances by one, a
            // digit skips that many empty files. Bounded at 9 after every
            // advance so a runaway digit run errors instead of wrapping
            // the cursor.
            let mut file = 1u8;
            for c in segment.chars() {
                match c {
                    '1'..='8' => {
                        file += c as u8 - b'0';
                        if file > 9 {
                            return Err(NotationError::BadRankLength {
                                rank,
                                squares: file - 1,
                            });
                        }
                    }
                    _ if PieceKind::from_fen_char(c).is_some() => {
                        if file > 8 {
                            return Err(NotationError::BadRankLength { rank, squares: file });
                        }
                        pos.place_piece(c, rank, file);
                        file += 1;
                    }
                    _ => return Err(NotationError::InvalidPlacementChar { character: c }),
                }
            }
            if file != 9 {
                return Err(NotationError::BadRankLength {
                    rank,
                    squares: file - 1,
                });
            }
        }

        // Field 2: side to move.
        match fields[1] {
            "w" => pos.set_side_to_move(Color::White),
            "b" => pos.set_side_to_move(Color::Black),
            other => {
                return Err(NotationError::InvalidSideToMove {
                    found: other.to_string(),
                });
            }
        }

        // Field 3: castling availability.
        pos.set_flag(parse_castling(fields[2])?);

        // Field 4: en-passant target.
        if fields[3] != "-" {
            let sq = Square::from_algebraic(fields[3]).ok_or_else(|| {
                NotationError::InvalidEnPassant {
                    found: fields[3].to_string(),
                }
            })?;
            pos.set_en_passant(Some(sq));
        }

        // Fields 5 and 6: move counters.
        let halfmove = fields[4]
            .parse::<u16>()
            .map_err(|_| NotationError::InvalidCounter {
                field: "half-move clock",
                found: fields[4].to_string(),
            })?;
        pos.set_halfmove_clock(halfmove);

        let fullmove = fields[5]
            .parse::<u16>()
            .map_err(|_| NotationError::InvalidCounter {
                field: "full-move number",
                found: fields[5].to_string(),
            })?;
        pos.set_fullmove_number(fullmove);

        pos.validate()?;
        trace!(side = %pos.side_to_move(), fullmove = pos.fullmove_number(), "parsed position record");
        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Piece placement with run-length-encoded empty files.
        for rank in (0..8u8).rev() {
            let mut empties = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::from_coords(rank, file)) {
                    Some(piece) => {
                        if empties > 0 {
                            write!(f, "{empties}")?;
                            empties = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                write!(f, "{empties}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {}", self.side_to_move())?;
        write!(f, " {}", castling_field(self.flags()))?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
