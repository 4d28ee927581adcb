//! The position model: occupancy bitboards, packed game flags, and the
//! en-passant / move-counter state that completes a chess position.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::error::PositionError;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Boolean game state packed into a single word: the side to move and the
/// four castling rights.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    /// No flags set.
    pub const NONE: Flags = Flags(0);

    /// White moves next (cleared means Black moves next).
    pub const WHITE_TO_MOVE: Flags = Flags(1);
    /// White may still castle king-side.
    pub const WHITE_KING_SIDE: Flags = Flags(1 << 1);
    /// White may still castle queen-side.
    pub const WHITE_QUEEN_SIDE: Flags = Flags(1 << 2);
    /// Black may still castle king-side.
    pub const BLACK_KING_SIDE: Flags = Flags(1 << 3);
    /// Black may still castle queen-side.
    pub const BLACK_QUEEN_SIDE: Flags = Flags(1 << 4);

    /// All four castling rights.
    pub const ALL_CASTLING: Flags = Flags(0b11110);

    /// Return `true` if every flag in `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Flags) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Return `true` if no flags are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Flags {
    type Output = Flags;
    #[inline]
    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Flags::WHITE_TO_MOVE, "WHITE_TO_MOVE"),
            (Flags::WHITE_KING_SIDE, "WHITE_KING_SIDE"),
            (Flags::WHITE_QUEEN_SIDE, "WHITE_QUEEN_SIDE"),
            (Flags::BLACK_KING_SIDE, "BLACK_KING_SIDE"),
            (Flags::BLACK_QUEEN_SIDE, "BLACK_QUEEN_SIDE"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Flags({})", set.join(" | "))
    }
}

/// A chess position: six per-kind and two per-color occupancy bitboards,
/// packed flags, the en-passant target, and the two move counters.
///
/// Constructed atomically from a FEN record (or via
/// [`starting_position`](Position::starting_position)); afterwards only the
/// flag and counter setters mutate it. Single-owner mutable state: no
/// internal synchronization is provided.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// One bitboard per piece kind, both colors merged.
    pieces: [Bitboard; PieceKind::COUNT],
    /// One bitboard per color, all kinds merged.
    sides: [Bitboard; Color::COUNT],
    flags: Flags,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Position {
    /// An empty board, White to move, no castling rights, counters at 0/1.
    pub(crate) fn empty() -> Position {
        Position {
            pieces: [Bitboard::EMPTY; PieceKind::COUNT],
            sides: [Bitboard::EMPTY; Color::COUNT],
            flags: Flags::WHITE_TO_MOVE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        const BACK_RANK: [char; 8] = ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r'];

        let mut pos = Position::empty();
        for file in 1..=8u8 {
            let kind = BACK_RANK[file as usize - 1];
            pos.place_piece(kind.to_ascii_uppercase(), 1, file);
            pos.place_piece('P', 2, file);
            pos.place_piece('p', 7, file);
            pos.place_piece(kind, 8, file);
        }
        pos.set_flag(Flags::ALL_CASTLING);
        pos
    }

    // --- Flag operations ---

    /// Set every flag in `flag`.
    #[inline]
    pub fn set_flag(&mut self, flag: Flags) {
        self.flags.0 |= flag.0;
    }

    /// Clear every flag in `flag`.
    #[inline]
    pub fn clear_flag(&mut self, flag: Flags) {
        self.flags.0 &= !flag.0;
    }

    /// Toggle every flag in `flag`.
    #[inline]
    pub fn toggle_flag(&mut self, flag: Flags) {
        self.flags.0 ^= flag.0;
    }

    /// Return `true` if every flag in `flag` is set.
    #[inline]
    pub fn has_flag(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }

    /// Return the packed flag word.
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        if self.flags.contains(Flags::WHITE_TO_MOVE) {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Set the side to move.
    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        match color {
            Color::White => self.set_flag(Flags::WHITE_TO_MOVE),
            Color::Black => self.clear_flag(Flags::WHITE_TO_MOVE),
        }
    }

    // --- Placement ---

    /// Put a piece on the board. `piece` is a FEN letter (case selects the
    /// color); `rank` and `file` are 1-based.
    ///
    /// # Panics
    ///
    /// Panics if `rank` or `file` is outside 1..=8 or `piece` is not a
    /// piece letter. Callers (the FEN codec) validate before calling; an
    /// out-of-range argument is a bug, not an input error.
    pub fn place_piece(&mut self, piece: char, rank: u8, file: u8) {
        assert!(
            (1..=8).contains(&rank) && (1..=8).contains(&file),
            "place_piece: rank/file out of range: ({rank}, {file})"
        );
        let Some(piece) = Piece::from_fen_char(piece) else {
            panic!("place_piece: not a piece letter: '{piece}'");
        };

        let mask = Square::from_coords(rank - 1, file - 1).bitboard();
        self.pieces[piece.kind().index()] |= mask;
        self.sides[piece.color().index()] |= mask;
    }

    // --- Occupancy accessors ---

    /// Return the occupancy of the given piece kind, both colors merged.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Return the occupancy of the given color, all kinds merged.
    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    /// Return all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.sides[Color::White.index()] | self.sides[Color::Black.index()]
    }

    /// Return the piece kind on the given square, if any.
    pub fn piece_on(&self, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.pieces[kind.index()].contains(sq))
    }

    /// Return the color of the piece on the given square, if any.
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|&color| self.sides[color.index()].contains(sq))
    }

    /// Return the full (kind, color) piece on the given square, if any,
    /// recovered by intersecting the kind and color bitboards.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        Some(Piece::new(self.piece_on(sq)?, self.color_on(sq)?))
    }

    // --- Auxiliary state ---

    /// Return the en-passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Set or clear the en-passant target square.
    #[inline]
    pub fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    /// Return the half-move clock (moves since the last pawn advance or
    /// capture).
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Set the half-move clock.
    #[inline]
    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    /// Return the full-move number (starts at 1, incremented after Black
    /// moves).
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Set the full-move number.
    #[inline]
    pub fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    // --- Consistency ---

    /// Check the occupancy invariant: piece kinds never overlap, colors
    /// never overlap, and every kind-occupied square is color-occupied and
    /// vice versa.
    pub fn validate(&self) -> Result<(), PositionError> {
        for i in 0..PieceKind::COUNT {
            for j in (i + 1)..PieceKind::COUNT {
                if (self.pieces[i] & self.pieces[j]).is_nonempty() {
                    return Err(PositionError::OverlappingKinds);
                }
            }
        }

        let white = self.sides[Color::White.index()];
        let black = self.sides[Color::Black.index()];
        if (white & black).is_nonempty() {
            return Err(PositionError::OverlappingColors);
        }

        let all_kinds = self
            .pieces
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        if all_kinds != (white | black) {
            return Err(PositionError::KindColorMismatch);
        }

        Ok(())
    }

    /// Return a displayable 8×8 diagram of the position.
    pub fn diagram(&self) -> Diagram<'_> {
        Diagram(self)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// Displays a position as an 8×8 glyph grid, ranks 8 down to 1, with a
/// file-letter legend underneath.
pub struct Diagram<'a>(&'a Position);

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::from_coords(rank, file);
                let glyph = match self.0.piece_at(sq) {
                    Some(piece) => piece.glyph(),
                    None => '.',
                };
                write!(f, "{glyph} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::{Flags, Position};
    use crate::bitboard::Bitboard;
    use crate::piece::{Color, Piece, PieceKind};
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn starting_position_layout() {
        let pos = Position::starting_position();
        assert_eq!(pos.occupied().count(), 32);
        assert_eq!(pos.pieces(PieceKind::Pawn) & pos.side(Color::White), Bitboard::RANK_2);
        assert_eq!(pos.pieces(PieceKind::Pawn) & pos.side(Color::Black), Bitboard::RANK_7);
        assert_eq!(pos.piece_on(sq("e1")), Some(PieceKind::King));
        assert_eq!(pos.piece_on(sq("d8")), Some(PieceKind::Queen));
        assert_eq!(pos.color_on(sq("a1")), Some(Color::White));
        assert_eq!(pos.color_on(sq("a8")), Some(Color::Black));
        assert_eq!(pos.piece_on(sq("e4")), None);
        pos.validate().unwrap();
    }

    #[test]
    fn starting_position_state() {
        let pos = Position::starting_position();
        assert_eq!(pos.side_to_move(), Color::White);
        assert!(pos.has_flag(Flags::ALL_CASTLING));
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn flag_set_clear_toggle_test() {
        let mut pos = Position::empty();
        assert!(!pos.has_flag(Flags::BLACK_QUEEN_SIDE));

        pos.set_flag(Flags::BLACK_QUEEN_SIDE);
        assert!(pos.has_flag(Flags::BLACK_QUEEN_SIDE));

        pos.toggle_flag(Flags::BLACK_QUEEN_SIDE);
        assert!(!pos.has_flag(Flags::BLACK_QUEEN_SIDE));

        pos.set_flag(Flags::WHITE_KING_SIDE | Flags::WHITE_QUEEN_SIDE);
        pos.clear_flag(Flags::WHITE_KING_SIDE);
        assert!(!pos.has_flag(Flags::WHITE_KING_SIDE));
        assert!(pos.has_flag(Flags::WHITE_QUEEN_SIDE));
    }

    #[test]
    fn side_to_move_tracks_the_flag_word() {
        let mut pos = Position::empty();
        assert_eq!(pos.side_to_move(), Color::White);

        pos.set_side_to_move(Color::Black);
        assert_eq!(pos.side_to_move(), Color::Black);
        assert!(!pos.has_flag(Flags::WHITE_TO_MOVE));

        pos.toggle_flag(Flags::WHITE_TO_MOVE);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn place_piece_sets_kind_and_color() {
        let mut pos = Position::empty();
        pos.place_piece('N', 4, 5); // e4
        assert_eq!(pos.piece_on(sq("e4")), Some(PieceKind::Knight));
        assert_eq!(pos.color_on(sq("e4")), Some(Color::White));
        assert_eq!(
            pos.piece_at(sq("e4")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );

        pos.place_piece('q', 8, 1); // a8
        assert_eq!(pos.piece_at(sq("a8")).map(|p| p.fen_char()), Some('q'));
    }

    #[test]
    fn occupancy_stays_disjoint_under_placement() {
        let mut pos = Position::empty();
        for (piece, rank, file) in [('K', 1, 5), ('k', 8, 5), ('R', 1, 1), ('r', 8, 8), ('P', 2, 4), ('p', 7, 4)] {
            pos.place_piece(piece, rank, file);
        }
        pos.validate().unwrap();
        for occupied in pos.occupied() {
            assert!(pos.piece_at(occupied).is_some());
        }
    }

    #[test]
    #[should_panic(expected = "rank/file out of range")]
    fn place_piece_rejects_rank_zero() {
        Position::empty().place_piece('P', 0, 4);
    }

    #[test]
    #[should_panic(expected = "rank/file out of range")]
    fn place_piece_rejects_file_nine() {
        Position::empty().place_piece('P', 4, 9);
    }

    #[test]
    #[should_panic(expected = "not a piece letter")]
    fn place_piece_rejects_non_piece() {
        Position::empty().place_piece('x', 4, 4);
    }

    #[test]
    fn diagram_prints_glyph_grid() {
        let pos = Position::starting_position();
        let out = format!("{}", pos.diagram());
        assert!(out.contains("♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜"));
        assert!(out.contains("♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖"));
        assert!(out.contains("a b c d e f g h"));
        // Ranks 8 down to 1, top to bottom.
        let first_line = out.lines().next().unwrap();
        assert!(first_line.starts_with("8 "));
    }

    #[test]
    fn counter_setters() {
        let mut pos = Position::empty();
        pos.set_halfmove_clock(12);
        pos.set_fullmove_number(34);
        pos.set_en_passant(Some(sq("d6")));
        assert_eq!(pos.halfmove_clock(), 12);
        assert_eq!(pos.fullmove_number(), 34);
        assert_eq!(pos.en_passant(), Some(sq("d6")));

        pos.set_en_passant(None);
        assert_eq!(pos.en_passant(), None);
    }

    #[test]
    fn flags_debug_lists_names() {
        let flags = Flags::WHITE_TO_MOVE | Flags::BLACK_KING_SIDE;
        let out = format!("{flags:?}");
        assert!(out.contains("WHITE_TO_MOVE"));
        assert!(out.contains("BLACK_KING_SIDE"));
    }
}
