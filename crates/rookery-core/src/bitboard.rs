//! A 64-bit occupancy mask, one bit per square, plus the wraparound-safe
//! directional shifts everything else is built from.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::square::Square;

/// A set of squares encoded as a `u64` (LERF mapping: bit = rank * 8 + file).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// No squares set.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// All 64 squares set.
    pub const FULL: Bitboard = Bitboard(!0);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_2: Bitboard = Bitboard(0x0000_0000_0000_FF00);
    pub const RANK_7: Bitboard = Bitboard(0x00FF_0000_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    // Complement-file masks applied after east/west shifts so that a piece
    // leaving the board sideways is dropped instead of wrapping to the
    // opposite file on an adjacent rank.
    const NOT_FILE_A: u64 = !Self::FILE_A.0;
    const NOT_FILE_H: u64 = !Self::FILE_H.0;

    /// Create a bitboard from a raw `u64`.
    #[inline]
    pub const fn new(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    /// Return the underlying `u64`.
    #[inline]
    pub const fn inner(self) -> u64 {
        self.0
    }

    /// Return `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if at least one bit is set.
    #[inline]
    pub const fn is_nonempty(self) -> bool {
        self.0 != 0
    }

    /// Count the number of set bits.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Return `true` if the given square's bit is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Return a new bitboard with the given square set.
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | (1u64 << sq.index()))
    }

    /// Return a new bitboard with the given square cleared.
    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1u64 << sq.index()))
    }

    // --- Directional shifts ---
    //
    // All eight are total: shifting off the top or bottom of the board
    // loses the piece, and the file masks guarantee the same at the east
    // and west edges.

    /// Shift every square one rank up.
    #[inline]
    pub const fn shift_north(self) -> Bitboard {
        Bitboard(self.0 << 8)
    }

    /// Shift every square one rank down.
    #[inline]
    pub const fn shift_south(self) -> Bitboard {
        Bitboard(self.0 >> 8)
    }

    /// Shift every square one file toward file H.
    #[inline]
    pub const fn shift_east(self) -> Bitboard {
        Bitboard((self.0 << 1) & Self::NOT_FILE_A)
    }

    /// Shift every square one file toward file A.
    #[inline]
    pub const fn shift_west(self) -> Bitboard {
        Bitboard((self.0 >> 1) & Self::NOT_FILE_H)
    }

    /// Shift one square diagonally up-right.
    #[inline]
    pub const fn shift_north_east(self) -> Bitboard {
        Bitboard((self.0 << 9) & Self::NOT_FILE_A)
    }

    /// Shift one square diagonally up-left.
    #[inline]
    pub const fn shift_north_west(self) -> Bitboard {
        Bitboard((self.0 << 7) & Self::NOT_FILE_H)
    }

    /// Shift one square diagonally down-right.
    #[inline]
    pub const fn shift_south_east(self) -> Bitboard {
        Bitboard((self.0 >> 7) & Self::NOT_FILE_A)
    }

    /// Shift one square diagonally down-left.
    #[inline]
    pub const fn shift_south_west(self) -> Bitboard {
        Bitboard((self.0 >> 9) & Self::NOT_FILE_H)
    }

    /// Union, usable in const contexts where `BitOr` is not.
    #[inline]
    pub(crate) const fn union(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let sq = Square::from_index_unchecked(self.0.trailing_zeros() as u8);
            self.0 &= self.0 - 1;
            Some(sq)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Bitboard {}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                if (self.0 >> (rank * 8 + file)) & 1 == 1 {
                    write!(f, "1 ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Bitboard;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn empty_and_full() {
        assert!(Bitboard::EMPTY.is_empty());
        assert!(Bitboard::FULL.is_nonempty());
        assert_eq!(!Bitboard::EMPTY, Bitboard::FULL);
        assert_eq!(Bitboard::FULL.count(), 64);
    }

    #[test]
    fn with_contains_without() {
        let bb = Bitboard::EMPTY.with(sq("e4"));
        assert!(bb.contains(sq("e4")));
        assert!(!bb.contains(sq("d4")));
        assert!(bb.without(sq("e4")).is_empty());
    }

    #[test]
    fn north_south_are_plain_rank_shifts() {
        assert_eq!(Bitboard::RANK_1.shift_north(), Bitboard::RANK_2);
        assert_eq!(Bitboard::RANK_2.shift_south(), Bitboard::RANK_1);
        assert!(Bitboard::RANK_8.shift_north().is_empty());
        assert!(Bitboard::RANK_1.shift_south().is_empty());
    }

    #[test]
    fn east_west_move_one_file() {
        let e4 = sq("e4").bitboard();
        assert_eq!(e4.shift_east(), sq("f4").bitboard());
        assert_eq!(e4.shift_west(), sq("d4").bitboard());
    }

    #[test]
    fn diagonals_move_one_step() {
        let e4 = sq("e4").bitboard();
        assert_eq!(e4.shift_north_east(), sq("f5").bitboard());
        assert_eq!(e4.shift_north_west(), sq("d5").bitboard());
        assert_eq!(e4.shift_south_east(), sq("f3").bitboard());
        assert_eq!(e4.shift_south_west(), sq("d3").bitboard());
    }

    #[test]
    fn westward_shifts_drop_file_a() {
        for rank in 0..8u8 {
            let bb = Square::from_coords(rank, 0).bitboard();
            assert!(bb.shift_west().is_empty(), "west wrap on rank {rank}");
            assert!(bb.shift_north_west().is_empty(), "nw wrap on rank {rank}");
            assert!(bb.shift_south_west().is_empty(), "sw wrap on rank {rank}");
        }
    }

    #[test]
    fn eastward_shifts_drop_file_h() {
        for rank in 0..8u8 {
            let bb = Square::from_coords(rank, 7).bitboard();
            assert!(bb.shift_east().is_empty(), "east wrap on rank {rank}");
            assert!(bb.shift_north_east().is_empty(), "ne wrap on rank {rank}");
            assert!(bb.shift_south_east().is_empty(), "se wrap on rank {rank}");
        }
    }

    #[test]
    fn file_mask_shifts_stay_on_board() {
        assert_eq!(Bitboard::FILE_A.shift_east().count(), 8);
        assert!(Bitboard::FILE_A.shift_west().is_empty());
        assert_eq!(Bitboard::FILE_H.shift_west().count(), 8);
        assert!(Bitboard::FILE_H.shift_east().is_empty());
    }

    #[test]
    fn iterator_yields_squares_in_index_order() {
        let bb = Bitboard::EMPTY.with(sq("a1")).with(sq("e4")).with(sq("h8"));
        let squares: Vec<_> = bb.collect();
        assert_eq!(squares, vec![sq("a1"), sq("e4"), sq("h8")]);
        assert_eq!(bb.len(), 3);
    }

    #[test]
    fn operators() {
        let a = Bitboard::RANK_1;
        let b = Bitboard::FILE_A;
        assert_eq!((a & b).count(), 1);
        assert_eq!((a | b).count(), 15);
        assert_eq!((a ^ b).count(), 14);

        let mut bb = a;
        bb |= Bitboard::RANK_2;
        assert_eq!(bb.count(), 16);
        bb &= Bitboard::FILE_A;
        assert_eq!(bb.count(), 2);
    }

    #[test]
    fn debug_grid() {
        let grid = format!("{:?}", sq("a1").bitboard());
        assert!(grid.contains("a b c d e f g h"));
        assert!(grid.contains("1 1"));
    }
}
