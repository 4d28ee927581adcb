//! Precomputed jump patterns for the two leaper pieces, knight and king.
//!
//! Each table maps a square to the set of squares one jump away, ignoring
//! occupancy. The tables are pure geometry, computed at compile time, and
//! shared read-only by every consumer.

use crate::bitboard::Bitboard;
use crate::square::Square;

/// Compute knight jump targets for every square.
///
/// Each of the eight (±1, ±2)/(±2, ±1) displacements is built by composing
/// two directional shifts; the shift primitives mask at the file edges at
/// every step, so a jump that leaves the board sideways vanishes instead of
/// reappearing on the opposite file.
const fn knight_jump_table() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let origin = Bitboard::new(1u64 << sq);
        let north = origin.shift_north();
        let south = origin.shift_south();
        let east = origin.shift_east();
        let west = origin.shift_west();

        let vertical = north
            .shift_north_east()
            .union(north.shift_north_west())
            .union(south.shift_south_east())
            .union(south.shift_south_west());
        let horizontal = east
            .shift_north_east()
            .union(east.shift_south_east())
            .union(west.shift_north_west())
            .union(west.shift_south_west());

        table[sq] = vertical.union(horizontal);
        sq += 1;
    }
    table
}

/// Compute king step targets for every square.
///
/// East/west neighbors first; shifting the origin together with those
/// neighbors north and south then covers the remaining six directions,
/// diagonals included, without a dedicated diagonal pass.
const fn king_jump_table() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let origin = Bitboard::new(1u64 << sq);
        let sides = origin.shift_east().union(origin.shift_west());
        let row = origin.union(sides);
        table[sq] = sides.union(row.shift_north()).union(row.shift_south());
        sq += 1;
    }
    table
}

static KNIGHT_JUMPS: [Bitboard; 64] = knight_jump_table();
static KING_JUMPS: [Bitboard; 64] = king_jump_table();

/// Return the squares a knight on `sq` can jump to.
#[inline]
pub fn knight_jumps(sq: Square) -> Bitboard {
    KNIGHT_JUMPS[sq.index()]
}

/// Return the squares a king on `sq` can step to.
#[inline]
pub fn king_jumps(sq: Square) -> Bitboard {
    KING_JUMPS[sq.index()]
}
