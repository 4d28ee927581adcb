//! Error types for notation parsing and position consistency checks.

/// A position record failed the FEN grammar.
///
/// Parsing is all-or-nothing: the first malformed field aborts the parse
/// and is reported here with enough context to diagnose the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// The record does not have exactly 6 whitespace-separated fields.
    #[error("expected 6 fields in position record, found {found}")]
    WrongFieldCount { found: usize },

    /// The piece placement field does not have exactly 8 rank segments.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// A rank segment describes more or fewer than 8 squares.
    #[error("rank {rank} of piece placement describes {squares} squares, expected 8")]
    BadRankLength { rank: u8, squares: u8 },

    /// An unrecognized character appeared in the piece placement.
    #[error("invalid character in piece placement: '{character}'")]
    InvalidPlacementChar { character: char },

    /// The side-to-move field is not "w" or "b".
    #[error("invalid side to move: \"{found}\"")]
    InvalidSideToMove { found: String },

    /// An unrecognized character appeared in the castling field.
    #[error("invalid castling availability character: '{character}'")]
    InvalidCastlingChar { character: char },

    /// The en-passant field is not "-" or a valid algebraic square.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },

    /// A move counter is not valid decimal text.
    #[error("invalid {field}: \"{found}\"")]
    InvalidCounter { field: &'static str, found: String },

    /// The parsed position violates the occupancy invariant.
    #[error("inconsistent position: {0}")]
    InconsistentPosition(#[from] PositionError),
}

/// The occupancy bitboards of a position contradict each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Two piece-kind bitboards claim the same square.
    #[error("two piece kinds occupy the same square")]
    OverlappingKinds,

    /// The white and black occupancy bitboards overlap.
    #[error("white and black occupancy overlap")]
    OverlappingColors,

    /// The union of the kind bitboards differs from the union of the
    /// color bitboards.
    #[error("piece-kind occupancy does not match color occupancy")]
    KindColorMismatch,
}
