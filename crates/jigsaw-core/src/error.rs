//! Error types for puzzle graph operations.
//!
//! Structural and geometric violations are programmer errors: they are
//! reported immediately and the puzzle is left unchanged. Lookups that
//! simply miss (a piece that was never drawn, say) are modelled as
//! `Option` by the callers, not as errors.

use std::error::Error;
use std::fmt;

use crate::id::PieceId;
use crate::structure::{Insert, Side};

/// Errors from puzzle construction and connection operations.
#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleError {
    /// The touching sides of a connect call do not interlock.
    StructureMismatch {
        /// Piece initiating the connection.
        piece: PieceId,
        /// Side of `piece` that would touch `target`.
        side: Side,
        /// Shape of that side.
        piece_insert: Insert,
        /// Piece being connected to.
        target: PieceId,
        /// Shape of the facing side of `target`.
        target_insert: Insert,
    },
    /// The puzzle holds no piece with this id.
    UnknownPiece(PieceId),
    /// A piece cannot be connected to itself.
    SelfConnection(PieceId),
    /// The side is already connected to a different piece.
    SideOccupied {
        /// Piece whose side is taken.
        piece: PieceId,
        /// The occupied side.
        side: Side,
        /// Current connected neighbor on that side.
        neighbor: PieceId,
    },
    /// Grid dimensions for autogeneration are zero, or the cell count
    /// does not fit a [`PieceId`].
    InvalidGrid {
        /// Requested rows.
        vertical: usize,
        /// Requested columns.
        horizontal: usize,
    },
    /// An inserts generator returned a border for an interior edge.
    InvalidGenerator {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
    },
    /// Shuffle factor outside `(0, 1]`.
    InvalidShuffleFactor {
        /// The rejected factor.
        factor: f64,
    },
    /// A size, distance or bound is negative, zero where it must not be, or not finite.
    InvalidGeometry {
        /// Which parameter was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructureMismatch {
                piece,
                side,
                piece_insert,
                target,
                target_insert,
            } => write!(
                f,
                "piece {piece} {side} side ({piece_insert:?}) does not fit piece {target} \
                 {} side ({target_insert:?})",
                side.opposite()
            ),
            Self::UnknownPiece(id) => write!(f, "unknown piece {id}"),
            Self::SelfConnection(id) => write!(f, "piece {id} cannot connect to itself"),
            Self::SideOccupied {
                piece,
                side,
                neighbor,
            } => write!(
                f,
                "piece {piece} {side} side is already connected to piece {neighbor}"
            ),
            Self::InvalidGrid {
                vertical,
                horizontal,
            } => write!(
                f,
                "grid must have at least one row and column and at most 2^32 cells, \
                 got {vertical}x{horizontal}"
            ),
            Self::InvalidGenerator { row, col } => write!(
                f,
                "inserts generator returned a border for interior cell ({row}, {col})"
            ),
            Self::InvalidShuffleFactor { factor } => {
                write!(f, "shuffle factor must be in (0, 1], got {factor}")
            }
            Self::InvalidGeometry { name, value } => {
                write!(f, "invalid {name}: {value}")
            }
        }
    }
}

impl Error for PuzzleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_both_sides() {
        let err = PuzzleError::StructureMismatch {
            piece: PieceId(0),
            side: Side::Right,
            piece_insert: Insert::Tab,
            target: PieceId(1),
            target_insert: Insert::Tab,
        };
        assert_eq!(
            err.to_string(),
            "piece 0 right side (Tab) does not fit piece 1 left side (Tab)"
        );
    }

    #[test]
    fn grid_message() {
        let err = PuzzleError::InvalidGrid {
            vertical: 0,
            horizontal: 3,
        };
        assert!(err.to_string().contains("0x3"));
    }
}
