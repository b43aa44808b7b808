//! Validated puzzle-wide geometry.

use jigsaw_core::PuzzleError;

/// Piece size, proximity and border offset of a puzzle.
///
/// Construction validates every value, so a `Geometry` in hand is always
/// usable: piece size positive and finite, proximity and border offset
/// non-negative and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    piece_size: f64,
    proximity: f64,
    border_offset: f64,
}

impl Geometry {
    /// Default edge length of a piece, in canvas units.
    pub const DEFAULT_PIECE_SIZE: f64 = 50.0;
    /// Default auto-connect distance, in canvas units.
    pub const DEFAULT_PROXIMITY: f64 = 1.0;

    /// Geometry with the given piece size and proximity and no border offset.
    ///
    /// Returns `Err(PuzzleError::InvalidGeometry)` naming the first
    /// rejected parameter.
    pub fn new(piece_size: f64, proximity: f64) -> Result<Self, PuzzleError> {
        check_positive("piece_size", piece_size)?;
        check_non_negative("proximity", proximity)?;
        Ok(Self {
            piece_size,
            proximity,
            border_offset: 0.0,
        })
    }

    /// The same geometry with a border offset.
    pub fn with_border_offset(mut self, offset: f64) -> Result<Self, PuzzleError> {
        check_non_negative("border_offset", offset)?;
        self.border_offset = offset;
        Ok(self)
    }

    /// Piece size and proximity multiplied by `factor`; border offset kept.
    ///
    /// Non-positive or non-finite factors leave the geometry unchanged.
    pub fn scaled(self, factor: f64) -> Self {
        let piece_size = self.piece_size * factor;
        let proximity = self.proximity * factor;
        if factor > 0.0 && piece_size.is_finite() && proximity.is_finite() {
            Self {
                piece_size,
                proximity,
                border_offset: self.border_offset,
            }
        } else {
            self
        }
    }

    /// Edge length of a piece.
    pub fn piece_size(&self) -> f64 {
        self.piece_size
    }

    /// Maximum distance at which adjacent pieces may auto-connect.
    pub fn proximity(&self) -> f64 {
        self.proximity
    }

    /// Offset added to autogenerated positions.
    pub fn border_offset(&self) -> f64 {
        self.border_offset
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            piece_size: Self::DEFAULT_PIECE_SIZE,
            proximity: Self::DEFAULT_PROXIMITY,
            border_offset: 0.0,
        }
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), PuzzleError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PuzzleError::InvalidGeometry { name, value })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), PuzzleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PuzzleError::InvalidGeometry { name, value })
    }
}
