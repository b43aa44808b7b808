//! Rectangular grid layout for autogenerated puzzles.

use jigsaw_core::{Insert, MetadataPatch, PieceId, PuzzleError, Structure};

use crate::generators::{flipflop, Boundary, BoxedGenerator, InsertsGenerator};

/// Options for [`Puzzle::autogenerate`](crate::Puzzle::autogenerate).
///
/// ```
/// use jigsaw_puzzle::{twoandtwo, AutogenerateOptions};
///
/// let options = AutogenerateOptions::new(3, 4).inserts_generator(twoandtwo);
/// assert_eq!(options.vertical_pieces_count, 3);
/// assert_eq!(options.horizontal_pieces_count, 4);
/// ```
#[derive(Debug)]
pub struct AutogenerateOptions {
    /// Number of rows. Default: 5.
    pub vertical_pieces_count: usize,
    /// Number of columns. Default: 5.
    pub horizontal_pieces_count: usize,
    /// Metadata merged into generated pieces in row-major order.
    pub metadata: Vec<MetadataPatch>,
    pub(crate) generator: BoxedGenerator,
}

impl AutogenerateOptions {
    /// Default grid size along both axes.
    pub const DEFAULT_PIECES_COUNT: usize = 5;

    /// A `vertical × horizontal` grid with the `flipflop` generator.
    pub fn new(vertical: usize, horizontal: usize) -> Self {
        Self {
            vertical_pieces_count: vertical,
            horizontal_pieces_count: horizontal,
            metadata: Vec::new(),
            generator: BoxedGenerator(Box::new(flipflop)),
        }
    }

    /// Use `generator` for interior edges.
    pub fn inserts_generator(mut self, generator: impl InsertsGenerator + 'static) -> Self {
        self.generator = BoxedGenerator(Box::new(generator));
        self
    }

    /// Merge `metadata` into the generated pieces, row-major.
    pub fn metadata(mut self, metadata: impl IntoIterator<Item = MetadataPatch>) -> Self {
        self.metadata = metadata.into_iter().collect();
        self
    }

    /// Total number of cells, or `None` if it overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.vertical_pieces_count
            .checked_mul(self.horizontal_pieces_count)
    }

    /// Check the grid is non-empty and every cell can get a [`PieceId`];
    /// returns the cell count.
    pub(crate) fn validate(&self) -> Result<usize, PuzzleError> {
        let invalid = || PuzzleError::InvalidGrid {
            vertical: self.vertical_pieces_count,
            horizontal: self.horizontal_pieces_count,
        };
        if self.vertical_pieces_count == 0 || self.horizontal_pieces_count == 0 {
            return Err(invalid());
        }
        let count = self.cell_count().ok_or_else(invalid)?;
        // Ids run 0..count, so the last one is count - 1.
        PieceId::try_from(count - 1).map_err(|_| invalid())?;
        Ok(count)
    }
}

impl Default for AutogenerateOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PIECES_COUNT, Self::DEFAULT_PIECES_COUNT)
    }
}

/// Row-major cell ordering: `(0,0), (0,1), ..., (rows-1, cols-1)`.
pub(crate) fn cells(rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
}

/// Row-major index of `(row, col)`.
pub(crate) fn rank(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

fn interior(
    generator: &dyn InsertsGenerator,
    row: usize,
    col: usize,
    boundary: Boundary,
) -> Result<Insert, PuzzleError> {
    match generator.insert(row, col, boundary) {
        Insert::None => Err(PuzzleError::InvalidGenerator { row, col }),
        insert => Ok(insert),
    }
}

/// Edge shapes for cell `(row, col)`.
///
/// The right side asks the generator for the cell's horizontal boundary
/// and the bottom side for its vertical boundary. The left and top sides
/// are the complement of what the generator gave the neighbor.
/// Outer sides are borders.
pub(crate) fn structure_at(
    generator: &dyn InsertsGenerator,
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> Result<Structure, PuzzleError> {
    let right = if col + 1 < cols {
        interior(generator, row, col, Boundary::Horizontal)?
    } else {
        Insert::None
    };
    let down = if row + 1 < rows {
        interior(generator, row, col, Boundary::Vertical)?
    } else {
        Insert::None
    };
    let left = if col > 0 {
        interior(generator, row, col - 1, Boundary::Horizontal)?.complement()
    } else {
        Insert::None
    };
    let up = if row > 0 {
        interior(generator, row - 1, col, Boundary::Vertical)?.complement()
    } else {
        Insert::None
    };
    Ok(Structure::new(up, right, down, left))
}
