//! Benchmark profiles for the jigsaw puzzle engine.
//!
//! - [`reference_options`]: 20×20 grid (400 pieces) with seeded inserts
//! - [`stress_options`]: 100×100 grid (10K pieces)
//! - [`reference_puzzle`]: an assembled puzzle built from [`reference_options`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use jigsaw_core::PuzzleError;
use jigsaw_puzzle::{AutogenerateOptions, Puzzle, SeededInserts};

/// Piece size used by every profile.
pub const BENCH_PIECE_SIZE: f64 = 40.0;

/// 20×20 grid with inserts drawn from `seed`.
pub fn reference_options(seed: u64) -> AutogenerateOptions {
    AutogenerateOptions::new(20, 20).inserts_generator(SeededInserts::new(seed))
}

/// 100×100 grid with inserts drawn from `seed`.
pub fn stress_options(seed: u64) -> AutogenerateOptions {
    AutogenerateOptions::new(100, 100).inserts_generator(SeededInserts::new(seed))
}

/// An assembled puzzle built from [`reference_options`].
pub fn reference_puzzle(seed: u64) -> Result<Puzzle, PuzzleError> {
    let mut puzzle = Puzzle::with_geometry(BENCH_PIECE_SIZE, BENCH_PIECE_SIZE / 4.0)?;
    puzzle.autogenerate(reference_options(seed))?;
    Ok(puzzle)
}
