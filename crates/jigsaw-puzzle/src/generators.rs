//! Inserts generators: choose the edge shape on each interior grid boundary.
//!
//! During autogeneration the generator is asked, for every cell `(row, col)`,
//! which shape its right side ([`Boundary::Horizontal`]) and its bottom side
//! ([`Boundary::Vertical`]) get. The neighbor across that boundary always
//! receives the complement, so interior edges fit no matter what the
//! generator returns, as long as it returns a tab or a slot.

use std::fmt;

use jigsaw_core::Insert;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Interior boundary of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Between `(row, col)` and `(row, col + 1)`: the cell's right side.
    Horizontal,
    /// Between `(row, col)` and `(row + 1, col)`: the cell's bottom side.
    Vertical,
}

impl Boundary {
    /// Both boundaries, horizontal first.
    pub const ALL: [Boundary; 2] = [Boundary::Horizontal, Boundary::Vertical];
}

/// Chooses the shape of interior edges during autogeneration.
///
/// Implementations must be pure: the same arguments always give the same
/// answer, and the answer is [`Insert::Tab`] or [`Insert::Slot`].
///
/// Any `Fn(usize, usize) -> Insert` is a generator that gives both
/// boundaries of a cell the same shape. Implement the trait directly to
/// shape the horizontal and vertical boundaries independently.
pub trait InsertsGenerator {
    /// Shape for `boundary` of cell `(row, col)`.
    fn insert(&self, row: usize, col: usize, boundary: Boundary) -> Insert;
}

impl<F> InsertsGenerator for F
where
    F: Fn(usize, usize) -> Insert,
{
    fn insert(&self, row: usize, col: usize, _boundary: Boundary) -> Insert {
        self(row, col)
    }
}

/// Alternate tab and slot by parity of `row + col`.
///
/// Every piece ends up either all tabs or all slots, like a checkerboard.
pub fn flipflop(row: usize, col: usize) -> Insert {
    if (row + col) % 2 == 0 {
        Insert::Tab
    } else {
        Insert::Slot
    }
}

/// Two tabs, then two slots, along each diagonal run.
pub fn twoandtwo(row: usize, col: usize) -> Insert {
    if (row + col) % 4 < 2 {
        Insert::Tab
    } else {
        Insert::Slot
    }
}

/// Every right and bottom edge is a tab.
pub fn fixed_tab(_row: usize, _col: usize) -> Insert {
    Insert::Tab
}

/// Pseudo-random shapes derived from a seed and the cell coordinates.
///
/// Each cell boundary seeds its own ChaCha8 stream, so the result is a pure
/// function of `(seed, row, col, boundary)` and independent of query order.
/// The right and bottom sides of a cell are drawn independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededInserts {
    seed: u64,
}

impl SeededInserts {
    /// A generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn boundary_seed(&self, row: usize, col: usize, boundary: Boundary) -> u64 {
        let axis = match boundary {
            Boundary::Horizontal => 0,
            Boundary::Vertical => 1,
        };
        let cell = ((row as u64) << 33) ^ ((col as u64) << 1) ^ axis;
        self.seed ^ cell.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

impl InsertsGenerator for SeededInserts {
    fn insert(&self, row: usize, col: usize, boundary: Boundary) -> Insert {
        let mut rng = ChaCha8Rng::seed_from_u64(self.boundary_seed(row, col, boundary));
        if rng.random::<bool>() {
            Insert::Tab
        } else {
            Insert::Slot
        }
    }
}

/// Boxed generator with a readable `Debug`.
pub(crate) struct BoxedGenerator(pub(crate) Box<dyn InsertsGenerator>);

impl fmt::Debug for BoxedGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InsertsGenerator")
    }
}
