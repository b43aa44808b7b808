//! Strongly-typed piece identifiers.

use std::fmt;
use std::num::TryFromIntError;

/// Identifies a piece within the puzzle that owns it.
///
/// Pieces live in an arena inside the puzzle; `PieceId(n)` is the n-th
/// piece inserted (0-based). Neighbor links store `PieceId`s rather than
/// references, so there are no ownership cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Arena slot of this piece.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based insertion position, used for positional addressing.
    pub fn position(self) -> usize {
        self.index() + 1
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PieceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Arena slot to id; fails past `u32::MAX`.
impl TryFrom<usize> for PieceId {
    type Error = TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(Self)
    }
}

/// Key under which a piece's figure is stored by a canvas.
///
/// A piece with an explicit id is addressed by that id; any other piece
/// is addressed by its 1-based insertion position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKey {
    /// Explicit piece id from metadata.
    ById(String),
    /// 1-based insertion position.
    ByIndex(usize),
}

impl PieceKey {
    /// Resolve the key for a piece with optional `id` at `piece`.
    pub fn resolve(id: Option<&str>, piece: PieceId) -> Self {
        match id {
            Some(id) => Self::ById(id.to_owned()),
            None => Self::ByIndex(piece.position()),
        }
    }
}

impl fmt::Display for PieceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "{id}"),
            Self::ByIndex(n) => write!(f, "#{n}"),
        }
    }
}

impl From<&str> for PieceKey {
    fn from(id: &str) -> Self {
        Self::ById(id.to_owned())
    }
}

impl From<usize> for PieceKey {
    fn from(n: usize) -> Self {
        Self::ByIndex(n)
    }
}
