//! The painter capability.

use jigsaw_puzzle::Piece;

use crate::config::RenderStyle;

/// Turns pieces into figures on some rendering surface.
///
/// The canvas never looks inside a figure. It only stores it, hands out
/// clones, and compares nothing but identity, so a figure can be a scene
/// graph handle, an index into a retained-mode layer, or a plain counter
/// in a test double.
pub trait Painter {
    /// Opaque handle to a drawn piece.
    type Figure: Clone + 'static;

    /// Produce the figure for `piece`.
    ///
    /// Called at most once per piece between two [`clear`](crate::Canvas::clear)s.
    fn sketch(&mut self, piece: &Piece, style: &RenderStyle) -> Self::Figure;

    /// Flush the sketched figures to the surface.
    fn draw(&mut self);
}
