//! Pieces and their neighbor links.

use jigsaw_core::{Anchor, Insert, Metadata, PieceId, PieceKey, Side, Structure};

/// One side's link to a neighboring piece.
///
/// A link moves `Unlinked → Linked` through a connect call and back to
/// `Unlinked` through a disconnect. Disconnecting clears `connected` but
/// keeps `neighbor`, so the piece remembers who it was joined to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Link {
    /// Neighboring piece on this side, if any was ever linked.
    pub neighbor: Option<PieceId>,
    /// Whether the two pieces are currently joined.
    pub connected: bool,
}

impl Link {
    /// The connected neighbor, if the link is active.
    pub fn connected_neighbor(&self) -> Option<PieceId> {
        if self.connected {
            self.neighbor
        } else {
            None
        }
    }
}

/// A puzzle piece: edge shapes, metadata and four neighbor links.
///
/// Pieces are created by [`Puzzle::new_piece`](crate::Puzzle::new_piece)
/// or by autogeneration and never outlive their puzzle. Links are only
/// changed through the puzzle so that both sides of a link stay in step.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    id: PieceId,
    structure: Structure,
    metadata: Metadata,
    links: [Link; 4],
}

impl Piece {
    pub(crate) fn new(id: PieceId, structure: Structure, metadata: Metadata) -> Self {
        Self {
            id,
            structure,
            metadata,
            links: [Link::default(); 4],
        }
    }

    /// Arena id of this piece.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Key this piece is addressed by: its explicit id, else its 1-based position.
    pub fn key(&self) -> PieceKey {
        PieceKey::resolve(self.metadata.id.as_deref(), self.id)
    }

    /// Edge shapes.
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Top edge shape.
    pub fn up(&self) -> Insert {
        self.structure.up
    }

    /// Right edge shape.
    pub fn right(&self) -> Insert {
        self.structure.right
    }

    /// Bottom edge shape.
    pub fn down(&self) -> Insert {
        self.structure.down
    }

    /// Left edge shape.
    pub fn left(&self) -> Insert {
        self.structure.left
    }

    /// Metadata bag.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable metadata bag.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Where the piece currently sits.
    pub fn central_anchor(&self) -> Anchor {
        self.metadata.current_position
    }

    /// Set both current and target position to `anchor`.
    ///
    /// Used when authoring a puzzle by hand rather than through
    /// autogeneration. Returns `self` for chaining after
    /// [`Puzzle::new_piece`](crate::Puzzle::new_piece).
    pub fn place_at(&mut self, anchor: Anchor) -> &mut Self {
        self.metadata.place_at(anchor);
        self
    }

    /// Move the piece to `anchor`, leaving its target position alone.
    pub fn move_to(&mut self, anchor: Anchor) -> &mut Self {
        self.metadata.current_position = anchor;
        self
    }

    /// Shift the piece's current position by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.metadata.current_position = self.metadata.current_position.translate(dx, dy);
        self
    }

    /// Whether the piece sits within `tolerance` of its target position.
    pub fn is_in_place(&self, tolerance: f64) -> bool {
        self.metadata
            .current_position
            .is_close_to(self.metadata.target_position, tolerance)
    }

    /// Link on `side`.
    pub fn link(&self, side: Side) -> Link {
        self.links[side.index()]
    }

    /// Neighbor recorded on `side`, connected or not.
    pub fn neighbor(&self, side: Side) -> Option<PieceId> {
        self.links[side.index()].neighbor
    }

    /// Whether the link on `side` is active.
    pub fn is_connected(&self, side: Side) -> bool {
        self.links[side.index()].connected
    }

    /// Sides with an active link, in up, right, down, left order.
    pub fn connected_sides(&self) -> impl Iterator<Item = (Side, PieceId)> + '_ {
        Side::ALL
            .into_iter()
            .filter_map(|side| self.link(side).connected_neighbor().map(|n| (side, n)))
    }

    pub(crate) fn link_mut(&mut self, side: Side) -> &mut Link {
        &mut self.links[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece() -> Piece {
        Piece::new(PieceId(0), Structure::from_compact("T-S-"), Metadata::default())
    }

    #[test]
    fn place_at_sets_both_positions() {
        let mut p = piece();
        p.place_at(Anchor::new(3.0, 0.0));
        let meta = p.metadata();
        assert_eq!(meta.current_position, Anchor::new(3.0, 0.0));
        assert_eq!(meta.target_position, meta.current_position);
        assert!(!std::ptr::eq(&meta.current_position, &meta.target_position));
    }

    #[test]
    fn move_keeps_target() {
        let mut p = piece();
        p.place_at(Anchor::new(1.0, 1.0)).translate(2.0, 0.0);
        assert_eq!(p.central_anchor(), Anchor::new(3.0, 1.0));
        assert_eq!(p.metadata().target_position, Anchor::new(1.0, 1.0));
        assert!(!p.is_in_place(1.0));
        p.move_to(Anchor::new(1.5, 1.0));
        assert!(p.is_in_place(1.0));
    }

    #[test]
    fn key_falls_back_to_position() {
        let mut p = piece();
        assert_eq!(p.key(), PieceKey::ByIndex(1));
        p.metadata_mut().id = Some("a".into());
        assert_eq!(p.key(), PieceKey::ById("a".into()));
    }

    #[test]
    fn new_piece_is_unlinked() {
        let p = piece();
        assert_eq!(p.right(), Insert::Tab);
        assert_eq!(p.left(), Insert::Slot);
        assert!(Side::ALL.iter().all(|&s| p.link(s) == Link::default()));
        assert_eq!(p.connected_sides().count(), 0);
    }
}
