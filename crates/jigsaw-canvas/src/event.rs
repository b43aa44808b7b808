//! Canvas-level connect and disconnect events.
//!
//! These mirror [`Signal`](jigsaw_puzzle::Signal) but carry the figures the
//! canvas holds for each piece. A piece that has not been drawn yet has no
//! figure, so figure fields are `Option`s.

use jigsaw_core::{PieceId, PieceKey, Side};

/// Two pieces were joined.
#[derive(Debug)]
pub struct ConnectEvent<'a, F> {
    /// Piece the connect call was made on.
    pub piece: PieceId,
    /// Key of `piece`.
    pub piece_key: &'a PieceKey,
    /// Figure of `piece`, if drawn.
    pub figure: Option<&'a F>,
    /// Piece it was joined to.
    pub target: PieceId,
    /// Key of `target`.
    pub target_key: &'a PieceKey,
    /// Figure of `target`, if drawn.
    pub target_figure: Option<&'a F>,
    /// Side of `piece` facing `target`.
    pub side: Side,
}

/// A link was broken.
#[derive(Debug)]
pub struct DisconnectEvent<'a, F> {
    /// Piece the disconnect call was made on.
    pub piece: PieceId,
    /// Key of `piece`.
    pub piece_key: &'a PieceKey,
    /// Figure of `piece`, if drawn.
    pub figure: Option<&'a F>,
    /// Piece on the other end of the broken link.
    pub neighbor: PieceId,
    /// Key of `neighbor`.
    pub neighbor_key: &'a PieceKey,
    /// Figure of `neighbor`, if drawn.
    pub neighbor_figure: Option<&'a F>,
    /// Side of `piece` that was released.
    pub side: Side,
}

/// Callback for [`ConnectEvent`]s.
pub type ConnectListener<F> = Box<dyn FnMut(&ConnectEvent<'_, F>)>;

/// Callback for [`DisconnectEvent`]s.
pub type DisconnectListener<F> = Box<dyn FnMut(&DisconnectEvent<'_, F>)>;
