//! Connect and disconnect signals raised by a puzzle.

use std::fmt;

use jigsaw_core::{PieceId, PieceKey, Side};

/// Discriminant of a [`Signal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Two pieces were joined.
    Connect,
    /// A link was broken.
    Disconnect,
}

/// A change to the puzzle graph.
///
/// Keys are resolved when the signal is raised so that observers can
/// look pieces up without touching the puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// `piece` was joined to `target` on `side`.
    Connect {
        /// Piece the connect call was made on.
        piece: PieceId,
        /// Key of `piece`.
        piece_key: PieceKey,
        /// Piece it was joined to.
        target: PieceId,
        /// Key of `target`.
        target_key: PieceKey,
        /// Side of `piece` facing `target`.
        side: Side,
    },
    /// The link between `piece` and `neighbor` on `side` was broken.
    Disconnect {
        /// Piece the disconnect call was made on.
        piece: PieceId,
        /// Key of `piece`.
        piece_key: PieceKey,
        /// Piece on the other end of the broken link.
        neighbor: PieceId,
        /// Key of `neighbor`.
        neighbor_key: PieceKey,
        /// Side of `piece` that was released.
        side: Side,
    },
}

impl Signal {
    /// Which kind of signal this is.
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Connect { .. } => SignalKind::Connect,
            Self::Disconnect { .. } => SignalKind::Disconnect,
        }
    }

    /// The piece the signal originated from.
    pub fn piece(&self) -> PieceId {
        match self {
            Self::Connect { piece, .. } | Self::Disconnect { piece, .. } => *piece,
        }
    }
}

/// Callback invoked for every signal a puzzle raises.
pub type SignalListener = Box<dyn FnMut(&Signal)>;

/// Ordered list of signal listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<SignalListener>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: SignalListener) {
        self.entries.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver `signal` to every listener in subscription order.
    pub(crate) fn emit(&mut self, signal: &Signal) {
        for listener in &mut self.entries {
            listener(signal);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
