//! The puzzle: piece arena, connection protocol, autogeneration and shuffle.

use std::collections::VecDeque;

use jigsaw_core::{Anchor, Metadata, PieceId, PieceKey, PuzzleError, Side, Structure};
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::geometry::{check_positive, Geometry};
use crate::grid::{self, AutogenerateOptions};
use crate::piece::{Link, Piece};
use crate::signal::{Listeners, Signal, SignalKind};

/// An insertion-ordered collection of pieces plus puzzle-wide geometry.
///
/// The first inserted piece is the [`head`](Puzzle::head). Pieces are
/// addressed by [`PieceId`]; neighbor links are stored as ids, and every
/// link change goes through the puzzle so both ends stay consistent.
///
/// # Examples
///
/// ```
/// use jigsaw_core::{Anchor, Insert, Structure};
/// use jigsaw_puzzle::Puzzle;
///
/// let mut puzzle = Puzzle::with_geometry(13.0, 7.0).unwrap();
/// let a = puzzle
///     .new_piece(Structure { right: Insert::Tab, ..Structure::default() })
///     .place_at(Anchor::new(0.0, 0.0))
///     .id();
/// let b = puzzle
///     .new_piece(Structure { left: Insert::Slot, right: Insert::Tab, ..Structure::default() })
///     .place_at(Anchor::new(3.0, 0.0))
///     .id();
///
/// puzzle.connect_horizontally(a, b).unwrap();
/// assert_eq!(puzzle.disconnect(a).unwrap(), 1);
/// assert_eq!(puzzle.disconnect(a).unwrap(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Puzzle {
    pieces: Vec<Piece>,
    geometry: Geometry,
    listeners: Listeners,
}

impl Puzzle {
    /// An empty puzzle with default geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty puzzle with the given geometry.
    pub fn from_geometry(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    /// An empty puzzle with the given piece size and proximity.
    ///
    /// Returns `Err(PuzzleError::InvalidGeometry)` if `piece_size` is not
    /// positive and finite or `proximity` is negative or not finite.
    pub fn with_geometry(piece_size: f64, proximity: f64) -> Result<Self, PuzzleError> {
        Geometry::new(piece_size, proximity).map(Self::from_geometry)
    }

    /// Offset added to both coordinates of autogenerated positions.
    pub fn with_border_offset(mut self, offset: f64) -> Result<Self, PuzzleError> {
        self.geometry = self.geometry.with_border_offset(offset)?;
        Ok(self)
    }

    /// Puzzle-wide geometry.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Edge length of a piece.
    pub fn piece_size(&self) -> f64 {
        self.geometry.piece_size()
    }

    /// Maximum distance at which adjacent pieces may auto-connect.
    pub fn proximity(&self) -> f64 {
        self.geometry.proximity()
    }

    // ── Collection ──────────────────────────────────────────────

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the puzzle has no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// All pieces in insertion order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The first piece, if any.
    pub fn head(&self) -> Option<&Piece> {
        self.pieces.first()
    }

    /// Look up a piece.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Look up a piece mutably.
    ///
    /// Only metadata and position can be changed this way; links are
    /// managed by the connect and disconnect operations.
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index())
    }

    /// Find a piece by its key.
    pub fn find(&self, key: &PieceKey) -> Option<&Piece> {
        match key {
            PieceKey::ByIndex(n) => n
                .checked_sub(1)
                .and_then(|i| self.pieces.get(i))
                .filter(|p| p.metadata().id.is_none()),
            PieceKey::ById(id) => self
                .pieces
                .iter()
                .find(|p| p.metadata().id.as_deref() == Some(id.as_str())),
        }
    }

    /// Key of a piece, resolved once from its metadata.
    pub fn key_of(&self, id: PieceId) -> Result<PieceKey, PuzzleError> {
        self.get(id).map(Piece::key)
    }

    /// Append a piece with default metadata.
    pub fn new_piece(&mut self, structure: impl Into<Structure>) -> &mut Piece {
        self.new_piece_with(structure, Metadata::default())
    }

    /// Append a piece with the given metadata.
    ///
    /// # Panics
    ///
    /// Panics if the puzzle already holds `u32::MAX + 1` pieces.
    pub fn new_piece_with(
        &mut self,
        structure: impl Into<Structure>,
        metadata: Metadata,
    ) -> &mut Piece {
        let Ok(id) = PieceId::try_from(self.pieces.len()) else {
            panic!("puzzle is full: piece ids are u32");
        };
        let structure = structure.into();
        trace!(piece = %id, structure = %structure, "new piece");
        self.pieces.push(Piece::new(id, structure, metadata));
        &mut self.pieces[id.index()]
    }

    // ── Signals ─────────────────────────────────────────────────

    /// Register a listener for every connect and disconnect signal.
    ///
    /// Listeners run synchronously, in subscription order, inside the
    /// call that raised the signal.
    pub fn subscribe(&mut self, listener: impl FnMut(&Signal) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Register a listener for connect signals only.
    pub fn on_connect(&mut self, mut listener: impl FnMut(&Signal) + 'static) {
        self.subscribe(move |signal| {
            if signal.kind() == SignalKind::Connect {
                listener(signal);
            }
        });
    }

    /// Register a listener for disconnect signals only.
    pub fn on_disconnect(&mut self, mut listener: impl FnMut(&Signal) + 'static) {
        self.subscribe(move |signal| {
            if signal.kind() == SignalKind::Disconnect {
                listener(signal);
            }
        });
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Connection protocol ─────────────────────────────────────

    /// Join `left` to `right`, with `right` on the right of `left`.
    pub fn connect_horizontally(
        &mut self,
        left: PieceId,
        right: PieceId,
    ) -> Result<(), PuzzleError> {
        self.connect(left, Side::Right, right)
    }

    /// Join `up` to `down`, with `down` below `up`.
    pub fn connect_vertically(&mut self, up: PieceId, down: PieceId) -> Result<(), PuzzleError> {
        self.connect(up, Side::Down, down)
    }

    /// Join `target` to `piece` on `side` and raise a connect signal.
    ///
    /// Both links become connected. Pieces are not moved.
    ///
    /// # Errors
    ///
    /// - [`PuzzleError::UnknownPiece`] if either id is not in this puzzle
    /// - [`PuzzleError::SelfConnection`] if `piece == target`
    /// - [`PuzzleError::StructureMismatch`] if the touching sides do not interlock
    /// - [`PuzzleError::SideOccupied`] if either side is connected to another piece
    pub fn connect(
        &mut self,
        piece: PieceId,
        side: Side,
        target: PieceId,
    ) -> Result<(), PuzzleError> {
        let a = self.get(piece)?;
        let b = self.get(target)?;
        if piece == target {
            return Err(PuzzleError::SelfConnection(piece));
        }
        let facing = side.opposite();
        if !a.structure().fits(side, b.structure()) {
            return Err(PuzzleError::StructureMismatch {
                piece,
                side,
                piece_insert: a.structure().side(side),
                target,
                target_insert: b.structure().side(facing),
            });
        }
        self.check_free(piece, side, target)?;
        self.check_free(target, facing, piece)?;

        self.release(piece, side);
        self.release(target, facing);
        *self.pieces[piece.index()].link_mut(side) = Link {
            neighbor: Some(target),
            connected: true,
        };
        *self.pieces[target.index()].link_mut(facing) = Link {
            neighbor: Some(piece),
            connected: true,
        };

        debug!(piece = %piece, target = %target, side = %side, "connected");
        let signal = Signal::Connect {
            piece,
            piece_key: self.pieces[piece.index()].key(),
            target,
            target_key: self.pieces[target.index()].key(),
            side,
        };
        self.listeners.emit(&signal);
        Ok(())
    }

    /// Break every active link of `piece`.
    ///
    /// Raises one disconnect signal per broken link, in side order up,
    /// right, down, left, and returns how many links were broken. A second
    /// call breaks nothing and raises nothing.
    pub fn disconnect(&mut self, piece: PieceId) -> Result<usize, PuzzleError> {
        let broken: SmallVec<[(Side, PieceId); 4]> = self.get(piece)?.connected_sides().collect();
        for &(side, neighbor) in &broken {
            self.pieces[piece.index()].link_mut(side).connected = false;
            self.pieces[neighbor.index()]
                .link_mut(side.opposite())
                .connected = false;

            debug!(piece = %piece, neighbor = %neighbor, side = %side, "disconnected");
            let signal = Signal::Disconnect {
                piece,
                piece_key: self.pieces[piece.index()].key(),
                neighbor,
                neighbor_key: self.pieces[neighbor.index()].key(),
                side,
            };
            self.listeners.emit(&signal);
        }
        Ok(broken.len())
    }

    /// Disconnect every piece; returns the number of links broken.
    pub fn disassemble(&mut self) -> usize {
        let mut total = 0;
        for index in 0..self.pieces.len() {
            let id = self.pieces[index].id();
            total += self.disconnect(id).unwrap_or(0);
        }
        total
    }

    /// Fail if `side` of `piece` is connected to something other than `other`.
    fn check_free(&self, piece: PieceId, side: Side, other: PieceId) -> Result<(), PuzzleError> {
        match self.pieces[piece.index()].link(side).connected_neighbor() {
            Some(neighbor) if neighbor != other => Err(PuzzleError::SideOccupied {
                piece,
                side,
                neighbor,
            }),
            _ => Ok(()),
        }
    }

    /// Forget a stale neighbor on `side`, clearing its back-reference too.
    fn release(&mut self, piece: PieceId, side: Side) {
        if let Some(old) = self.pieces[piece.index()].neighbor(side) {
            let back = self.pieces[old.index()].link_mut(side.opposite());
            if back.neighbor == Some(piece) {
                *back = Link::default();
            }
        }
        *self.pieces[piece.index()].link_mut(side) = Link::default();
    }

    // ── Proximity ───────────────────────────────────────────────

    /// Whether `target` could be joined to `piece` on `side` right now.
    ///
    /// True when the touching sides interlock, neither side is connected
    /// to a third piece, and `target` sits within [`proximity`](Self::proximity)
    /// of the spot one piece size away from `piece` in direction `side`.
    pub fn can_connect(&self, piece: PieceId, side: Side, target: PieceId) -> bool {
        let (Some(a), Some(b)) = (self.piece(piece), self.piece(target)) else {
            return false;
        };
        if piece == target || !a.structure().fits(side, b.structure()) {
            return false;
        }
        if self.check_free(piece, side, target).is_err()
            || self.check_free(target, side.opposite(), piece).is_err()
        {
            return false;
        }
        let (dx, dy) = side.delta();
        let size = self.geometry.piece_size();
        let expected = a.central_anchor().translate(dx * size, dy * size);
        expected.is_close_to(b.central_anchor(), self.geometry.proximity())
    }

    /// [`can_connect`](Self::can_connect) with `right` on the right of `left`.
    pub fn can_connect_horizontally(&self, left: PieceId, right: PieceId) -> bool {
        self.can_connect(left, Side::Right, right)
    }

    /// [`can_connect`](Self::can_connect) with `down` below `up`.
    pub fn can_connect_vertically(&self, up: PieceId, down: PieceId) -> bool {
        self.can_connect(up, Side::Down, down)
    }

    /// Connect `piece` and `target` along the first eligible side.
    ///
    /// Sides are tried in up, right, down, left order. Returns the side of
    /// `piece` that was joined, or `None` if no side is eligible.
    pub fn try_connect(
        &mut self,
        piece: PieceId,
        target: PieceId,
    ) -> Result<Option<Side>, PuzzleError> {
        self.get(piece)?;
        self.get(target)?;
        match Side::ALL
            .into_iter()
            .find(|&side| self.can_connect(piece, side, target))
        {
            Some(side) => {
                self.connect(piece, side, target)?;
                Ok(Some(side))
            }
            None => Ok(None),
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// All pieces reachable from `piece` through active links, sorted by id.
    pub fn connected_group(&self, piece: PieceId) -> Result<Vec<PieceId>, PuzzleError> {
        self.get(piece)?;
        let mut visited = vec![false; self.pieces.len()];
        let mut queue = VecDeque::new();
        let mut group = Vec::new();

        visited[piece.index()] = true;
        queue.push_back(piece);
        while let Some(current) = queue.pop_front() {
            group.push(current);
            for (_, neighbor) in self.pieces[current.index()].connected_sides() {
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        group.sort();
        Ok(group)
    }

    /// Whether every piece is joined into a single group.
    pub fn is_assembled(&self) -> bool {
        match self.head() {
            Some(head) => self
                .connected_group(head.id())
                .map(|group| group.len() == self.pieces.len())
                .unwrap_or(false),
            None => false,
        }
    }

    // ── Generation ──────────────────────────────────────────────

    /// Replace the pieces with a fully assembled grid.
    ///
    /// Pieces are created row-major. Interior edges are chosen by the
    /// options' generator and always interlock; outer edges are borders.
    /// Each piece is placed at `(col, row) * piece_size + border_offset`
    /// unless a metadata entry overrides it, and every pair of grid
    /// neighbors starts connected. No signals are raised.
    ///
    /// Listeners stay registered.
    pub fn autogenerate(&mut self, options: AutogenerateOptions) -> Result<(), PuzzleError> {
        let count = options.validate()?;
        let rows = options.vertical_pieces_count;
        let cols = options.horizontal_pieces_count;
        let generator = options.generator.0.as_ref();
        let size = self.geometry.piece_size();
        let offset = self.geometry.border_offset();
        let mut patches = options.metadata.into_iter();

        let mut pieces = Vec::with_capacity(count);
        for (row, col) in grid::cells(rows, cols) {
            let structure = grid::structure_at(generator, row, col, rows, cols)?;
            let mut metadata = Metadata::default();
            metadata.place_at(
                Anchor::new(col as f64, row as f64)
                    .scale(size)
                    .translate(offset, offset),
            );
            if let Some(patch) = patches.next() {
                metadata.merge(patch);
            }
            let id = PieceId::try_from(pieces.len()).map_err(|_| PuzzleError::InvalidGrid {
                vertical: rows,
                horizontal: cols,
            })?;
            pieces.push(Piece::new(id, structure, metadata));
        }

        for (row, col) in grid::cells(rows, cols) {
            let here = grid::rank(row, col, cols);
            if col + 1 < cols {
                link_assembled(&mut pieces, here, Side::Right, here + 1);
            }
            if row + 1 < rows {
                link_assembled(&mut pieces, here, Side::Down, here + cols);
            }
        }

        self.pieces = pieces;
        debug!(rows, cols, pieces = self.pieces.len(), "autogenerated puzzle");
        Ok(())
    }

    /// Scatter every piece's current position at random.
    ///
    /// New positions are uniform over the central `factor` fraction of a
    /// `width × height` area: `factor = 1` uses the whole area, smaller
    /// factors keep pieces closer to the middle. Target positions and
    /// links are left untouched.
    pub fn shuffle<R: Rng>(
        &mut self,
        width: f64,
        height: f64,
        factor: f64,
        rng: &mut R,
    ) -> Result<(), PuzzleError> {
        if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
            return Err(PuzzleError::InvalidShuffleFactor { factor });
        }
        check_positive("width", width)?;
        check_positive("height", height)?;

        let span_x = width * factor;
        let span_y = height * factor;
        let min_x = (width - span_x) / 2.0;
        let min_y = (height - span_y) / 2.0;
        for piece in &mut self.pieces {
            let x = min_x + rng.random::<f64>() * span_x;
            let y = min_y + rng.random::<f64>() * span_y;
            piece.move_to(Anchor::new(x, y));
        }
        debug!(pieces = self.pieces.len(), factor, "shuffled puzzle");
        Ok(())
    }

    fn get(&self, id: PieceId) -> Result<&Piece, PuzzleError> {
        self.pieces.get(id.index()).ok_or(PuzzleError::UnknownPiece(id))
    }
}

/// Link two freshly generated grid neighbors, given by arena slot,
/// without raising signals.
fn link_assembled(pieces: &mut [Piece], piece: usize, side: Side, target: usize) {
    let (piece_id, target_id) = (pieces[piece].id(), pieces[target].id());
    *pieces[piece].link_mut(side) = Link {
        neighbor: Some(target_id),
        connected: true,
    };
    *pieces[target].link_mut(side.opposite()) = Link {
        neighbor: Some(piece_id),
        connected: true,
    };
}
