//! The canvas: one puzzle, one painter, and the figures between them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use jigsaw_core::{MetadataPatch, PieceId, PieceKey, PuzzleError, Side, Structure};
use jigsaw_puzzle::{AutogenerateOptions, Geometry, Piece, Puzzle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::config::{CanvasBuilder, CanvasConfig, ConfigError};
use crate::event::{ConnectEvent, DisconnectEvent};
use crate::painter::Painter;
use crate::relay::{Relay, SharedRelay};

/// Ratio of canvas piece size and proximity to those of its puzzle.
///
/// Holds both ways: a lazily created puzzle gets the canvas geometry
/// divided by it, and [`Canvas::render_puzzle`] multiplies the adopted
/// puzzle's geometry by it.
pub const ADOPTED_GEOMETRY_SCALE: f64 = 2.0;

/// A piece to add to the canvas puzzle with [`Canvas::sketch_piece`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceDescriptor {
    /// Inserts on the four sides.
    pub structure: Structure,
    /// Id, positions and hints; unset positions use the defaults of
    /// [`MetadataPatch::resolve`].
    pub metadata: MetadataPatch,
}

impl PieceDescriptor {
    /// Describe a piece.
    pub fn new(structure: impl Into<Structure>, metadata: MetadataPatch) -> Self {
        Self {
            structure: structure.into(),
            metadata,
        }
    }
}

/// Keeps a puzzle and its painted figures in sync.
///
/// The puzzle is created lazily the first time it is needed and dropped
/// again by [`clear`](Self::clear). Its piece size and proximity are always
/// the canvas values divided by [`ADOPTED_GEOMETRY_SCALE`]. Figures are keyed
/// by [`PieceKey`], so a piece with metadata id `"a"` is found under
/// `PieceKey::ById("a")` and any other piece under its 1-based position.
///
/// Canvas listeners registered with [`on_connect`](Self::on_connect) and
/// [`on_disconnect`](Self::on_disconnect) survive `clear` and are attached
/// to every puzzle the canvas owns.
pub struct Canvas<P: Painter> {
    config: CanvasConfig,
    geometry: Geometry,
    painter: P,
    puzzle: Option<Puzzle>,
    relay: SharedRelay<P::Figure>,
    rng: ChaCha8Rng,
    drawn: bool,
}

impl<P: Painter> Canvas<P> {
    /// Validate `config` and build a canvas around `painter`.
    pub fn new(config: CanvasConfig, painter: P) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        debug!(
            width = config.width,
            height = config.height,
            piece_size = geometry.piece_size(),
            proximity = geometry.proximity(),
            "canvas created"
        );
        Ok(Self {
            config,
            geometry,
            painter,
            puzzle: None,
            relay: Rc::new(RefCell::new(Relay::default())),
            rng,
            drawn: false,
        })
    }

    /// Start building a `width × height` canvas.
    pub fn builder(width: f64, height: f64) -> CanvasBuilder<P> {
        CanvasBuilder::new(width, height)
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The configuration the canvas was built with.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Canvas width.
    pub fn width(&self) -> f64 {
        self.config.width
    }

    /// Canvas height.
    pub fn height(&self) -> f64 {
        self.config.height
    }

    /// Current piece size. Changes when a puzzle is adopted.
    pub fn piece_size(&self) -> f64 {
        self.geometry.piece_size()
    }

    /// Current auto-connect distance. Changes when a puzzle is adopted.
    pub fn proximity(&self) -> f64 {
        self.geometry.proximity()
    }

    /// The painter.
    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// The painter, mutably.
    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    /// Whether [`draw`](Self::draw) ran since the last reset.
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    // ── Puzzle ──────────────────────────────────────────────────

    /// The puzzle, created empty if absent.
    ///
    /// Read-only so figures cannot fall out of step with the pieces; change
    /// the puzzle through the canvas methods instead.
    pub fn puzzle(&mut self) -> &Puzzle {
        self.puzzle_mut()
    }

    fn puzzle_mut(&mut self) -> &mut Puzzle {
        ensure_puzzle(&mut self.puzzle, self.geometry, &self.relay)
    }

    /// A piece of the puzzle, mutably, for moving it around.
    pub fn piece_mut(&mut self, piece: PieceId) -> Option<&mut Piece> {
        self.puzzle.as_mut()?.piece_mut(piece)
    }

    /// The puzzle, if one exists. Never creates one.
    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Add one piece to the puzzle without drawing it.
    pub fn sketch_piece(&mut self, descriptor: PieceDescriptor) -> PieceId {
        let PieceDescriptor {
            structure,
            metadata,
        } = descriptor;
        self.puzzle_mut().new_piece_with(structure, metadata.resolve()).id()
    }

    /// Adopt a pre-built puzzle.
    ///
    /// The canvas piece size and proximity become the puzzle's values times
    /// [`ADOPTED_GEOMETRY_SCALE`]. Existing figures are forgotten.
    pub fn render_puzzle(&mut self, mut puzzle: Puzzle) {
        self.geometry = puzzle.geometry().scaled(ADOPTED_GEOMETRY_SCALE);
        attach(&self.relay, &mut puzzle);
        self.relay.borrow_mut().figures.clear();
        self.drawn = false;
        debug!(
            pieces = puzzle.len(),
            piece_size = self.geometry.piece_size(),
            proximity = self.geometry.proximity(),
            "adopted puzzle"
        );
        self.puzzle = Some(puzzle);
    }

    /// Replace the puzzle's pieces with an assembled grid.
    ///
    /// Existing figures are forgotten; nothing is drawn until
    /// [`draw`](Self::draw).
    pub fn autogenerate(&mut self, options: AutogenerateOptions) -> Result<(), PuzzleError> {
        self.puzzle_mut().autogenerate(options)?;
        self.relay.borrow_mut().figures.clear();
        self.drawn = false;
        Ok(())
    }

    /// Scatter pieces over the central `factor` fraction of the canvas.
    pub fn shuffle(&mut self, factor: f64) -> Result<(), PuzzleError> {
        let (width, height) = (self.config.width, self.config.height);
        ensure_puzzle(&mut self.puzzle, self.geometry, &self.relay).shuffle(
            width,
            height,
            factor,
            &mut self.rng,
        )
    }

    /// Join `target` to `piece` on `side` in the puzzle.
    pub fn connect(
        &mut self,
        piece: PieceId,
        side: Side,
        target: PieceId,
    ) -> Result<(), PuzzleError> {
        self.puzzle_mut().connect(piece, side, target)
    }

    /// Join `piece` and `target` along the first eligible side, if any.
    pub fn try_connect(
        &mut self,
        piece: PieceId,
        target: PieceId,
    ) -> Result<Option<Side>, PuzzleError> {
        self.puzzle_mut().try_connect(piece, target)
    }

    /// Join `left` to `right` in the puzzle.
    pub fn connect_horizontally(
        &mut self,
        left: PieceId,
        right: PieceId,
    ) -> Result<(), PuzzleError> {
        self.puzzle_mut().connect_horizontally(left, right)
    }

    /// Join `up` to `down` in the puzzle.
    pub fn connect_vertically(&mut self, up: PieceId, down: PieceId) -> Result<(), PuzzleError> {
        self.puzzle_mut().connect_vertically(up, down)
    }

    /// Break every active link of `piece`; returns how many were broken.
    pub fn disconnect(&mut self, piece: PieceId) -> Result<usize, PuzzleError> {
        self.puzzle_mut().disconnect(piece)
    }

    /// Break every link in the puzzle; returns how many were broken.
    pub fn disassemble(&mut self) -> usize {
        self.puzzle.as_mut().map_or(0, Puzzle::disassemble)
    }

    // ── Figures ─────────────────────────────────────────────────

    /// Sketch a figure for every piece that has none, then flush.
    ///
    /// Calling it again without changes sketches nothing new.
    pub fn draw(&mut self) {
        let mut sketched = 0;
        if let Some(puzzle) = &self.puzzle {
            let mut relay = self.relay.borrow_mut();
            for piece in puzzle.pieces() {
                let key = piece.key();
                if !relay.figures.contains_key(&key) {
                    let figure = self.painter.sketch(piece, &self.config.style);
                    relay.figures.insert(key, figure);
                    sketched += 1;
                }
            }
        }
        self.painter.draw();
        self.drawn = true;
        debug!(sketched, figures = self.figure_count(), "drew canvas");
    }

    /// Figure of `piece`, if it has been drawn.
    pub fn figure(&self, piece: PieceId) -> Option<P::Figure> {
        let key = self.puzzle.as_ref()?.key_of(piece).ok()?;
        self.figure_by_key(&key)
    }

    /// Figure stored under `key`, if any.
    pub fn figure_by_key(&self, key: &PieceKey) -> Option<P::Figure> {
        self.relay.borrow().figures.get(key).cloned()
    }

    /// Number of stored figures.
    pub fn figure_count(&self) -> usize {
        self.relay.borrow().figures.len()
    }

    /// Keys that currently have a figure, in drawing order.
    pub fn figure_keys(&self) -> Vec<PieceKey> {
        self.relay.borrow().figures.keys().cloned().collect()
    }

    /// Drop the puzzle and every figure. The painter and canvas listeners
    /// are kept.
    pub fn clear(&mut self) {
        self.puzzle = None;
        self.relay.borrow_mut().figures.clear();
        self.drawn = false;
        debug!("cleared canvas");
    }

    // ── Events ──────────────────────────────────────────────────

    /// Register a listener for connect events.
    pub fn on_connect(&mut self, listener: impl FnMut(&ConnectEvent<'_, P::Figure>) + 'static) {
        self.relay.borrow_mut().on_connect(Box::new(listener));
    }

    /// Register a listener for disconnect events.
    ///
    /// A disconnect breaking `k` links raises `k` events, in side order up,
    /// right, down, left.
    pub fn on_disconnect(
        &mut self,
        listener: impl FnMut(&DisconnectEvent<'_, P::Figure>) + 'static,
    ) {
        self.relay.borrow_mut().on_disconnect(Box::new(listener));
    }

    /// Number of canvas listeners of either kind.
    pub fn listener_count(&self) -> usize {
        self.relay.borrow().listener_count()
    }
}

/// The puzzle in `slot`, created from the canvas `geometry` and attached
/// if absent.
fn ensure_puzzle<'a, F: 'static>(
    slot: &'a mut Option<Puzzle>,
    geometry: Geometry,
    relay: &SharedRelay<F>,
) -> &'a mut Puzzle {
    slot.get_or_insert_with(|| {
        let mut puzzle = Puzzle::from_geometry(geometry.scaled(ADOPTED_GEOMETRY_SCALE.recip()));
        attach(relay, &mut puzzle);
        trace!("created empty puzzle");
        puzzle
    })
}

/// Forward `puzzle`'s signals through the shared relay.
fn attach<F: 'static>(relay: &SharedRelay<F>, puzzle: &mut Puzzle) {
    let relay = Rc::clone(relay);
    puzzle.subscribe(move |signal| relay.borrow_mut().dispatch(signal));
}

impl<P: Painter + fmt::Debug> fmt::Debug for Canvas<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("painter", &self.painter)
            .field("puzzle", &self.puzzle)
            .field("relay", &self.relay.borrow())
            .field("drawn", &self.drawn)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jigsaw_core::{Anchor, Insert};

    use crate::config::RenderStyle;

    /// Figures are the sketch order; `draw` calls are counted.
    #[derive(Debug, Default)]
    struct Counter {
        sketched: usize,
        flushed: usize,
    }

    impl Painter for Counter {
        type Figure = usize;

        fn sketch(&mut self, _piece: &Piece, _style: &RenderStyle) -> usize {
            self.sketched += 1;
            self.sketched
        }

        fn draw(&mut self) {
            self.flushed += 1;
        }
    }

    fn canvas() -> Canvas<Counter> {
        let mut config = CanvasConfig::new(400.0, 400.0);
        config.seed = Some(1);
        Canvas::new(config, Counter::default()).unwrap()
    }

    #[test]
    fn puzzle_is_lazy() {
        let mut canvas = canvas();
        assert!(canvas.current_puzzle().is_none());
        assert!(canvas.puzzle().is_empty());
        assert!(canvas.current_puzzle().is_some());
        assert_eq!(
            canvas.puzzle().piece_size(),
            Geometry::DEFAULT_PIECE_SIZE / ADOPTED_GEOMETRY_SCALE
        );
        assert_eq!(canvas.piece_size(), Geometry::DEFAULT_PIECE_SIZE);
    }

    #[test]
    fn canvas_to_puzzle_ratio_survives_adopt_and_clear() {
        let mut config = CanvasConfig::new(400.0, 400.0);
        config.piece_size = 100.0;
        config.proximity = 20.0;
        let mut canvas = Canvas::new(config, Counter::default()).unwrap();
        let ratio = |c: &mut Canvas<Counter>| c.piece_size() / c.puzzle().piece_size();

        assert_eq!(canvas.puzzle().piece_size(), 50.0);
        assert_eq!(canvas.puzzle().proximity(), 10.0);
        let owned = ratio(&mut canvas);

        canvas.render_puzzle(Puzzle::with_geometry(100.0, 20.0).unwrap());
        let adopted = ratio(&mut canvas);
        assert_eq!(owned, adopted);
        assert_eq!(canvas.piece_size(), 200.0);

        canvas.clear();
        assert_eq!(canvas.puzzle().piece_size(), 100.0);
        assert_eq!(ratio(&mut canvas), adopted);
    }

    #[test]
    fn autogenerate_lays_out_at_puzzle_piece_size() {
        let mut canvas = canvas();
        canvas.autogenerate(AutogenerateOptions::new(1, 2)).unwrap();
        let step = canvas.piece_size() / ADOPTED_GEOMETRY_SCALE;
        let xs: Vec<f64> = canvas
            .puzzle()
            .pieces()
            .iter()
            .map(|p| p.central_anchor().x)
            .collect();
        assert_eq!(xs, [0.0, step]);
    }

    #[test]
    fn draw_sketches_each_piece_once() {
        let mut canvas = canvas();
        canvas.autogenerate(AutogenerateOptions::new(2, 2)).unwrap();
        canvas.draw();
        canvas.draw();
        assert_eq!(canvas.painter().sketched, 4);
        assert_eq!(canvas.painter().flushed, 2);
        assert_eq!(canvas.figure_count(), 4);
        assert_eq!(canvas.figure(PieceId(3)), Some(4));
        assert_eq!(canvas.figure(PieceId(4)), None);

        canvas.sketch_piece(PieceDescriptor::new("----", MetadataPatch::new().id("x")));
        canvas.draw();
        assert_eq!(canvas.painter().sketched, 5);
        assert_eq!(canvas.figure_by_key(&PieceKey::from("x")), Some(5));
    }

    #[test]
    fn sketch_piece_resolves_positions() {
        let mut canvas = canvas();
        let id = canvas.sketch_piece(PieceDescriptor::new(
            Structure {
                right: Insert::Tab,
                ..Structure::default()
            },
            MetadataPatch::new().target_position(Anchor::new(10.0, 15.0)),
        ));
        let piece = canvas.puzzle().piece(id).unwrap();
        assert_eq!(piece.central_anchor(), Anchor::new(10.0, 15.0));
        assert_eq!(piece.key(), PieceKey::ByIndex(1));
        assert!(!canvas.is_drawn());
    }

    #[test]
    fn render_puzzle_scales_geometry() {
        let mut canvas = canvas();
        canvas.render_puzzle(Puzzle::with_geometry(13.0, 7.0).unwrap());
        assert_eq!(canvas.piece_size(), 26.0);
        assert_eq!(canvas.proximity(), 14.0);
        assert_eq!(canvas.puzzle().piece_size(), 13.0);
    }

    #[test]
    fn puzzle_changes_go_through_the_canvas() {
        let mut canvas = canvas();
        canvas.autogenerate(AutogenerateOptions::new(1, 3)).unwrap();
        canvas.draw();
        assert_eq!(canvas.figure_count(), 3);

        // Regenerating through the canvas drops figures of the old pieces.
        canvas.autogenerate(AutogenerateOptions::new(1, 2)).unwrap();
        assert_eq!(canvas.figure_count(), 0);
        assert!(!canvas.is_drawn());

        assert_eq!(canvas.disassemble(), 1);
        assert_eq!(canvas.try_connect(PieceId(0), PieceId(1)), Ok(Some(Side::Right)));
        canvas.disconnect(PieceId(0)).unwrap();
        canvas.connect(PieceId(1), Side::Left, PieceId(0)).unwrap();
        assert!(canvas.puzzle().is_assembled());

        canvas.piece_mut(PieceId(1)).unwrap().translate(5.0, 0.0);
        assert!(canvas.piece_mut(PieceId(7)).is_none());
    }

    #[test]
    fn clear_keeps_painter_and_listeners() {
        let mut canvas = canvas();
        canvas.on_disconnect(|_| {});
        canvas.autogenerate(AutogenerateOptions::new(1, 2)).unwrap();
        canvas.draw();
        canvas.clear();
        assert!(canvas.current_puzzle().is_none());
        assert_eq!(canvas.figure_count(), 0);
        assert_eq!(canvas.painter().sketched, 2);
        assert_eq!(canvas.listener_count(), 1);
        assert!(canvas.figure_keys().is_empty());
    }

    #[test]
    fn shuffle_stays_on_canvas() {
        let mut canvas = canvas();
        canvas.autogenerate(AutogenerateOptions::new(3, 3)).unwrap();
        canvas.shuffle(0.5).unwrap();
        for piece in canvas.puzzle().pieces() {
            let pos = piece.central_anchor();
            assert!((100.0..=300.0).contains(&pos.x));
            assert!((100.0..=300.0).contains(&pos.y));
        }
        assert!(canvas.shuffle(2.0).is_err());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = CanvasConfig::new(-1.0, 400.0);
        assert!(matches!(
            Canvas::new(config, Counter::default()),
            Err(ConfigError::InvalidDimension { name: "width", .. })
        ));
    }
}
