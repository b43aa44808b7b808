//! Reusable canvas and puzzle fixtures.

use std::cell::RefCell;
use std::rc::Rc;

use jigsaw_canvas::{Canvas, CanvasConfig, RenderStyle};
use jigsaw_puzzle::{Puzzle, Signal, SignalKind};

use crate::DummyPainter;

/// Seed used by [`standard_config`].
pub const STANDARD_SEED: u64 = 0x5EED;

/// 800×800 canvas, piece size 100, proximity 20, border fill 10,
/// stroke width 2, line softness 0.12, seeded RNG.
pub fn standard_config() -> CanvasConfig {
    CanvasConfig {
        width: 800.0,
        height: 800.0,
        piece_size: 100.0,
        proximity: 20.0,
        style: RenderStyle {
            border_fill: 10.0,
            stroke_width: 2.0,
            line_softness: 0.12,
            stroke_color: "red".to_owned(),
        },
        seed: Some(STANDARD_SEED),
    }
}

/// A canvas built from [`standard_config`] with a fresh [`DummyPainter`].
pub fn standard_canvas() -> Canvas<DummyPainter> {
    match Canvas::new(standard_config(), DummyPainter::new()) {
        Ok(canvas) => canvas,
        Err(e) => panic!("standard config must be valid: {e}"),
    }
}

/// Shared log of puzzle signals.
#[derive(Clone, Debug, Default)]
pub struct SignalLog {
    entries: Rc<RefCell<Vec<Signal>>>,
}

impl SignalLog {
    /// Subscribe a new log to every signal `puzzle` raises.
    pub fn attach(puzzle: &mut Puzzle) -> Self {
        let log = Self::default();
        let sink = Rc::clone(&log.entries);
        puzzle.subscribe(move |signal| sink.borrow_mut().push(signal.clone()));
        log
    }

    /// Copy of everything recorded so far.
    pub fn signals(&self) -> Vec<Signal> {
        self.entries.borrow().clone()
    }

    /// Number of recorded signals.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no signal was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Number of recorded signals of `kind`.
    pub fn count(&self, kind: SignalKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|s| s.kind() == kind)
            .count()
    }
}
