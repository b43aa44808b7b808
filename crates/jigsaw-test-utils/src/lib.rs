//! Test doubles and fixtures for jigsaw development.
//!
//! - [`DummyPainter`]: a [`Painter`] that draws nothing and counts figures.
//! - [`standard_canvas`]: the 800×800 canvas most scenarios start from.
//! - [`SignalLog`]: records every puzzle signal for later assertions.
//! - [`init_tracing`]: opt-in log output for a test run.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{standard_canvas, standard_config, SignalLog};

use jigsaw_canvas::{Painter, RenderStyle};
use jigsaw_core::PieceKey;
use jigsaw_puzzle::Piece;

/// Figure produced by [`DummyPainter`].
///
/// `serial` is the 1-based sketch count at the time it was made, so two
/// figures compare equal only if they are the same sketch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DummyFigure {
    /// 1-based order in which the painter sketched it.
    pub serial: usize,
    /// Key of the piece it depicts.
    pub key: PieceKey,
}

/// Painter that records what it was asked to do.
#[derive(Debug, Default)]
pub struct DummyPainter {
    /// Number of figures sketched so far.
    pub figures: usize,
    /// Whether [`Painter::draw`] has been called.
    pub drawn: bool,
    /// Stroke color seen on the last sketch.
    pub last_stroke_color: Option<String>,
}

impl DummyPainter {
    /// A painter that has sketched and drawn nothing.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Painter for DummyPainter {
    type Figure = DummyFigure;

    fn sketch(&mut self, piece: &Piece, style: &RenderStyle) -> DummyFigure {
        self.figures += 1;
        self.last_stroke_color = Some(style.stroke_color.clone());
        DummyFigure {
            serial: self.figures,
            key: piece.key(),
        }
    }

    fn draw(&mut self) {
        self.drawn = true;
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
