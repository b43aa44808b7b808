//! Jigsaw: a headless jigsaw puzzle engine.
//!
//! This is the facade crate that re-exports the public API of the jigsaw
//! sub-crates. Adding `jigsaw` as a single dependency is enough for most
//! users.
//!
//! # Quick start
//!
//! ```rust
//! use jigsaw::prelude::*;
//! use jigsaw_test_utils::DummyPainter;
//!
//! let mut canvas = Canvas::builder(800.0, 800.0)
//!     .piece_size(100.0)
//!     .proximity(20.0)
//!     .seed(42)
//!     .painter(DummyPainter::new())
//!     .build()
//!     .unwrap();
//!
//! canvas
//!     .autogenerate(AutogenerateOptions::new(3, 3).inserts_generator(flipflop))
//!     .unwrap();
//! canvas.shuffle(0.8).unwrap();
//! canvas.draw();
//! assert_eq!(canvas.figure_count(), 9);
//!
//! canvas.on_disconnect(|event| {
//!     assert!(event.figure.is_some());
//! });
//! assert_eq!(canvas.disconnect(PieceId(4)).unwrap(), 4);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `jigsaw-core` | Anchors, inserts, structures, ids, metadata, errors |
//! | [`puzzle`] | `jigsaw-puzzle` | Pieces, puzzle graph, signals, generators |
//! | [`canvas`] | `jigsaw-canvas` | Canvas, configuration, painter trait, events |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Value types and errors (`jigsaw-core`).
///
/// [`types::Structure`] and its compact notation, [`types::Anchor`],
/// [`types::PieceKey`] and [`types::Metadata`].
pub use jigsaw_core as types;

/// Puzzle graph (`jigsaw-puzzle`).
///
/// [`puzzle::Puzzle`] owns its pieces and runs the connection protocol.
pub use jigsaw_puzzle as puzzle;

/// Render synchronization (`jigsaw-canvas`).
///
/// [`canvas::Canvas`] ties a puzzle to a [`canvas::Painter`].
pub use jigsaw_canvas as canvas;

/// Common imports for typical jigsaw usage.
///
/// ```rust
/// use jigsaw::prelude::*;
/// ```
pub mod prelude {
    // Core values
    pub use jigsaw_core::{
        Anchor, Hint, Insert, Metadata, MetadataPatch, PieceId, PieceKey, Side, Structure,
    };

    // Errors
    pub use jigsaw_canvas::ConfigError;
    pub use jigsaw_core::PuzzleError;

    // Puzzle
    pub use jigsaw_puzzle::{
        flipflop, AutogenerateOptions, Boundary, InsertsGenerator, Piece, Puzzle, Signal,
        SignalKind,
    };

    // Canvas
    pub use jigsaw_canvas::{
        Canvas, CanvasBuilder, CanvasConfig, ConnectEvent, DisconnectEvent, Painter,
        PieceDescriptor, RenderStyle,
    };
}
