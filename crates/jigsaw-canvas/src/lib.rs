//! Render synchronization for the jigsaw engine.
//!
//! A [`Canvas`] owns one [`Puzzle`](jigsaw_puzzle::Puzzle) and a
//! [`Painter`]. Drawing asks the painter for one opaque figure per piece
//! and remembers it under the piece's [`PieceKey`](jigsaw_core::PieceKey).
//! Connect and disconnect signals from the puzzle are re-broadcast as
//! [`ConnectEvent`]s and [`DisconnectEvent`]s that carry those figures.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod canvas;
pub mod config;
pub mod event;
pub mod painter;
mod relay;

pub use canvas::{Canvas, PieceDescriptor, ADOPTED_GEOMETRY_SCALE};
pub use config::{CanvasBuilder, CanvasConfig, ConfigError, RenderStyle};
pub use event::{ConnectEvent, ConnectListener, DisconnectEvent, DisconnectListener};
pub use painter::Painter;
