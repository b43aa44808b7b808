//! Puzzle graph for the jigsaw engine.
//!
//! A [`Puzzle`] owns its [`Piece`]s in an arena addressed by
//! [`PieceId`](jigsaw_core::PieceId). Each piece has four neighbor
//! [`Link`]s stored as ids, so the graph has no ownership cycles.
//!
//! # Operations
//!
//! - authoring: [`Puzzle::new_piece`], [`Piece::place_at`]
//! - grid generation: [`Puzzle::autogenerate`] with an [`InsertsGenerator`]
//! - connections: [`Puzzle::connect_horizontally`],
//!   [`Puzzle::connect_vertically`], [`Puzzle::disconnect`]
//! - scattering: [`Puzzle::shuffle`]
//!
//! Every connect and disconnect raises a [`Signal`], delivered
//! synchronously to subscribers in subscription order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod generators;
pub mod geometry;
pub mod grid;
pub mod piece;
pub mod puzzle;
pub mod signal;

pub use generators::{fixed_tab, flipflop, twoandtwo, Boundary, InsertsGenerator, SeededInserts};
pub use geometry::Geometry;
pub use grid::AutogenerateOptions;
pub use piece::{Link, Piece};
pub use puzzle::Puzzle;
pub use signal::{Signal, SignalKind, SignalListener};
