//! Core types for the jigsaw puzzle engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types shared by the rest of the workspace: positions
//! ([`Anchor`]), edge shapes ([`Insert`], [`Structure`]), piece
//! addressing ([`PieceId`], [`PieceKey`]), per-piece [`Metadata`] and
//! the [`PuzzleError`] taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod anchor;
pub mod error;
pub mod id;
pub mod metadata;
pub mod structure;

pub use anchor::Anchor;
pub use error::PuzzleError;
pub use id::{PieceId, PieceKey};
pub use metadata::{Hint, Metadata, MetadataPatch};
pub use structure::{compatible, Insert, Side, Structure};
