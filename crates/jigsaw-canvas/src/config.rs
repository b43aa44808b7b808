//! Canvas configuration, validation, and error types.
//!
//! [`CanvasConfig`] is the plain configuration record; [`CanvasBuilder`]
//! fills it in step by step, takes the painter, and validates everything
//! in [`build()`](CanvasBuilder::build).

use std::error::Error;
use std::fmt;

use jigsaw_core::PuzzleError;
use jigsaw_puzzle::Geometry;

use crate::canvas::Canvas;
use crate::painter::Painter;

// ── RenderStyle ────────────────────────────────────────────────────

/// Rendering hints handed to the painter untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Margin painted around each piece. Also offsets autogenerated
    /// positions. Default: 0.
    pub border_fill: f64,
    /// Outline width. Default: 3.
    pub stroke_width: f64,
    /// Curvature of tab outlines, 0 for sharp corners. Default: 0.
    pub line_softness: f64,
    /// Outline color. Default: `"black"`.
    pub stroke_color: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            border_fill: 0.0,
            stroke_width: 3.0,
            line_softness: 0.0,
            stroke_color: "black".to_owned(),
        }
    }
}

// ── CanvasConfig ───────────────────────────────────────────────────

/// Everything a canvas needs besides its painter.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
    /// Canvas width; bounds shuffling.
    pub width: f64,
    /// Canvas height; bounds shuffling.
    pub height: f64,
    /// Edge length of a piece. Default: 50.
    pub piece_size: f64,
    /// Auto-connect distance. Default: 1.
    pub proximity: f64,
    /// Hints passed to the painter.
    pub style: RenderStyle,
    /// Seed for the shuffle RNG. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl CanvasConfig {
    /// A `width × height` canvas with default geometry and style.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            piece_size: Geometry::DEFAULT_PIECE_SIZE,
            proximity: Geometry::DEFAULT_PROXIMITY,
            style: RenderStyle::default(),
            seed: None,
        }
    }

    /// Check structural invariants and derive the puzzle geometry.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        for (name, value) in [
            ("stroke_width", self.style.stroke_width),
            ("line_softness", self.style.line_softness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidStyle { name, value });
            }
        }
        let geometry = Geometry::new(self.piece_size, self.proximity)?
            .with_border_offset(self.style.border_fill)?;
        Ok(geometry)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building a canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// No painter was supplied.
    MissingPainter,
    /// Width or height is not positive and finite.
    InvalidDimension {
        /// Which dimension.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A style value is negative or not finite.
    InvalidStyle {
        /// Which style value.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Piece size, proximity or border fill was rejected.
    Geometry(PuzzleError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPainter => write!(f, "canvas requires a painter"),
            Self::InvalidDimension { name, value } => {
                write!(f, "canvas {name} must be positive and finite, got {value}")
            }
            Self::InvalidStyle { name, value } => {
                write!(f, "{name} must be non-negative and finite, got {value}")
            }
            Self::Geometry(e) => write!(f, "invalid geometry: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PuzzleError> for ConfigError {
    fn from(e: PuzzleError) -> Self {
        Self::Geometry(e)
    }
}

// ── CanvasBuilder ──────────────────────────────────────────────────

/// Builder for [`Canvas`].
///
/// Required: the painter. Everything else has a default.
///
/// ```
/// use jigsaw_canvas::{CanvasBuilder, ConfigError};
/// use jigsaw_test_utils::DummyPainter;
///
/// let canvas = CanvasBuilder::new(800.0, 800.0)
///     .piece_size(100.0)
///     .proximity(20.0)
///     .painter(DummyPainter::new())
///     .build()
///     .unwrap();
/// assert_eq!(canvas.piece_size(), 100.0);
///
/// let missing = CanvasBuilder::<DummyPainter>::new(800.0, 800.0).build();
/// assert_eq!(missing.err(), Some(ConfigError::MissingPainter));
/// ```
pub struct CanvasBuilder<P> {
    config: CanvasConfig,
    painter: Option<P>,
}

impl<P: Painter> CanvasBuilder<P> {
    /// Start a `width × height` canvas.
    pub fn new(width: f64, height: f64) -> Self {
        Self::from_config(CanvasConfig::new(width, height))
    }

    /// Start from an existing configuration.
    pub fn from_config(config: CanvasConfig) -> Self {
        Self {
            config,
            painter: None,
        }
    }

    /// Set the piece size.
    pub fn piece_size(mut self, piece_size: f64) -> Self {
        self.config.piece_size = piece_size;
        self
    }

    /// Set the auto-connect distance.
    pub fn proximity(mut self, proximity: f64) -> Self {
        self.config.proximity = proximity;
        self
    }

    /// Set the border fill.
    pub fn border_fill(mut self, border_fill: f64) -> Self {
        self.config.style.border_fill = border_fill;
        self
    }

    /// Set the outline width.
    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.config.style.stroke_width = stroke_width;
        self
    }

    /// Set the tab curvature.
    pub fn line_softness(mut self, line_softness: f64) -> Self {
        self.config.style.line_softness = line_softness;
        self
    }

    /// Set the outline color.
    pub fn stroke_color(mut self, stroke_color: impl Into<String>) -> Self {
        self.config.style.stroke_color = stroke_color.into();
        self
    }

    /// Seed the shuffle RNG for reproducible layouts.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the painter.
    pub fn painter(mut self, painter: P) -> Self {
        self.painter = Some(painter);
        self
    }

    /// Validate the configuration and build the canvas.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingPainter`] if no painter was set
    /// - [`ConfigError::InvalidDimension`] for a bad width or height
    /// - [`ConfigError::InvalidStyle`] for a bad stroke width or softness
    /// - [`ConfigError::Geometry`] for a bad piece size, proximity or border fill
    pub fn build(self) -> Result<Canvas<P>, ConfigError> {
        let painter = self.painter.ok_or(ConfigError::MissingPainter)?;
        Canvas::new(self.config, painter)
    }
}
