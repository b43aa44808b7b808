//! Per-piece metadata: identity, positions and free-form rendering hints.

use indexmap::IndexMap;

use crate::anchor::Anchor;

/// A free-form rendering hint value (color, label, ...).
///
/// The engine never interprets hints; they are handed to the painter
/// exactly as supplied.
#[derive(Clone, Debug, PartialEq)]
pub enum Hint {
    /// A boolean flag.
    Flag(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// A nested group of hints, e.g. `label: { text: "a" }`.
    Group(IndexMap<String, Hint>),
}

impl Hint {
    /// Build a group from `(name, value)` pairs.
    pub fn group<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Hint>,
    {
        Self::Group(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a member of a group hint.
    pub fn get(&self, name: &str) -> Option<&Hint> {
        match self {
            Self::Group(members) => members.get(name),
            _ => None,
        }
    }

    /// The string value, if this is a text hint.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value, if this is a number hint.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for Hint {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<f64> for Hint {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Hint {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Hint {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Resolved metadata attached to every piece.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    /// Explicit id. When absent the piece is addressed positionally.
    pub id: Option<String>,
    /// Where the piece currently sits.
    pub current_position: Anchor,
    /// Where the piece belongs when the puzzle is solved.
    pub target_position: Anchor,
    /// Rendering hints passed through to the painter.
    pub hints: IndexMap<String, Hint>,
}

impl Metadata {
    /// Look up a rendering hint by name.
    pub fn hint(&self, name: &str) -> Option<&Hint> {
        self.hints.get(name)
    }

    /// Set both positions to `anchor`.
    pub fn place_at(&mut self, anchor: Anchor) {
        self.current_position = anchor;
        self.target_position = anchor;
    }

    /// Apply the fields `patch` specifies, leaving every other field as is.
    ///
    /// A patch carrying only a target position moves the current position
    /// along with it, so that a freshly placed piece starts on its target.
    pub fn merge(&mut self, patch: MetadataPatch) {
        if let Some(id) = patch.id {
            self.id = Some(id);
        }
        match (patch.current_position, patch.target_position) {
            (Some(current), Some(target)) => {
                self.current_position = current;
                self.target_position = target;
            }
            (Some(current), None) => self.current_position = current,
            (None, Some(target)) => self.place_at(target),
            (None, None) => {}
        }
        self.hints.extend(patch.hints);
    }
}

/// Partially specified metadata, as supplied by callers.
///
/// Resolution rules: a missing target defaults to the origin and a
/// missing current position defaults to the resolved target.
///
/// ```
/// use jigsaw_core::{Anchor, MetadataPatch};
///
/// let meta = MetadataPatch::new()
///     .id("a")
///     .target_position(Anchor::new(10.0, 15.0))
///     .resolve();
/// assert_eq!(meta.current_position, Anchor::new(10.0, 15.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataPatch {
    /// Explicit id.
    pub id: Option<String>,
    /// Current position.
    pub current_position: Option<Anchor>,
    /// Target position.
    pub target_position: Option<Anchor>,
    /// Rendering hints.
    pub hints: IndexMap<String, Hint>,
}

impl MetadataPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the current position.
    pub fn current_position(mut self, anchor: Anchor) -> Self {
        self.current_position = Some(anchor);
        self
    }

    /// Set the target position.
    pub fn target_position(mut self, anchor: Anchor) -> Self {
        self.target_position = Some(anchor);
        self
    }

    /// Add a rendering hint.
    pub fn hint(mut self, name: impl Into<String>, value: impl Into<Hint>) -> Self {
        self.hints.insert(name.into(), value.into());
        self
    }

    /// Resolve into full metadata using the default position rules.
    pub fn resolve(self) -> Metadata {
        let target_position = self.target_position.unwrap_or(Anchor::ORIGIN);
        Metadata {
            id: self.id,
            current_position: self.current_position.unwrap_or(target_position),
            target_position,
            hints: self.hints,
        }
    }
}
