//! Edge shapes of a piece and the compatibility rule between facing edges.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Shape of one piece edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Insert {
    /// The edge sticks out.
    Tab,
    /// The edge is cut in.
    Slot,
    /// A flat border edge. Never participates in a connection.
    #[default]
    None,
}

impl Insert {
    /// The shape that interlocks with this one.
    ///
    /// `Tab` and `Slot` swap; `None` stays `None`.
    pub fn complement(self) -> Insert {
        match self {
            Insert::Tab => Insert::Slot,
            Insert::Slot => Insert::Tab,
            Insert::None => Insert::None,
        }
    }

    /// Whether this is a border edge.
    pub fn is_none(self) -> bool {
        self == Insert::None
    }

    /// Decode one character of the compact notation.
    pub fn from_char(c: char) -> Insert {
        match c {
            'T' => Insert::Tab,
            'S' => Insert::Slot,
            _ => Insert::None,
        }
    }

    /// Encode as one character of the compact notation.
    pub fn to_char(self) -> char {
        match self {
            Insert::Tab => 'T',
            Insert::Slot => 'S',
            Insert::None => '-',
        }
    }
}

/// Whether two facing edges interlock: exactly one `Tab` and one `Slot`.
pub fn compatible(a: Insert, b: Insert) -> bool {
    matches!(
        (a, b),
        (Insert::Tab, Insert::Slot) | (Insert::Slot, Insert::Tab)
    )
}

/// One of the four sides of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Top edge.
    Up,
    /// Right edge.
    Right,
    /// Bottom edge.
    Down,
    /// Left edge.
    Left,
}

impl Side {
    /// All sides in emission order.
    pub const ALL: [Side; 4] = [Side::Up, Side::Right, Side::Down, Side::Left];

    /// The side facing this one on an adjacent piece.
    pub fn opposite(self) -> Side {
        match self {
            Side::Up => Side::Down,
            Side::Right => Side::Left,
            Side::Down => Side::Up,
            Side::Left => Side::Right,
        }
    }

    /// Unit grid offset `(dx, dy)` towards the neighbor on this side.
    pub fn delta(self) -> (f64, f64) {
        match self {
            Side::Up => (0.0, -1.0),
            Side::Right => (1.0, 0.0),
            Side::Down => (0.0, 1.0),
            Side::Left => (-1.0, 0.0),
        }
    }

    /// Position of this side in [`Side::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Up => "up",
            Side::Right => "right",
            Side::Down => "down",
            Side::Left => "left",
        };
        f.write_str(name)
    }
}

/// The four edge shapes of a piece.
///
/// Build one from an explicit record (omitted sides default to
/// [`Insert::None`]) or from the compact notation:
///
/// ```
/// use jigsaw_core::{Insert, Structure};
///
/// let explicit = Structure {
///     right: Insert::Tab,
///     left: Insert::Slot,
///     ..Structure::default()
/// };
/// assert_eq!(explicit.up, Insert::None);
///
/// // Compact characters are ordered right, down, left, up.
/// let compact: Structure = "STS-".parse().unwrap();
/// assert_eq!(compact.right, Insert::Slot);
/// assert_eq!(compact.down, Insert::Tab);
/// assert_eq!(compact.left, Insert::Slot);
/// assert_eq!(compact.up, Insert::None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Structure {
    /// Top edge.
    pub up: Insert,
    /// Right edge.
    pub right: Insert,
    /// Bottom edge.
    pub down: Insert,
    /// Left edge.
    pub left: Insert,
}

impl Structure {
    /// A structure with every side set explicitly.
    pub const fn new(up: Insert, right: Insert, down: Insert, left: Insert) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// Decode the compact notation.
    ///
    /// Characters are read in the order right, down, left, up. `T` is a
    /// tab, `S` a slot and any other character a border. Missing trailing
    /// characters are borders; characters past the fourth are ignored.
    pub fn from_compact(notation: &str) -> Self {
        let mut chars = notation.chars().map(Insert::from_char);
        let mut next = || chars.next().unwrap_or_default();
        let right = next();
        let down = next();
        let left = next();
        let up = next();
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// Encode into the compact notation (right, down, left, up).
    pub fn to_compact(&self) -> String {
        [self.right, self.down, self.left, self.up]
            .iter()
            .map(|insert| insert.to_char())
            .collect()
    }

    /// Shape of the given side.
    pub fn side(&self, side: Side) -> Insert {
        match side {
            Side::Up => self.up,
            Side::Right => self.right,
            Side::Down => self.down,
            Side::Left => self.left,
        }
    }

    /// A copy with `side` set to `insert`.
    pub fn with_side(mut self, side: Side, insert: Insert) -> Self {
        match side {
            Side::Up => self.up = insert,
            Side::Right => self.right = insert,
            Side::Down => self.down = insert,
            Side::Left => self.left = insert,
        }
        self
    }

    /// Whether this structure's `side` interlocks with the facing side of `other`.
    pub fn fits(&self, side: Side, other: &Structure) -> bool {
        compatible(self.side(side), other.side(side.opposite()))
    }
}

impl FromStr for Structure {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_compact(s))
    }
}

impl From<&str> for Structure {
    fn from(s: &str) -> Self {
        Self::from_compact(s)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_table() {
        let all = [Insert::Tab, Insert::Slot, Insert::None];
        for a in all {
            for b in all {
                let expected = (a == Insert::Tab && b == Insert::Slot)
                    || (a == Insert::Slot && b == Insert::Tab);
                assert_eq!(compatible(a, b), expected, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn compact_order_is_right_down_left_up() {
        let s = Structure::from_compact("TS-T");
        assert_eq!(s.right, Insert::Tab);
        assert_eq!(s.down, Insert::Slot);
        assert_eq!(s.left, Insert::None);
        assert_eq!(s.up, Insert::Tab);
    }

    #[test]
    fn unknown_characters_are_borders() {
        let s = Structure::from_compact("x?t ");
        assert_eq!(s, Structure::default());
    }

    #[test]
    fn short_notation_pads_with_borders() {
        let s = Structure::from_compact("S");
        assert_eq!(s.right, Insert::Slot);
        assert_eq!(s.down, Insert::None);
        assert_eq!(s.up, Insert::None);
    }

    #[test]
    fn to_compact_inverts_from_compact() {
        assert_eq!(Structure::from_compact("STS-").to_compact(), "STS-");
        assert_eq!(Structure::default().to_string(), "----");
    }

    #[test]
    fn fits_checks_facing_side() {
        let a = Structure::default().with_side(Side::Right, Insert::Tab);
        let b = Structure::default().with_side(Side::Left, Insert::Slot);
        assert!(a.fits(Side::Right, &b));
        assert!(b.fits(Side::Left, &a));
        assert!(!a.fits(Side::Left, &b));
    }

    #[test]
    fn side_helpers() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(Side::ALL[side.index()], side);
        }
        assert_eq!(Side::Down.delta(), (0.0, 1.0));
        assert_eq!(Insert::Tab.complement(), Insert::Slot);
        assert_eq!(Insert::None.complement(), Insert::None);
    }
}
