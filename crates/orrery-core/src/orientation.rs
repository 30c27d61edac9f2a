// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Symbolic 3D orientations.
//!
//! Axis convention: Left = +X, Up = +Y, Forward = +Z. Cardinals name one
//! axis, intercardinals two, diagonals all three. Shapes index their sides,
//! edges and corners with these.

use crate::direction::Direction;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left/right axis.
    X,
    /// Up/down axis.
    Y,
    /// Forward/backward axis.
    Z,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index (0, 1 or 2).
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Sign of each axis for one of the six axis-aligned orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalOrientation {
    /// +X.
    Left,
    /// -X.
    Right,
    /// +Y.
    Up,
    /// -Y.
    Down,
    /// +Z.
    Forward,
    /// -Z.
    Backward,
}

impl CardinalOrientation {
    /// All six cardinals.
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Forward,
        Self::Backward,
    ];

    /// Per-axis signs (`-1`, `0` or `1`).
    pub const fn signs(self) -> [f32; 3] {
        match self {
            Self::Left => [1.0, 0.0, 0.0],
            Self::Right => [-1.0, 0.0, 0.0],
            Self::Up => [0.0, 1.0, 0.0],
            Self::Down => [0.0, -1.0, 0.0],
            Self::Forward => [0.0, 0.0, 1.0],
            Self::Backward => [0.0, 0.0, -1.0],
        }
    }

    /// The axis this orientation lies along.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::X,
            Self::Up | Self::Down => Axis::Y,
            Self::Forward | Self::Backward => Axis::Z,
        }
    }

    /// The opposite orientation.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Unit direction for this orientation.
    pub fn to_direction(self) -> Direction {
        direction_from_signs(self.signs())
    }
}

/// Orientation halfway between two perpendicular cardinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum IntercardinalOrientation {
    LeftUp,
    RightUp,
    UpForward,
    UpBackward,
    LeftDown,
    RightDown,
    DownForward,
    DownBackward,
    LeftForward,
    LeftBackward,
    RightForward,
    RightBackward,
}

impl IntercardinalOrientation {
    /// All twelve intercardinals.
    pub const ALL: [Self; 12] = [
        Self::LeftUp,
        Self::RightUp,
        Self::UpForward,
        Self::UpBackward,
        Self::LeftDown,
        Self::RightDown,
        Self::DownForward,
        Self::DownBackward,
        Self::LeftForward,
        Self::LeftBackward,
        Self::RightForward,
        Self::RightBackward,
    ];

    /// Per-axis signs; exactly one component is zero.
    pub const fn signs(self) -> [f32; 3] {
        match self {
            Self::LeftUp => [1.0, 1.0, 0.0],
            Self::RightUp => [-1.0, 1.0, 0.0],
            Self::UpForward => [0.0, 1.0, 1.0],
            Self::UpBackward => [0.0, 1.0, -1.0],
            Self::LeftDown => [1.0, -1.0, 0.0],
            Self::RightDown => [-1.0, -1.0, 0.0],
            Self::DownForward => [0.0, -1.0, 1.0],
            Self::DownBackward => [0.0, -1.0, -1.0],
            Self::LeftForward => [1.0, 0.0, 1.0],
            Self::LeftBackward => [1.0, 0.0, -1.0],
            Self::RightForward => [-1.0, 0.0, 1.0],
            Self::RightBackward => [-1.0, 0.0, -1.0],
        }
    }

    /// The axis this orientation does not move along.
    pub const fn unspecified_axis(self) -> Axis {
        match self {
            Self::LeftUp | Self::RightUp | Self::LeftDown | Self::RightDown => Axis::Z,
            Self::UpForward | Self::UpBackward | Self::DownForward | Self::DownBackward => Axis::X,
            Self::LeftForward | Self::LeftBackward | Self::RightForward | Self::RightBackward => {
                Axis::Y
            }
        }
    }

    /// Unit direction for this orientation.
    pub fn to_direction(self) -> Direction {
        direction_from_signs(self.signs())
    }
}

/// Orientation pointing into one octant (all three axes non-zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum DiagonalOrientation {
    LeftUpForward,
    RightUpForward,
    LeftUpBackward,
    RightUpBackward,
    LeftDownForward,
    RightDownForward,
    LeftDownBackward,
    RightDownBackward,
}

impl DiagonalOrientation {
    /// All eight diagonals.
    pub const ALL: [Self; 8] = [
        Self::LeftUpForward,
        Self::RightUpForward,
        Self::LeftUpBackward,
        Self::RightUpBackward,
        Self::LeftDownForward,
        Self::RightDownForward,
        Self::LeftDownBackward,
        Self::RightDownBackward,
    ];

    /// Per-axis signs; no component is zero.
    pub const fn signs(self) -> [f32; 3] {
        match self {
            Self::LeftUpForward => [1.0, 1.0, 1.0],
            Self::RightUpForward => [-1.0, 1.0, 1.0],
            Self::LeftUpBackward => [1.0, 1.0, -1.0],
            Self::RightUpBackward => [-1.0, 1.0, -1.0],
            Self::LeftDownForward => [1.0, -1.0, 1.0],
            Self::RightDownForward => [-1.0, -1.0, 1.0],
            Self::LeftDownBackward => [1.0, -1.0, -1.0],
            Self::RightDownBackward => [-1.0, -1.0, -1.0],
        }
    }

    /// Unit direction for this orientation.
    pub fn to_direction(self) -> Direction {
        direction_from_signs(self.signs())
    }
}

/// Any of the 26 symbolic orientations, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// No orientation; pairs with an undefined direction.
    #[default]
    None,
    /// One axis.
    Cardinal(CardinalOrientation),
    /// Two axes.
    Intercardinal(IntercardinalOrientation),
    /// Three axes.
    Diagonal(DiagonalOrientation),
}

impl Orientation {
    /// Per-axis signs; all zero for [`Orientation::None`].
    pub const fn signs(self) -> [f32; 3] {
        match self {
            Self::None => [0.0, 0.0, 0.0],
            Self::Cardinal(c) => c.signs(),
            Self::Intercardinal(i) => i.signs(),
            Self::Diagonal(d) => d.signs(),
        }
    }

    /// Unit direction, or `None` for [`Orientation::None`].
    pub fn to_direction(self) -> Option<Direction> {
        match self {
            Self::None => None,
            Self::Cardinal(c) => Some(c.to_direction()),
            Self::Intercardinal(i) => Some(i.to_direction()),
            Self::Diagonal(d) => Some(d.to_direction()),
        }
    }

    /// Nearest of all 26 orientations to `direction`; an undefined
    /// direction maps to `(Orientation::None, None)`.
    pub fn nearest_to(direction: Option<Direction>) -> (Self, Option<Direction>) {
        match direction {
            Some(d) => {
                let (orientation, nearest) = d.nearest_orientation();
                (orientation, Some(nearest))
            }
            None => (Self::None, None),
        }
    }

    /// Iterates the 26 defined orientations: cardinals, intercardinals,
    /// then diagonals.
    pub fn all() -> impl Iterator<Item = Self> {
        CardinalOrientation::ALL
            .into_iter()
            .map(Self::Cardinal)
            .chain(IntercardinalOrientation::ALL.into_iter().map(Self::Intercardinal))
            .chain(DiagonalOrientation::ALL.into_iter().map(Self::Diagonal))
    }
}

impl From<CardinalOrientation> for Orientation {
    fn from(value: CardinalOrientation) -> Self {
        Self::Cardinal(value)
    }
}

impl From<IntercardinalOrientation> for Orientation {
    fn from(value: IntercardinalOrientation) -> Self {
        Self::Intercardinal(value)
    }
}

impl From<DiagonalOrientation> for Orientation {
    fn from(value: DiagonalOrientation) -> Self {
        Self::Diagonal(value)
    }
}

/// Eight-way orientation in a 2D plane, counter-clockwise from `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum PolarOrientation {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl PolarOrientation {
    /// All eight, in counter-clockwise order starting at 0°.
    pub const ALL: [Self; 8] = [
        Self::Right,
        Self::UpRight,
        Self::Up,
        Self::UpLeft,
        Self::Left,
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
    ];
}

fn direction_from_signs(signs: [f32; 3]) -> Direction {
    let count = signs.iter().filter(|s| **s != 0.0).count();
    let scale = match count {
        2 => std::f32::consts::FRAC_1_SQRT_2,
        3 => 1.0 / 3.0_f32.sqrt(),
        _ => 1.0,
    };
    Direction::from_vector3_pre_normalized(signs.map(|s| s * scale))
}
