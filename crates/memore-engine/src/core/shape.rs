use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::InvalidAppearanceError;

/// Geometric outline of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
}

impl ShapeKind {
    /// Number of shape kinds (6).
    pub const LEN: usize = 6;

    /// All shape kinds in declaration order.
    pub const ALL: [Self; Self::LEN] = [
        Self::Circle,
        Self::Square,
        Self::Triangle,
        Self::Pentagon,
        Self::Hexagon,
        Self::Star,
    ];

    /// Returns the display name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
            Self::Star => "star",
        }
    }

    /// Returns a single-character glyph for terminal rendering.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Circle => '●',
            Self::Square => '■',
            Self::Triangle => '▲',
            Self::Pentagon => '⬟',
            Self::Hexagon => '⬢',
            Self::Star => '★',
        }
    }
}

/// Spatial pattern used to fill a shape.
///
/// The number of colors a shape carries is fixed by its scheme, see
/// [`ColoringScheme::color_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColoringScheme {
    /// One color over the whole shape.
    Solid,
    /// Left and right halves.
    VerticalHalf,
    /// Top and bottom halves.
    HorizontalHalf,
    /// Four quadrants in reading order: top left, top right, bottom left, bottom right.
    Quarters,
}

impl ColoringScheme {
    /// Number of coloring schemes (4).
    pub const LEN: usize = 4;

    /// All coloring schemes in declaration order.
    pub const ALL: [Self; Self::LEN] = [
        Self::Solid,
        Self::VerticalHalf,
        Self::HorizontalHalf,
        Self::Quarters,
    ];

    /// Maximum number of colors any scheme uses.
    pub const MAX_COLORS: usize = 4;

    /// Returns how many colors a shape with this scheme carries.
    #[must_use]
    pub const fn color_count(self) -> usize {
        match self {
            Self::Solid => 1,
            Self::VerticalHalf | Self::HorizontalHalf => 2,
            Self::Quarters => 4,
        }
    }

    /// Returns the settings group this scheme belongs to.
    #[must_use]
    pub const fn group(self) -> SchemeGroup {
        match self {
            Self::Solid => SchemeGroup::Single,
            Self::VerticalHalf | Self::HorizontalHalf => SchemeGroup::Dual,
            Self::Quarters => SchemeGroup::Complex,
        }
    }
}

/// Coloring schemes grouped by how many colors they use.
///
/// The settings screen enables and disables schemes one group at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeGroup {
    /// One color.
    Single,
    /// Two colors (both split directions).
    Dual,
    /// Four colors.
    Complex,
}

impl SchemeGroup {
    pub const ALL: [Self; 3] = [Self::Single, Self::Dual, Self::Complex];

    #[must_use]
    pub const fn schemes(self) -> &'static [ColoringScheme] {
        match self {
            Self::Single => &[ColoringScheme::Solid],
            Self::Dual => &[ColoringScheme::VerticalHalf, ColoringScheme::HorizontalHalf],
            Self::Complex => &[ColoringScheme::Quarters],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single (1 color)",
            Self::Dual => "dual (2 colors)",
            Self::Complex => "complex (4 colors)",
        }
    }
}

/// Color from the fixed global palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Cyan,
    Orange,
}

impl PaletteColor {
    /// Number of palette colors (8).
    pub const LEN: usize = 8;

    /// The whole palette in declaration order.
    pub const ALL: [Self; Self::LEN] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Pink,
        Self::Cyan,
        Self::Orange,
    ];

    /// Returns the color as an RGB triple.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (0xef, 0x44, 0x44),
            Self::Blue => (0x3b, 0x82, 0xf6),
            Self::Green => (0x10, 0xb9, 0x81),
            Self::Yellow => (0xf5, 0x9e, 0x0b),
            Self::Purple => (0x8b, 0x5c, 0xf6),
            Self::Pink => (0xec, 0x48, 0x99),
            Self::Cyan => (0x06, 0xb6, 0xd4),
            Self::Orange => (0xf9, 0x73, 0x16),
        }
    }
}

/// Ordered color list of a shape; its length always matches the scheme.
pub type ShapeColors = ArrayVec<PaletteColor, { ColoringScheme::MAX_COLORS }>;

/// Everything that is visible about a shape: its kind, scheme and colors.
///
/// Two shapes look the same exactly when their appearances are equal. Color
/// order matters: a red/blue vertical split differs from a blue/red one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShapeAppearance {
    kind: ShapeKind,
    scheme: ColoringScheme,
    colors: ShapeColors,
}

impl ShapeAppearance {
    /// Creates an appearance, checking the color list against the scheme.
    ///
    /// The list must hold exactly [`ColoringScheme::color_count`] colors with
    /// no color repeated.
    pub fn new(
        kind: ShapeKind,
        scheme: ColoringScheme,
        colors: &[PaletteColor],
    ) -> Result<Self, InvalidAppearanceError> {
        if colors.len() != scheme.color_count() {
            return Err(InvalidAppearanceError::ColorCount {
                scheme,
                count: colors.len(),
            });
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(InvalidAppearanceError::RepeatedColor { color: *color });
            }
        }
        Ok(Self::new_unchecked(kind, scheme, colors))
    }

    pub(crate) fn new_unchecked(
        kind: ShapeKind,
        scheme: ColoringScheme,
        colors: &[PaletteColor],
    ) -> Self {
        debug_assert_eq!(colors.len(), scheme.color_count());
        Self {
            kind,
            scheme,
            colors: colors.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn scheme(&self) -> ColoringScheme {
        self.scheme
    }

    #[must_use]
    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }
}

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token of a shape descriptor.
///
/// Tokens come from a process-wide counter and are never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ShapeId(u64);

impl ShapeId {
    /// Allocates a fresh identity token.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// One shape in a round: an appearance plus a unique identity.
///
/// Descriptors deliberately do not implement [`PartialEq`]. Use
/// [`Self::same_appearance`] to compare what the player sees, or compare
/// [`Self::id`]s to compare identities.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeDescriptor {
    id: ShapeId,
    #[serde(flatten)]
    appearance: ShapeAppearance,
}

impl ShapeDescriptor {
    /// Wraps an appearance with a freshly allocated identity.
    #[must_use]
    pub fn new(appearance: ShapeAppearance) -> Self {
        Self {
            id: ShapeId::next(),
            appearance,
        }
    }

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn appearance(&self) -> &ShapeAppearance {
        &self.appearance
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.appearance.kind
    }

    #[must_use]
    pub fn scheme(&self) -> ColoringScheme {
        self.appearance.scheme
    }

    #[must_use]
    pub fn colors(&self) -> &[PaletteColor] {
        &self.appearance.colors
    }

    /// Returns `true` if both shapes look identical, regardless of identity.
    #[must_use]
    pub fn same_appearance(&self, other: &Self) -> bool {
        self.appearance == other.appearance
    }
}
