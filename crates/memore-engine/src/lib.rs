//! Round generation and scoring engine for a visual memory game.
//!
//! A player memorizes a handful of colored shapes, then picks them out of a
//! larger grid of distractors. This crate holds the game rules:
//!
//! - [`core`] - Shape model and player settings
//! - [`engine`] - Difficulty curve, shape pool generation, scoring, statistics
//!   and the session state machine that ties them together

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A level below 1 was passed to the difficulty curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("level must be at least 1 (got {level})")]
pub struct InvalidLevelError {
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidAppearanceError {
    #[display("{scheme:?} needs {} colors, got {count}", scheme.color_count())]
    ColorCount {
        scheme: core::ColoringScheme,
        count: usize,
    },
    #[display("color {color:?} used more than once")]
    RepeatedColor { color: core::PaletteColor },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SettingsError {
    #[display("no shape kind enabled")]
    NoKindEnabled,
    #[display("no coloring scheme enabled")]
    NoSchemeEnabled,
    #[display("cannot disable {}, the last enabled shape kind", kind.name())]
    LastKind { kind: core::ShapeKind },
    #[display("cannot disable {}, the last enabled scheme group", group.label())]
    LastSchemeGroup { group: core::SchemeGroup },
}
