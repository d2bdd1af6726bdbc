//! Value types shared by every part of the engine.
//!
//! - [`ShapeDescriptor`] - One shape shown to the player (identity + [`ShapeAppearance`])
//! - [`ShapeKind`], [`ColoringScheme`], [`PaletteColor`] - The building blocks of an appearance
//! - [`GameSettings`] - Which kinds and schemes the player allows

pub use self::{settings::*, shape::*};

mod settings;
mod shape;
