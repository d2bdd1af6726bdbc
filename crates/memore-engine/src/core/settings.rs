use serde::{Deserialize, Serialize};

use crate::{
    SettingsError,
    core::shape::{ColoringScheme, SchemeGroup, ShapeKind},
};

/// Player-configurable allow-list of shape kinds and coloring schemes.
///
/// Both lists are kept sorted, free of duplicates, and never empty: the
/// constructor, deserialization and every toggle enforce it, so the pool
/// generator can always draw a candidate.
///
/// # Example
///
/// ```
/// use memore_engine::{GameSettings, SchemeGroup, ShapeKind};
///
/// let mut settings = GameSettings::default();
/// settings.toggle_kind(ShapeKind::Star).unwrap();
/// assert!(!settings.is_kind_enabled(ShapeKind::Star));
///
/// settings.toggle_scheme_group(SchemeGroup::Complex).unwrap();
/// assert!(!settings.is_group_enabled(SchemeGroup::Complex));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameSettings")]
pub struct GameSettings {
    enabled_kinds: Vec<ShapeKind>,
    enabled_schemes: Vec<ColoringScheme>,
}

#[derive(Deserialize)]
struct RawGameSettings {
    enabled_kinds: Vec<ShapeKind>,
    enabled_schemes: Vec<ColoringScheme>,
}

impl TryFrom<RawGameSettings> for GameSettings {
    type Error = SettingsError;

    fn try_from(raw: RawGameSettings) -> Result<Self, Self::Error> {
        Self::new(raw.enabled_kinds, raw.enabled_schemes)
    }
}

impl Default for GameSettings {
    /// Everything enabled.
    fn default() -> Self {
        Self {
            enabled_kinds: ShapeKind::ALL.to_vec(),
            enabled_schemes: ColoringScheme::ALL.to_vec(),
        }
    }
}

impl GameSettings {
    /// Creates settings from the given lists, dropping duplicates.
    pub fn new<K, S>(kinds: K, schemes: S) -> Result<Self, SettingsError>
    where
        K: IntoIterator<Item = ShapeKind>,
        S: IntoIterator<Item = ColoringScheme>,
    {
        let mut enabled_kinds: Vec<_> = kinds.into_iter().collect();
        enabled_kinds.sort_unstable();
        enabled_kinds.dedup();
        let mut enabled_schemes: Vec<_> = schemes.into_iter().collect();
        enabled_schemes.sort_unstable();
        enabled_schemes.dedup();

        if enabled_kinds.is_empty() {
            return Err(SettingsError::NoKindEnabled);
        }
        if enabled_schemes.is_empty() {
            return Err(SettingsError::NoSchemeEnabled);
        }
        Ok(Self {
            enabled_kinds,
            enabled_schemes,
        })
    }

    /// Enabled shape kinds, never empty.
    #[must_use]
    pub fn enabled_kinds(&self) -> &[ShapeKind] {
        &self.enabled_kinds
    }

    /// Enabled coloring schemes, never empty.
    #[must_use]
    pub fn enabled_schemes(&self) -> &[ColoringScheme] {
        &self.enabled_schemes
    }

    #[must_use]
    pub fn is_kind_enabled(&self, kind: ShapeKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }

    #[must_use]
    pub fn is_scheme_enabled(&self, scheme: ColoringScheme) -> bool {
        self.enabled_schemes.contains(&scheme)
    }

    /// Returns `true` if every scheme of the group is enabled.
    #[must_use]
    pub fn is_group_enabled(&self, group: SchemeGroup) -> bool {
        group
            .schemes()
            .iter()
            .all(|scheme| self.is_scheme_enabled(*scheme))
    }

    /// Enables or disables a shape kind.
    ///
    /// Disabling the last enabled kind is refused and leaves the settings unchanged.
    pub fn toggle_kind(&mut self, kind: ShapeKind) -> Result<(), SettingsError> {
        match self.enabled_kinds.binary_search(&kind) {
            Ok(_) if self.enabled_kinds.len() == 1 => Err(SettingsError::LastKind { kind }),
            Ok(index) => {
                self.enabled_kinds.remove(index);
                Ok(())
            }
            Err(index) => {
                self.enabled_kinds.insert(index, kind);
                Ok(())
            }
        }
    }

    /// Enables or disables a whole scheme group.
    ///
    /// A fully enabled group is disabled; otherwise every scheme in it is
    /// enabled. Disabling is refused when it would leave no scheme enabled.
    pub fn toggle_scheme_group(&mut self, group: SchemeGroup) -> Result<(), SettingsError> {
        if self.is_group_enabled(group) {
            let remaining: Vec<_> = self
                .enabled_schemes
                .iter()
                .copied()
                .filter(|scheme| scheme.group() != group)
                .collect();
            if remaining.is_empty() {
                return Err(SettingsError::LastSchemeGroup { group });
            }
            self.enabled_schemes = remaining;
        } else {
            self.enabled_schemes.extend_from_slice(group.schemes());
            self.enabled_schemes.sort_unstable();
            self.enabled_schemes.dedup();
        }
        Ok(())
    }
}
