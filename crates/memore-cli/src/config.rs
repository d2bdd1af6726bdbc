use std::path::PathBuf;

use memore_engine::{GameSettings, SessionSeed};
use rand::Rng as _;

use crate::util;

/// Options shared by every command that generates rounds.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionConfigArg {
    /// Seed for round generation, as 32 hex characters (random if omitted)
    #[clap(long)]
    seed: Option<SessionSeed>,
    /// JSON file listing the enabled shape kinds and coloring schemes
    #[clap(long)]
    settings: Option<PathBuf>,
}

impl SessionConfigArg {
    /// Returns the configured seed, or a fresh random one.
    pub(crate) fn seed(&self) -> SessionSeed {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Loads the settings file, or the defaults when none was given.
    pub(crate) fn load_settings(&self) -> anyhow::Result<GameSettings> {
        match &self.settings {
            Some(path) => util::read_json_file("settings", path),
            None => Ok(GameSettings::default()),
        }
    }
}
