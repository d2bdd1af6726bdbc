use std::{path::PathBuf, sync::Arc};

use memore_engine::{GameMode, GameSession};

use crate::{
    command::play::app::PlayApp,
    config::SessionConfigArg,
    flavor::{FlavorText, OllamaFlavorText},
    logging,
    tui::Tui,
};

mod app;
mod screens;

const DEFAULT_FLAVOR_MODEL: &str = "llama3.2";

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum PlayMode {
    Training,
    #[default]
    Challenge,
    Infinite,
}

impl From<PlayMode> for GameMode {
    fn from(mode: PlayMode) -> Self {
        match mode {
            PlayMode::Training => Self::Training,
            PlayMode::Challenge => Self::Challenge,
            PlayMode::Infinite => Self::Infinite,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Game mode preselected in the menu
    #[clap(long, value_enum, default_value_t = PlayMode::Challenge)]
    mode: PlayMode,
    #[clap(flatten)]
    config: SessionConfigArg,
    /// Base URL of an Ollama-compatible server used for the game-over comment
    #[clap(long)]
    flavor_endpoint: Option<String>,
    /// Model name sent to the flavor-text server
    #[clap(long, default_value = DEFAULT_FLAVOR_MODEL)]
    flavor_model: String,
    /// Write logs to this file (the terminal is used by the game)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            mode: PlayMode::default(),
            config: SessionConfigArg::default(),
            flavor_endpoint: None,
            flavor_model: DEFAULT_FLAVOR_MODEL.to_owned(),
            log_file: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        mode,
        config,
        flavor_endpoint,
        flavor_model,
        log_file,
    } = arg;

    let _log_guard = log_file.as_deref().map(logging::init_file).transpose()?;

    let settings = config.load_settings()?;
    let seed = config.seed();
    let flavor_service: Option<Arc<dyn FlavorText>> = match flavor_endpoint {
        Some(endpoint) => Some(Arc::new(OllamaFlavorText::new(endpoint, flavor_model)?)),
        None => None,
    };
    tracing::info!(%seed, "starting terminal session");

    let mut app = PlayApp::new(
        GameSession::with_seed(seed, settings),
        (*mode).into(),
        flavor_service,
    );
    Tui::new().run(&mut app)
}
