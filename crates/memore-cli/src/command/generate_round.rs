use std::path::PathBuf;

use memore_engine::{GameMode, Round, SessionSeed};
use serde::Serialize;

use crate::{config::SessionConfigArg, logging, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateRoundArg {
    /// Level to generate (1 or higher)
    #[clap(long)]
    level: u32,
    #[clap(flatten)]
    config: SessionConfigArg,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GeneratedRound<'a> {
    seed: SessionSeed,
    #[serde(flatten)]
    round: &'a Round,
}

pub(crate) fn run(arg: &GenerateRoundArg) -> anyhow::Result<()> {
    let GenerateRoundArg {
        level,
        config,
        output,
    } = arg;
    logging::init_stderr()?;

    let settings = config.load_settings()?;
    let seed = config.seed();
    let round = Round::generate(&mut seed.rng(), *level, GameMode::default(), &settings)?;
    if round.shortfall() > 0 {
        tracing::warn!(
            shortfall = round.shortfall(),
            "settings allow fewer shapes than level {level} asks for"
        );
    }

    Output::save_json(
        &GeneratedRound {
            seed,
            round: &round,
        },
        output.as_deref(),
    )
}
