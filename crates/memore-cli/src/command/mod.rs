use clap::{Parser, Subcommand};

use self::{difficulty::DifficultyArg, generate_round::GenerateRoundArg, play::PlayArg};

mod difficulty;
mod generate_round;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the memory game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Generate one round and print it as JSON
    GenerateRound(#[clap(flatten)] GenerateRoundArg),
    /// Print the difficulty table as JSON
    Difficulty(#[clap(flatten)] DifficultyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::GenerateRound(arg) => generate_round::run(&arg)?,
        Mode::Difficulty(arg) => difficulty::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["memore"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_generate_round_requires_level() {
        assert!(CommandArgs::try_parse_from(["memore", "generate-round"]).is_err());
        let args =
            CommandArgs::try_parse_from(["memore", "generate-round", "--level", "3"]).unwrap();
        assert!(matches!(args.mode, Some(Mode::GenerateRound(_))));
    }
}
