use memore_engine::{DifficultyParams, GameMode, compute_difficulty};
use serde::Serialize;

use crate::{logging, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DifficultyArg {
    /// Last level of the table
    #[clap(long, default_value_t = 20)]
    max_level: u32,
}

#[derive(Debug, Serialize)]
struct LevelParams {
    level: u32,
    #[serde(flatten)]
    params: DifficultyParams,
}

fn difficulty_table(max_level: u32) -> anyhow::Result<Vec<LevelParams>> {
    (1..=max_level)
        .map(|level| {
            let params = compute_difficulty(level, GameMode::default())?;
            Ok(LevelParams { level, params })
        })
        .collect()
}

pub(crate) fn run(arg: &DifficultyArg) -> anyhow::Result<()> {
    logging::init_stderr()?;
    let table = difficulty_table(arg.max_level)?;
    Output::save_json(&table, None)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_table_starts_at_level_one() {
        let table = difficulty_table(3).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].level, 1);
        assert_eq!(table[0].params.memorize_count, 3);
        assert_eq!(table[2].params.grid_count, 20);
    }

    #[test]
    fn test_empty_table() {
        assert!(difficulty_table(0).unwrap().is_empty());
    }

    #[test]
    fn test_json_shape() {
        let table = difficulty_table(10).unwrap();
        let value = serde_json::to_value(&table[9]).unwrap();
        assert_eq!(value["level"], 10);
        assert_eq!(value["memorize_count"], 8);
        assert_eq!(value["view_time_secs"], 5.0);
        assert_eq!(value["grid_count"], 48);
        assert_eq!(table[9].params.view_time, Duration::from_secs(5));
    }
}
