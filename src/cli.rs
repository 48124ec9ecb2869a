//! Command-line options shared by the binaries. Flags override the config file.

use std::path::PathBuf;

use tracing_subscriber::filter::LevelFilter;

use crate::ai::StrategyKind;
use crate::config::AppConfig;

#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Strategy for player one (Red)
    #[arg(long, value_enum)]
    pub player_one: Option<StrategyKind>,

    /// Search depth for player one
    #[arg(long)]
    pub depth_one: Option<usize>,

    /// Strategy for player two (Yellow)
    #[arg(long, value_enum)]
    pub player_two: Option<StrategyKind>,

    /// Search depth for player two
    #[arg(long)]
    pub depth_two: Option<usize>,

    /// Weights file for neural-network seats
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Score cutoffs heuristically even at the deepest search depth
    #[arg(long, default_value_t = false)]
    pub evaluate_deep_cutoffs: bool,

    /// RNG seed for random seats
    #[arg(long)]
    pub seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl ConfigArgs {
    /// Apply every flag that was given on top of `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(strategy) = self.player_one {
            config.player_one.strategy = strategy;
        }
        if let Some(depth) = self.depth_one {
            config.player_one.depth = depth;
        }
        if let Some(strategy) = self.player_two {
            config.player_two.strategy = strategy;
        }
        if let Some(depth) = self.depth_two {
            config.player_two.depth = depth;
        }
        if let Some(weights) = &self.weights {
            config.model.weights_path = Some(weights.clone());
        }
        if self.evaluate_deep_cutoffs {
            config.search.evaluate_deep_cutoffs = true;
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ConfigArgs,
    }

    #[test]
    fn test_flags_override_config() {
        let cli = TestCli::parse_from([
            "test",
            "--player-one",
            "minimax",
            "--depth-one",
            "6",
            "--player-two",
            "neural-network",
            "--weights",
            "model/policy",
            "--seed",
            "17",
        ]);
        let mut config = AppConfig::default();
        cli.args.apply(&mut config);

        assert_eq!(config.player_one.strategy, StrategyKind::Minimax);
        assert_eq!(config.player_one.depth, 6);
        assert_eq!(config.player_two.strategy, StrategyKind::NeuralNetwork);
        assert_eq!(config.model.weights_path, Some(PathBuf::from("model/policy")));
        assert_eq!(config.simulation.seed, Some(17));
        assert!(!config.search.evaluate_deep_cutoffs);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = TestCli::parse_from(["test"]);
        let mut config = AppConfig::default();
        config.search.evaluate_deep_cutoffs = true;
        config.player_two.depth = 7;
        cli.args.apply(&mut config);

        assert!(config.search.evaluate_deep_cutoffs);
        assert_eq!(config.player_two.depth, 7);
        assert_eq!(cli.args.log_level, LevelFilter::INFO);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(TestCli::try_parse_from(["test", "--player-one", "oracle"]).is_err());
    }
}
