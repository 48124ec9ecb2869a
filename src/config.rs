use std::path::{Path, PathBuf};

use tracing::warn;

use crate::ai::StrategyKind;
use crate::error::ConfigError;

/// Upper bound on games per simulation run.
pub const MAX_GAMES: usize = 1000;

/// One side of the board: how it moves and how deep it searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SeatConfig {
    pub strategy: StrategyKind,
    /// Only read by search strategies.
    pub depth: usize,
}

impl Default for SeatConfig {
    fn default() -> Self {
        SeatConfig {
            strategy: StrategyKind::MinimaxAlphaBeta,
            depth: 4,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Score depth cutoffs heuristically even at the deepest depth.
    pub evaluate_deep_cutoffs: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub games: usize,
    pub seed: Option<u64>,
    /// Where search moves are written as training samples. Off when unset.
    pub samples_dir: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 1,
            seed: None,
            samples_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights_path: Option<PathBuf>,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub player_one: SeatConfig,
    pub player_two: SeatConfig,
    pub search: SearchSettings,
    pub simulation: SimulationConfig,
    pub model: ModelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            player_one: SeatConfig {
                strategy: StrategyKind::Human,
                ..SeatConfig::default()
            },
            player_two: SeatConfig::default(),
            search: SearchSettings::default(),
            simulation: SimulationConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn seats(&self) -> [(&'static str, &SeatConfig); 2] {
        [("player_one", &self.player_one), ("player_two", &self.player_two)]
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, seat) in self.seats() {
            if seat.strategy.is_search() && seat.depth == 0 {
                return Err(ConfigError::Validation(format!(
                    "{name}.depth must be >= 1"
                )));
            }
            if seat.strategy == StrategyKind::Human && self.simulation.games != 1 {
                return Err(ConfigError::Validation(format!(
                    "{name} is human, so simulation.games must be 1"
                )));
            }
            if seat.strategy == StrategyKind::NeuralNetwork && self.model.weights_path.is_none() {
                return Err(ConfigError::Validation(format!(
                    "{name} uses the neural network, so model.weights_path must be set"
                )));
            }
        }

        if self.simulation.games == 0 || self.simulation.games > MAX_GAMES {
            return Err(ConfigError::Validation(format!(
                "simulation.games must be in 1..={MAX_GAMES}"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[player_two]
strategy = "minimax"
depth = 6
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.player_two.strategy, StrategyKind::Minimax);
        assert_eq!(config.player_two.depth, 6);
        // Other fields should be defaults
        assert_eq!(config.player_one.strategy, StrategyKind::Human);
        assert_eq!(config.simulation.games, 1);
        assert!(!config.search.evaluate_deep_cutoffs);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.player_one, default.player_one);
        assert_eq!(config.player_two, default.player_two);
        assert_eq!(config.simulation.games, default.simulation.games);
    }

    #[test]
    fn test_strategy_names_are_kebab_case() {
        let config: AppConfig = toml::from_str(
            r#"
[player_one]
strategy = "minimax-alpha-beta"

[player_two]
strategy = "neural-network"

[model]
weights_path = "weights/policy"
"#,
        )
        .unwrap();
        assert_eq!(config.player_one.strategy, StrategyKind::MinimaxAlphaBeta);
        assert_eq!(config.player_two.strategy, StrategyKind::NeuralNetwork);
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_strategy_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[player_one]\nstrategy = \"oracle\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.player_two.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_depth_ignored_for_random_seat() {
        let mut config = AppConfig::default();
        config.player_two = SeatConfig {
            strategy: StrategyKind::Random,
            depth: 0,
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_game_count_out_of_range() {
        let mut config = AppConfig::default();
        config.player_one.strategy = StrategyKind::Random;
        config.simulation.games = 0;
        assert!(config.validate().is_err());
        config.simulation.games = MAX_GAMES + 1;
        assert!(config.validate().is_err());
        config.simulation.games = MAX_GAMES;
        config.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_human_in_batch() {
        let mut config = AppConfig::default();
        config.simulation.games = 10;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: player_one is human, so simulation.games must be 1"
        );
    }

    #[test]
    fn test_validation_requires_weights_for_network() {
        let mut config = AppConfig::default();
        config.player_two.strategy = StrategyKind::NeuralNetwork;
        assert!(config.validate().is_err());
        config.model.weights_path = Some(PathBuf::from("policy"));
        config.validate().unwrap();
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.player_two, SeatConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[player_one]
strategy = "random"

[simulation]
games = 250
seed = 9
samples_dir = "train"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.player_one.strategy, StrategyKind::Random);
        assert_eq!(config.simulation.games, 250);
        assert_eq!(config.simulation.seed, Some(9));
        assert_eq!(config.simulation.samples_dir, Some(PathBuf::from("train")));
        // Others are defaults
        assert_eq!(config.player_two, SeatConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[simulation]\ngames = 5000\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("[player_one]"));
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
