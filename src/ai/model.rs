use std::path::Path;

use burn::backend::NdArray;
use burn::prelude::*;
use burn::record::DefaultRecorder;
use burn::tensor::TensorData;

use crate::ai::networks::{PolicyNetwork, PolicyNetworkConfig};
use crate::error::ModelError;
use crate::game::{Board, COLS, ROWS};

pub type ModelBackend = NdArray;

/// A loaded policy network ready for single-board inference.
#[derive(Debug)]
pub struct PolicyModel {
    network: PolicyNetwork<ModelBackend>,
    device: <ModelBackend as Backend>::Device,
}

impl PolicyModel {
    /// Freshly initialized (untrained) weights.
    pub fn untrained() -> Self {
        let device = Default::default();
        PolicyModel {
            network: PolicyNetworkConfig {}.init(&device),
            device,
        }
    }

    /// Load weights written by [`PolicyModel::save`] or any tool using the
    /// same recorder. The recorder appends its own file extension.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let device = Default::default();
        let recorder = DefaultRecorder::default();
        let network = PolicyNetworkConfig {}
            .init::<ModelBackend>(&device)
            .load_file(path.to_path_buf(), &recorder, &device)
            .map_err(|e| ModelError::Load {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(PolicyModel { network, device })
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let recorder = DefaultRecorder::default();
        self.network
            .clone()
            .save_file(path.to_path_buf(), &recorder)
            .map_err(|e| ModelError::Save {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Raw per-column preferences for `board`.
    pub fn preferences(&self, board: &Board) -> Result<[f32; COLS], ModelError> {
        let flat: Vec<f32> = board.encode().iter().map(|&v| f32::from(v)).collect();
        let input =
            Tensor::<ModelBackend, 1>::from_data(TensorData::from(flat.as_slice()), &self.device)
                .reshape([1, 1, ROWS, COLS]);

        let output: Vec<f32> = self
            .network
            .forward(input)
            .into_data()
            .to_vec()
            .map_err(|e| ModelError::Inference(format!("{e:?}")))?;

        output.try_into().map_err(|v: Vec<f32>| {
            ModelError::Inference(format!("expected {COLS} outputs, got {}", v.len()))
        })
    }

    /// Legal column the network prefers, or `None` on a full board.
    pub fn preferred_column(&self, board: &Board) -> Result<Option<usize>, ModelError> {
        let preferences = self.preferences(board)?;
        Ok(best_legal_column(&preferences, &board.playable_columns()))
    }
}

/// Highest-preference column among `legal`; ties go to the lowest index.
/// Columns outside the board are ignored.
pub fn best_legal_column(preferences: &[f32; COLS], legal: &[usize]) -> Option<usize> {
    let mut columns = legal.to_vec();
    columns.sort_unstable();

    let mut best: Option<(usize, f32)> = None;
    for col in columns {
        let Some(&value) = preferences.get(col) else {
            continue;
        };
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((col, value));
        }
    }
    best.map(|(col, _)| col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};

    #[test]
    fn test_best_legal_column_picks_maximum() {
        let prefs = [0.1, 0.9, 0.3, 0.2, 0.5, 0.0, -1.0];
        assert_eq!(best_legal_column(&prefs, &[3, 2, 4, 1, 5, 0, 6]), Some(1));
    }

    #[test]
    fn test_best_legal_column_skips_illegal() {
        let prefs = [0.1, 0.9, 0.3, 0.2, 0.5, 0.0, -1.0];
        assert_eq!(best_legal_column(&prefs, &[3, 2, 4, 5, 0, 6]), Some(4));
    }

    #[test]
    fn test_best_legal_column_ties_go_low() {
        let prefs = [0.0, 0.7, 0.0, 0.0, 0.7, 0.0, 0.7];
        assert_eq!(best_legal_column(&prefs, &[6, 4, 1]), Some(1));
    }

    #[test]
    fn test_best_legal_column_ignores_out_of_range() {
        let prefs = [0.1, 0.9, 0.3, 0.2, 0.5, 0.0, -1.0];
        assert_eq!(best_legal_column(&prefs, &[7, 2, 12]), Some(2));
        assert_eq!(best_legal_column(&prefs, &[7, 100]), None);
    }

    #[test]
    fn test_best_legal_column_empty() {
        assert_eq!(best_legal_column(&[0.0; COLS], &[]), None);
    }

    #[test]
    fn test_preferred_column_is_playable() {
        let model = PolicyModel::untrained();
        let mut board = Board::new();
        for _ in 0..ROWS / 2 {
            for col in [0, 1, 2] {
                board.drop_disc(col, Cell::Red).unwrap();
                board.drop_disc(col, Cell::Yellow).unwrap();
            }
        }
        let col = model.preferred_column(&board).unwrap().unwrap();
        assert!(board.is_playable(col));
    }

    #[test]
    fn test_save_then_load_gives_same_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy");
        let board = Board::from_moves(Player::Red, &[3, 3, 2]).unwrap();

        let model = PolicyModel::untrained();
        model.save(&path).unwrap();
        let loaded = PolicyModel::load(&path).unwrap();

        assert_eq!(
            model.preferences(&board).unwrap(),
            loaded.preferences(&board).unwrap()
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = PolicyModel::load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ModelError::Load { .. }));
    }
}
