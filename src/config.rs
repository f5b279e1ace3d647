//! Training configuration, loaded from a JSON file if one is present.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::env;
use crate::schedule::ExplorationSchedule;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Directory of benign CSV corpora
    pub benign_dir: PathBuf,
    /// Directory of ransomware CSV corpora
    pub ransomware_dir: PathBuf,
    /// Full-precision agent snapshot written after training
    pub checkpoint_path: PathBuf,
    /// Flat binary weight blob consumed by the inference engine
    pub weights_path: PathBuf,

    /// Rows per feature window
    pub window_rows: usize,
    /// Numeric columns per CSV row
    pub columns_per_row: usize,
    /// Hidden layer widths of the value network
    pub hidden_dims: Vec<usize>,

    /// Episodes to run; purely time-bounded, no early stopping
    pub episodes: usize,
    pub batch_size: usize,
    pub buffer_capacity: usize,
    pub learning_rate: f32,
    /// Discount factor carried by the agent
    pub gamma: f32,
    pub eps_start: f32,
    pub eps_end: f32,
    /// Decay constant of the exploration schedule, in select-action calls
    pub eps_decay: f32,
    /// Sync the target network every this many episodes
    pub target_sync_interval: usize,
    /// Emit a progress line every this many episodes
    pub log_interval: usize,

    /// Fraction of each corpus held out for evaluation
    pub test_fraction: f32,
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,

    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            benign_dir: PathBuf::from("dataset/benign/benign_vec"),
            ransomware_dir: PathBuf::from("dataset/ransomware/ransomware_vec"),
            checkpoint_path: PathBuf::from("model.bin"),
            weights_path: PathBuf::from("model_weights.bin"),
            window_rows: 10,
            columns_per_row: 4,
            hidden_dims: vec![128, 64],
            episodes: 8000,
            batch_size: 32,
            buffer_capacity: 10_000,
            learning_rate: 1e-3,
            gamma: 0.99,
            eps_start: 0.9,
            eps_end: 0.05,
            eps_decay: 200.0,
            target_sync_interval: 10,
            log_interval: 100,
            test_fraction: 0.2,
            seed: None,
            log: LogConfig::default(),
        }
    }
}

impl TrainConfig {
    /// Load from a JSON file if present; otherwise return the default.
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<TrainConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    /// Feature vector length implied by the windowing parameters.
    pub fn input_dim(&self) -> usize {
        self.window_rows * self.columns_per_row
    }

    /// Full layer-size stack of the value network, input to output.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_dims.len() + 2);
        sizes.push(self.input_dim());
        sizes.extend_from_slice(&self.hidden_dims);
        sizes.push(env::ACTIONS);
        sizes
    }

    pub fn schedule(&self) -> ExplorationSchedule {
        ExplorationSchedule::ExponentialDecay {
            start: self.eps_start,
            end: self.eps_end,
            decay: self.eps_decay,
        }
    }
}
