use serde::{Deserialize, Serialize};

/// Exploration-rate schedules for ε-greedy action selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ExplorationSchedule {
    /// Fixed exploration rate
    Constant { eps: f32 },

    /// Exponential decay: eps = end + (start - end) * exp(-step / decay)
    ExponentialDecay {
        start: f32,
        end: f32,
        decay: f32,
    },
}

impl ExplorationSchedule {
    /// Exploration threshold for a given step count. Monotonically
    /// non-increasing in `step`; for the decaying variant it approaches
    /// `end` asymptotically.
    pub fn value(&self, step: usize) -> f32 {
        match self {
            ExplorationSchedule::Constant { eps } => *eps,
            ExplorationSchedule::ExponentialDecay { start, end, decay } => {
                end + (start - end) * (-(step as f32) / decay).exp()
            }
        }
    }
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        ExplorationSchedule::ExponentialDecay {
            start: 0.9,
            end: 0.05,
            decay: 200.0,
        }
    }
}
