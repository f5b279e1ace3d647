//! Training driver: runs the episode loop, logs progress, and writes the
//! checkpoint and weight export when the episode budget is spent.

use tracing::info;

use crate::agent::DqnAgent;
use crate::config::TrainConfig;
use crate::env::DetectionEnv;
use crate::error::Result;
use crate::export::FlatWeightExporter;
use crate::replay_buffer::{ReplayBuffer, Transition};

pub struct Trainer {
    config: TrainConfig,
    env: DetectionEnv,
    agent: DqnAgent,
    buffer: ReplayBuffer,
}

impl Trainer {
    pub fn new(config: TrainConfig, env: DetectionEnv, agent: DqnAgent) -> Self {
        let buffer = ReplayBuffer::new(config.buffer_capacity);
        Trainer {
            config,
            env,
            agent,
            buffer,
        }
    }

    /// Run the full episode budget, then write the checkpoint and the flat
    /// weight export. No early stopping, no convergence check.
    pub fn run(&mut self) -> Result<()> {
        info!(
            episodes = self.config.episodes,
            pool = self.env.len(),
            "training started"
        );

        for episode in 0..self.config.episodes {
            let state = self.env.reset();
            let action = self.agent.select_action(state.view())?;
            let outcome = self.env.step(action)?;

            self.buffer.add(Transition {
                state,
                action,
                reward: outcome.reward,
                next_state: outcome.next_state,
            });

            self.agent
                .optimize(&self.buffer, self.config.batch_size, self.config.learning_rate)?;

            if self.config.target_sync_interval != 0 && episode % self.config.target_sync_interval == 0 {
                self.agent.sync_target();
            }

            if self.config.log_interval != 0 && episode % self.config.log_interval == 0 {
                info!(episode, reward = outcome.reward, "episode complete");
            }
        }

        self.agent.save(&self.config.checkpoint_path)?;
        info!(path = %self.config.checkpoint_path.display(), "checkpoint saved");

        let bytes = FlatWeightExporter::export(&self.agent.policy_network, &self.config.weights_path)?;
        info!(path = %self.config.weights_path.display(), bytes, "weights exported");

        Ok(())
    }

    pub fn into_agent(self) -> DqnAgent {
        self.agent
    }
}

/// Greedy accuracy of the agent over `probes` episodes of `env`.
pub fn evaluate(agent: &mut DqnAgent, env: &mut DetectionEnv, probes: usize) -> Result<f32> {
    if probes == 0 {
        return Err(crate::error::VerdictError::invalid_parameter(
            "probes",
            "must be nonzero",
        ));
    }

    let mut correct = 0usize;
    for _ in 0..probes {
        let state = env.reset();
        let action = agent.greedy_action(state.view())?;
        let outcome = env.step(action)?;
        if outcome.reward > 0.0 {
            correct += 1;
        }
    }

    Ok(correct as f32 / probes as f32)
}
