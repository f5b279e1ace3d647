use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VerdictError};
use crate::network::{build_layers, Activation, NeuralNetwork};
use crate::optimizer::{Adam, OptimizerWrapper};
use crate::replay_buffer::ReplayBuffer;
use crate::schedule::ExplorationSchedule;

/// Value-based learning agent for the single-step detection task.
///
/// Owns a policy network (trained every optimization step) and a target
/// network (overwritten wholesale by [`DqnAgent::sync_target`]). Episodes
/// terminate after one action, so the regression target of the update rule is
/// the observed reward itself; the target network is kept as a synced
/// snapshot but contributes nothing to the loss.
///
/// # Example
///
/// ```
/// use verdict::agent::DqnAgent;
/// use verdict::schedule::ExplorationSchedule;
/// use ndarray::array;
///
/// let mut agent = DqnAgent::new(&[4, 16, 8, 2], ExplorationSchedule::default(), 0.99);
/// let state = array![0.1, -0.2, 0.3, -0.1];
/// let action = agent.select_action(state.view()).unwrap();
/// assert!(action < 2);
/// ```
#[derive(Serialize, Deserialize)]
pub struct DqnAgent {
    /// Main network, trained every optimization step
    pub policy_network: NeuralNetwork,

    /// Periodically-synced snapshot of the policy network
    pub target_network: NeuralNetwork,

    /// Exploration schedule driving ε-greedy selection
    pub schedule: ExplorationSchedule,

    /// Number of select_action calls over the agent's lifetime. Never reset
    /// by target syncs.
    pub steps_done: usize,

    /// Discount factor. Configured for parity with the usual update rule;
    /// single-step episodes learn from the raw reward, which leaves it
    /// unused.
    pub gamma: f32,

    #[serde(skip, default = "default_rng")]
    rng: StdRng,
}

fn default_rng() -> StdRng {
    StdRng::from_entropy()
}

impl DqnAgent {
    /// Create an agent with the given layer sizes (including input and output
    /// sizes). Hidden layers use ReLU; the output layer is linear. Both
    /// networks start from the same parameters: the target is a copy of the
    /// freshly initialized policy.
    pub fn new(layer_sizes: &[usize], schedule: ExplorationSchedule, gamma: f32) -> Self {
        Self::with_rng(layer_sizes, schedule, gamma, StdRng::from_entropy())
    }

    /// Like [`DqnAgent::new`], with a fixed seed for reproducible action
    /// selection and batch sampling.
    pub fn with_seed(layer_sizes: &[usize], schedule: ExplorationSchedule, gamma: f32, seed: u64) -> Self {
        Self::with_rng(layer_sizes, schedule, gamma, StdRng::seed_from_u64(seed))
    }

    fn with_rng(layer_sizes: &[usize], schedule: ExplorationSchedule, gamma: f32, rng: StdRng) -> Self {
        assert!(layer_sizes.len() >= 2, "network needs input and output layers");
        for &size in layer_sizes {
            assert!(size > 0, "layer sizes must be nonzero");
        }

        // ReLU for hidden layers, linear output
        let mut activations = vec![Activation::Relu; layer_sizes.len() - 2];
        activations.push(Activation::Linear);

        let layers = build_layers(layer_sizes, &activations);
        let optimizer = OptimizerWrapper::Adam(Adam::default(&layers));
        let policy_network = NeuralNetwork {
            layers,
            optimizer,
        };
        let target_network = policy_network.clone();

        DqnAgent {
            policy_network,
            target_network,
            schedule,
            steps_done: 0,
            gamma,
            rng,
        }
    }

    /// ε-greedy action selection. The exploration threshold comes from the
    /// schedule at the current step count; the counter increments on every
    /// call.
    pub fn select_action(&mut self, state: ArrayView1<f32>) -> Result<usize> {
        let threshold = self.schedule.value(self.steps_done);
        self.steps_done += 1;

        let num_actions = self.num_actions()?;
        if self.rng.gen::<f32>() > threshold {
            Self::argmax(&mut self.policy_network, state)
        } else {
            Ok(self.rng.gen_range(0..num_actions))
        }
    }

    /// Greedy action from the policy network, without exploration and without
    /// touching the step counter. Used for evaluation.
    pub fn greedy_action(&mut self, state: ArrayView1<f32>) -> Result<usize> {
        Self::argmax(&mut self.policy_network, state)
    }

    fn argmax(network: &mut NeuralNetwork, state: ArrayView1<f32>) -> Result<usize> {
        let q_values = network.forward(state);
        q_values
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(idx, _)| idx)
            .ok_or_else(|| VerdictError::TrainingError("no Q-values produced".to_string()))
    }

    fn num_actions(&self) -> Result<usize> {
        self.policy_network
            .output_size()
            .ok_or_else(|| VerdictError::TrainingError("no layers in network".to_string()))
    }

    /// One batched gradient step on the policy network.
    ///
    /// Returns `Ok(None)` without touching any state when the buffer holds
    /// fewer than `batch_size` transitions; training simply continues with
    /// the next episode. Otherwise samples a batch uniformly without
    /// replacement, regresses the Q-value of each taken action onto the
    /// observed reward, and returns the post-step mean squared error.
    pub fn optimize(
        &mut self,
        buffer: &ReplayBuffer,
        batch_size: usize,
        learning_rate: f32,
    ) -> Result<Option<f32>> {
        if batch_size == 0 {
            return Err(VerdictError::invalid_parameter("batch_size", "must be nonzero"));
        }
        if buffer.len() < batch_size {
            return Ok(None);
        }

        let batch = buffer.sample(batch_size, &mut self.rng);
        let state_size = batch[0].state.len();
        let input_dim = self
            .policy_network
            .layers
            .first()
            .map(|layer| layer.weights.dim().0)
            .unwrap_or(0);
        if state_size != input_dim {
            return Err(VerdictError::dimension_mismatch(
                input_dim.to_string(),
                state_size.to_string(),
            ));
        }

        let mut states = Array2::zeros((batch_size, state_size));
        let mut actions = Vec::with_capacity(batch_size);
        let mut rewards = Vec::with_capacity(batch_size);
        for (i, transition) in batch.iter().enumerate() {
            states.row_mut(i).assign(&transition.state);
            actions.push(transition.action);
            rewards.push(transition.reward);
        }

        let q_values = self.policy_network.forward_batch(states.view());

        // Single-step episodes: the regression target is the observed reward,
        // not a bootstrapped next-state value. Entries for actions not taken
        // keep their predicted value and contribute no error.
        let mut targets = q_values;
        for i in 0..batch_size {
            targets[[i, actions[i]]] = rewards[i];
        }

        self.policy_network.train_minibatch(states.view(), targets.view(), learning_rate);

        let predictions = self.policy_network.forward_batch(states.view());
        let loss = (&predictions - &targets)
            .mapv(|x| x * x)
            .mean()
            .unwrap_or(f32::INFINITY);

        Ok(Some(loss))
    }

    /// Overwrite all target-network parameters with a copy of the current
    /// policy-network parameters.
    pub fn sync_target(&mut self) {
        self.target_network = self.policy_network.clone();
    }

    /// Persist both networks and the step counter to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Reload an agent written by [`DqnAgent::save`]. The RNG is freshly
    /// seeded.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let agent: Self = bincode::deserialize(&data)?;
        Ok(agent)
    }
}
