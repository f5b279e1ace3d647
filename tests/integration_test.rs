//! Integration tests: full training loops over tiny synthetic pools, driver
//! output artifacts, and end-to-end separation of two trivially separable
//! classes.

use ndarray::Array1;

use verdict::{
    agent::DqnAgent,
    config::{LogConfig, TrainConfig},
    env::DetectionEnv,
    export::WeightLayout,
    replay_buffer::{ReplayBuffer, Transition},
    schedule::ExplorationSchedule,
    trainer::{self, Trainer},
};

fn separable_pools(dim: usize) -> (Vec<Array1<f32>>, Vec<Array1<f32>>) {
    let benign = vec![Array1::zeros(dim), Array1::zeros(dim)];
    let ransomware = vec![Array1::ones(dim), Array1::ones(dim)];
    (benign, ransomware)
}

#[test]
fn learns_to_separate_trivial_classes() {
    let dim = 8;
    let (benign, ransomware) = separable_pools(dim);
    let mut env = DetectionEnv::with_seed(benign, ransomware, 7).unwrap();
    let mut agent =
        DqnAgent::with_seed(&[dim, 16, 8, 2], ExplorationSchedule::default(), 0.99, 11);
    let mut buffer = ReplayBuffer::new(100);

    for episode in 0..200 {
        let state = env.reset();
        let action = agent.select_action(state.view()).unwrap();
        let outcome = env.step(action).unwrap();
        buffer.add(Transition {
            state,
            action,
            reward: outcome.reward,
            next_state: outcome.next_state,
        });
        agent.optimize(&buffer, 2, 0.05).unwrap();
        if episode % 10 == 0 {
            agent.sync_target();
        }
    }

    // The greedy policy should be noticeably better than the 0.5 coin-flip
    // baseline on this pool. Statistical, not exact: training is randomized.
    let accuracy = trainer::evaluate(&mut agent, &mut env, 200).unwrap();
    assert!(
        accuracy > 0.6,
        "greedy accuracy {} not noticeably above chance",
        accuracy
    );
}

#[test]
fn trainer_writes_checkpoint_and_weight_export() {
    let dir = tempfile::tempdir().unwrap();
    let dim = 4;
    let (benign, ransomware) = separable_pools(dim);

    let config = TrainConfig {
        benign_dir: dir.path().join("unused_benign"),
        ransomware_dir: dir.path().join("unused_ransomware"),
        checkpoint_path: dir.path().join("model.bin"),
        weights_path: dir.path().join("model_weights.bin"),
        window_rows: 2,
        columns_per_row: 2,
        hidden_dims: vec![8, 4],
        episodes: 40,
        batch_size: 4,
        buffer_capacity: 50,
        learning_rate: 1e-2,
        gamma: 0.99,
        eps_start: 0.9,
        eps_end: 0.05,
        eps_decay: 200.0,
        target_sync_interval: 10,
        log_interval: 100,
        test_fraction: 0.2,
        seed: Some(5),
        log: LogConfig::default(),
    };

    let env = DetectionEnv::with_seed(benign, ransomware, 5).unwrap();
    let agent = DqnAgent::with_seed(&config.layer_sizes(), config.schedule(), config.gamma, 6);
    let mut trainer = Trainer::new(config.clone(), env, agent);
    trainer.run().unwrap();

    // Checkpoint reloads to the same parameters
    let trained = trainer.into_agent();
    let reloaded = DqnAgent::load(&config.checkpoint_path).unwrap();
    assert_eq!(reloaded.steps_done, trained.steps_done);
    for (a, b) in reloaded
        .policy_network
        .layers
        .iter()
        .zip(trained.policy_network.layers.iter())
    {
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.biases, b.biases);
    }

    // Weight blob has exactly the flattened parameter count, 4 bytes each
    let layout = WeightLayout::of(&trained.policy_network);
    let blob = std::fs::read(&config.weights_path).unwrap();
    assert_eq!(blob.len(), layout.total_len() * 4);
}

#[test]
fn evaluate_reports_a_fraction_and_rejects_zero_probes() {
    let dim = 4;
    let (benign, ransomware) = separable_pools(dim);
    let mut env = DetectionEnv::with_seed(benign, ransomware, 3).unwrap();

    let mut agent = DqnAgent::with_seed(&[dim, 8, 2], ExplorationSchedule::default(), 0.99, 4);
    let accuracy = trainer::evaluate(&mut agent, &mut env, 100).unwrap();
    assert!((0.0..=1.0).contains(&accuracy));

    assert!(trainer::evaluate(&mut agent, &mut env, 0).is_err());
}
