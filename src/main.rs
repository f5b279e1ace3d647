//! Training entrypoint: load the two corpora, split off a held-out set,
//! train the agent for the configured episode budget, then evaluate the
//! greedy policy on the held-out pool.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

use verdict::{
    agent::DqnAgent,
    config::TrainConfig,
    dataset,
    env::DetectionEnv,
    logging::StructuredLogger,
    trainer::{self, Trainer},
};

fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var("VERDICT_CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("verdict.json"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TrainConfig::load(&config_path());
    StructuredLogger::init(config.log.json, &config.log.level);

    info!(
        benign_dir = %config.benign_dir.display(),
        ransomware_dir = %config.ransomware_dir.display(),
        "verdict trainer starting"
    );

    let benign = dataset::load_dir(&config.benign_dir, config.window_rows, config.columns_per_row)?;
    let ransomware =
        dataset::load_dir(&config.ransomware_dir, config.window_rows, config.columns_per_row)?;
    info!(
        benign = benign.len(),
        ransomware = ransomware.len(),
        dim = config.input_dim(),
        "corpus loaded"
    );

    let mut split_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (benign_train, benign_test) = dataset::train_test_split(benign, config.test_fraction, &mut split_rng);
    let (ransomware_train, ransomware_test) =
        dataset::train_test_split(ransomware, config.test_fraction, &mut split_rng);

    let layer_sizes = config.layer_sizes();
    let (env, agent) = match config.seed {
        Some(seed) => (
            DetectionEnv::with_seed(benign_train, ransomware_train, seed)?,
            DqnAgent::with_seed(&layer_sizes, config.schedule(), config.gamma, seed.wrapping_add(1)),
        ),
        None => (
            DetectionEnv::new(benign_train, ransomware_train)?,
            DqnAgent::new(&layer_sizes, config.schedule(), config.gamma),
        ),
    };

    let mut train = Trainer::new(config.clone(), env, agent);
    train.run()?;
    let mut agent = train.into_agent();

    let test_pool = benign_test.len() + ransomware_test.len();
    let mut test_env = DetectionEnv::new(benign_test, ransomware_test)?;
    let probes = test_pool.min(1000);
    let accuracy = trainer::evaluate(&mut agent, &mut test_env, probes)?;
    info!(accuracy, probes, "held-out evaluation");

    Ok(())
}
