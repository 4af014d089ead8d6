#![allow(dead_code)]

use std::sync::Arc;

use seedmix_core::{Algorithm, Engine, EngineConfig};

/// Sub-seed count used by the statistical laws.
pub const LAW_SAMPLES: usize = 100_000;

pub const GOLDEN_SEED: &str = "010101";

pub fn engine(seed: &str, algorithm: Algorithm) -> Engine {
    Engine::with_config(EngineConfig::new(seed, algorithm))
}

pub fn shared(seed: &str, algorithm: Algorithm) -> Arc<Engine> {
    Arc::new(engine(seed, algorithm))
}
