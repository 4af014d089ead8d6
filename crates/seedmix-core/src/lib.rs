//! Deterministic seeded values.
//!
//! A seed string is hashed into four 32-bit words ([`hash`]), one of five small
//! generators turns those words into a uniform draw ([`algorithm`]), and the
//! [`Engine`] reshapes that draw into booleans, ranges, colors, picks and Gaussian
//! samples. Every draw is a pure function of `(global seed, algorithm, sub-seed)`.
//!
//! ```
//! use seedmix_core::{Algorithm, Engine, EngineConfig};
//!
//! let engine = Engine::with_config(EngineConfig::new("010101", Algorithm::Splitmix32));
//! assert_eq!(engine.random_float("angle", 0.0, 3.14159, 2), 2.25);
//! assert_eq!(engine.random_index("empty", &[]), -1);
//! ```
//!
//! Nothing here is suitable for cryptography.

pub mod algorithm;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod hash;
pub mod notify;

pub use algorithm::Algorithm;
pub use config::EngineConfig;
pub use controller::SeededValue;
pub use engine::{DEFAULT_PRECISION, DEFAULT_PROBABILITY, Engine};
pub use error::Error;
pub use hash::ExpandedState;
pub use notify::{ChangeNotifier, Dependent, DependentId};
