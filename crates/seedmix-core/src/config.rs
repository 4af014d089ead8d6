//! Engine start-up configuration.

use crate::algorithm::Algorithm;

/// Initial global seed and generator for an [`crate::Engine`].
///
/// The default is the empty seed with `splitmix32`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub seed: String,
    pub algorithm: Algorithm,
}

impl EngineConfig {
    pub fn new(seed: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            seed: seed.into(),
            algorithm,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_seed_splitmix() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, "");
        assert_eq!(config.algorithm, Algorithm::Splitmix32);
    }

    #[test]
    fn builders_override_fields() {
        let config = EngineConfig::default()
            .with_seed("010101")
            .with_algorithm(Algorithm::Sfc32);
        assert_eq!(config, EngineConfig::new("010101", Algorithm::Sfc32));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn postcard_keeps_algorithm() -> anyhow::Result<()> {
        let config = EngineConfig::new("abc", Algorithm::Xoshiro128StarStar);
        let bytes = postcard::to_allocvec(&config)?;
        let decoded: EngineConfig = postcard::from_bytes(&bytes)?;
        assert_eq!(decoded, config);
        Ok(())
    }
}
