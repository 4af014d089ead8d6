use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),
}
