use cumle_protocol::BundleError;
use thiserror::Error;

/// Why an exercise file was rejected. The current set is kept in every case.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("file has no \"sentences\" field")]
    MissingSentences,

    #[error("\"sentences\" is not a list")]
    NotAList,

    #[error("sentence {index} has the wrong shape: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no sentence at position {index} (set has {len})")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("could not serialize exercise set: {0}")]
    Export(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
