//! Error taxonomy for build result resolution.

use std::num::ParseIntError;

/// Errors produced while building the build-number index or resolving a build.
#[derive(Debug, thiserror::Error)]
pub enum FailBuildError {
    /// A token in a build-number list is not an integer.
    #[error("invalid build number '{token}' in list '{list}': {source}")]
    Parse {
        token: String,
        list: String,
        #[source]
        source: ParseIntError,
    },

    /// The configured default policy name does not match any known policy.
    #[error("unknown result policy name: '{name}'")]
    UnknownPolicy { name: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for build result operations.
pub type Result<T> = std::result::Result<T, FailBuildError>;
