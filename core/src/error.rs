use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a simulation configuration.
///
/// All of them are reported before any run starts, so a configuration
/// error never produces partial results.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration is empty, expected a `K,H,N,R,P` header line")]
    MissingHeader,
    /// Line numbers are 1-based.
    #[error("line {line}: expected {expected} comma-separated fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: malformed {field} `{value}`")]
    Field {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("header declares {declared} categories but {found} were given")]
    CategoryCount { declared: usize, found: usize },
    #[error("rate must be finite and positive, got {rate}")]
    InvalidRate { rate: f64 },
    #[error("category {category}: {source}")]
    Category {
        category: usize,
        #[source]
        source: Box<ConfigError>,
    },
    #[error("unknown policy selector {0}, expected 0 (round-robin) or 1 (least-loaded)")]
    UnknownPolicy(u8),
    #[error("at least one server is required")]
    ZeroServers,
    #[error("at least one run is required")]
    ZeroRuns,
    #[error("at least one job category is required")]
    NoCategories,
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
