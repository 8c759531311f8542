use thiserror::Error;

/// Errors raised while loading or validating a rocket configuration.
///
/// Any of these means the simulation never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`{field}` must have 3 components, got {len}")]
    VectorDimension { field: &'static str, len: usize },

    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
}
