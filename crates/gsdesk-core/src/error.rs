use thiserror::Error;

/// Errors raised while loading configuration from the environment or from
/// the optional upload-formats YAML file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read upload formats file {path}: {source}")]
    FormatsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse upload formats file: {0}")]
    FormatsFileParse(#[source] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
