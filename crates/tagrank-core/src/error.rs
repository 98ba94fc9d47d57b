use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read hashtags file {path}: {source}")]
    HashtagsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
