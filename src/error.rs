use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymgpError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Resource error: {path}: {source}")]
    Resource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Numeric error: {0}")]
    Numeric(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl SymgpError {
    /// Wrap an IO failure with the path of the resource that caused it
    pub fn resource<P: AsRef<std::path::Path>>(path: P, source: std::io::Error) -> Self {
        Self::Resource {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SymgpError>;
