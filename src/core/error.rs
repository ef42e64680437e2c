//! Error types for the named logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Format template failed to compile
    #[error("Invalid template at byte {position}: {message}")]
    InvalidTemplate { position: usize, message: String },

    /// File-backed sink could not be opened
    #[error("Failed to open log sink '{path}': {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Sink rejected a write during a logging call
    #[error("Write to sink '{sink}' failed: {source}")]
    Write {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Level name or number could not be parsed
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON settings error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a template compilation error
    pub fn template(position: usize, message: impl Into<String>) -> Self {
        LoggerError::InvalidTemplate {
            position,
            message: message.into(),
        }
    }

    /// Create a sink open error for the given path
    pub fn sink_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a sink write error
    pub fn write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Write {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid level error
    pub fn level<S: Into<String>>(input: S) -> Self {
        LoggerError::InvalidLevel(input.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from a rejected format template
    pub fn is_template(&self) -> bool {
        matches!(self, LoggerError::InvalidTemplate { .. })
    }
}
