use std::io;
use std::path::PathBuf;

/// Errors raised while building or hosting a grid engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The framework is known but this build ships no adapter for it.
    #[error("Framework '{framework}' has no adapter in this build")]
    UnsupportedFramework { framework: String },

    /// The framework name is not recognized.
    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    /// Terminal setup or output failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Errors raised while loading a grid layout file.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Failed to read layout '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid layout: {0}")]
    Parse(#[from] serde_json::Error),
}
