use std::path::PathBuf;
use thiserror::Error;

/// Failures that halt a pipeline run.
///
/// Cleanup of containers never produces one of these: its failures are
/// logged and swallowed so they cannot mask the error that triggered it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to start container {name}: {reason}")]
    ContainerStart { name: String, reason: String },

    #[error("{url} did not become ready after {attempts} attempt(s)")]
    ReadinessTimeout { url: String, attempts: u32 },

    #[error("client generation failed: {reason}")]
    Generation { reason: String },

    #[error("packaging failed: {reason}")]
    Packaging { reason: String },

    #[error("failed to clean {}: {reason}", .path.display())]
    Cleanup { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
