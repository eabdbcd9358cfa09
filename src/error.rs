use thiserror::Error;

/// Rejected analysis configuration. Per-frame detection never errors; a frame
/// without a usable pitch is reported as `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("silence threshold must be finite and non-negative, got {0}")]
    SilenceThreshold(f64),
    #[error("trim threshold must be finite and non-negative, got {0}")]
    TrimThreshold(f64),
    #[error("reference pitch must be a finite frequency above 0 Hz, got {0}")]
    ReferencePitch(f64),
}
