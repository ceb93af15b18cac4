//! Error types for the heliofield editor
//!
//! Gizmo construction and configuration loading report typed errors; the
//! application boundary wraps them in `anyhow`.

/// Errors raised by the orientation gizmo.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GizmoError {
    #[error("unknown indicator style '{0}' (expected \"arrows\" or \"circles\")")]
    InvalidStyle(String),

    #[error("unknown axis direction '{0}'")]
    UnknownDirection(String),

    #[error("overlay extent must be at least 1px, got {0}")]
    InvalidOverlaySize(u32),

    #[error("turn rate must be a positive number of radians per second, got {0}")]
    InvalidTurnRate(f32),

    #[error("a turn is already in progress")]
    TurnInProgress,
}

/// Errors raised while building an [`EditorConfig`](crate::config::EditorConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Gizmo(#[from] GizmoError),
}

impl ConfigError {
    pub fn invalid<T: ToString>(key: &'static str, value: T) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }
    }
}

/// Result alias for gizmo operations
pub type GizmoResult<T> = Result<T, GizmoError>;
