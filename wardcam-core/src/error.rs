use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Pan,
    Tilt,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Pan => write!(f, "pan"),
            Axis::Tilt => write!(f, "tilt"),
        }
    }
}

/// Failures raised by the HTTP transport to the camera middleware.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("middleware request failed: {0}")]
    Request(String),
    #[error("middleware returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed middleware payload: {0}")]
    Payload(String),
    #[error("preset version conflict, server has version {actual}")]
    Conflict { actual: u64 },
}

/// Everything a PTZ command can fail with. Boundary violations are
/// detected locally and never reach the network; all variants are
/// terminal for the triggering action.
#[derive(Debug, Error)]
pub enum PtzError {
    #[error("cannot move beyond boundary: {axis} {value:.3} outside [{min:.3}..{max:.3}]")]
    Boundary {
        axis: Axis,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid {what}: {detail}")]
    Validation { what: &'static str, detail: String },
    #[error("preset {id} not found")]
    PresetNotFound { id: u64 },
    #[error("preset {id} was updated by another session (expected version {expected}, server has {actual})")]
    PresetConflict { id: u64, expected: u64, actual: u64 },
}
