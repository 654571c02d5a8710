use crate::command::MoveDelta;
use crate::error::TransportError;
use crate::position::CameraPosition;
use crate::presets::Preset;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Acknowledgment for a move command. `seq` echoes the client-issued
/// sequence token so stale responses can be discarded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveAck {
    pub seq: u64,
    pub position: CameraPosition,
}

/// Device-reported position plus the sequence token of the last move
/// the middleware applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraStatus {
    pub seq: u64,
    pub position: CameraPosition,
}

/// Narrow interface over the external camera middleware. The remote
/// device is the sole source of truth for actual position; every
/// operation is exactly one outbound HTTP request with no retries.
#[async_trait]
pub trait CameraTransport: Send + Sync {
    async fn relative_move(&self, seq: u64, delta: MoveDelta) -> Result<MoveAck, TransportError>;
    async fn absolute_move(
        &self,
        seq: u64,
        position: CameraPosition,
    ) -> Result<MoveAck, TransportError>;
    async fn status(&self) -> Result<CameraStatus, TransportError>;
    async fn presets(&self) -> Result<Vec<Preset>, TransportError>;
    async fn store_preset(&self, preset: &Preset) -> Result<Preset, TransportError>;
}
