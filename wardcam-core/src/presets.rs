use crate::controller::PtzController;
use crate::error::{PtzError, TransportError};
use crate::position::CameraPosition;
use crate::transport::CameraTransport;
use serde::{Deserialize, Serialize};

/// Named absolute camera position tied to a hospital bed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: u64,
    pub meta: PresetMeta,
    /// Optimistic-concurrency token; bumped server-side on every store.
    #[serde(default)]
    pub version: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetMeta {
    pub preset_name: String,
    pub position: CameraPosition,
}

/// Lists, recalls, and overwrites the bed's named presets. Order is
/// whatever the server returned; no client-side sort.
#[derive(Debug, Default)]
pub struct PresetManager {
    presets: Vec<Preset>,
    current: Option<u64>,
}

impl PresetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn current(&self) -> Option<&Preset> {
        let id = self.current?;
        self.presets.iter().find(|preset| preset.id == id)
    }

    pub fn by_index(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub async fn refresh<T: CameraTransport>(
        &mut self,
        transport: &T,
    ) -> Result<&[Preset], PtzError> {
        self.presets = transport.presets().await?;
        if let Some(id) = self.current {
            if !self.presets.iter().any(|preset| preset.id == id) {
                self.current = None;
            }
        }
        Ok(&self.presets)
    }

    /// Absolute-move to the stored position; the preset becomes
    /// "current" only once the middleware acknowledges the move.
    pub async fn goto<T: CameraTransport>(
        &mut self,
        transport: &T,
        id: u64,
        controller: &mut PtzController,
    ) -> Result<(), PtzError> {
        let preset = self
            .presets
            .iter()
            .find(|preset| preset.id == id)
            .ok_or(PtzError::PresetNotFound { id })?;
        let pending = controller.plan_absolute(preset.meta.position);
        match transport.absolute_move(pending.seq, pending.plan.target).await {
            Ok(ack) => {
                controller.apply_ack(ack);
                self.current = Some(id);
                Ok(())
            }
            Err(err) => {
                controller.fail(pending.seq);
                Err(err.into())
            }
        }
    }

    /// Read the camera's live position and overwrite the preset with
    /// it. The stored version token rides along; a concurrent update
    /// from another staff session surfaces as `PresetConflict` instead
    /// of silently winning.
    pub async fn update<T: CameraTransport>(
        &mut self,
        transport: &T,
        id: u64,
    ) -> Result<Preset, PtzError> {
        let index = self
            .presets
            .iter()
            .position(|preset| preset.id == id)
            .ok_or(PtzError::PresetNotFound { id })?;
        let status = transport.status().await?;
        let mut candidate = self.presets[index].clone();
        candidate.meta.position = status.position;
        let expected = candidate.version;
        let stored = match transport.store_preset(&candidate).await {
            Ok(stored) => stored,
            Err(TransportError::Conflict { actual }) => {
                return Err(PtzError::PresetConflict {
                    id,
                    expected,
                    actual,
                })
            }
            Err(err) => return Err(err.into()),
        };
        self.presets[index] = stored.clone();
        Ok(stored)
    }
}
