use crate::config::Target;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use wardcam_core::command::MoveDelta;
use wardcam_core::error::TransportError;
use wardcam_core::position::CameraPosition;
use wardcam_core::presets::Preset;
use wardcam_core::transport::{CameraStatus, CameraTransport, MoveAck};

/// HTTP consumer of the external device-middleware API. One outbound
/// request per command, no retries; the middleware brokers the actual
/// device protocol.
pub struct MiddlewareTransport {
    client: Client,
    target: Target,
}

#[derive(Serialize)]
struct MoveBody {
    seq: u64,
    x: f32,
    y: f32,
    zoom: f32,
}

#[derive(Deserialize)]
struct ConflictBody {
    version: u64,
}

impl MiddlewareTransport {
    pub fn new(client: Client, target: Target) -> Self {
        Self { client, target }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.target.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Response, TransportError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| TransportError::Request(format!("{operation}: {err}")))?;
        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{operation} failed with HTTP {status}: {body}");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        operation: &str,
        response: Response,
    ) -> Result<T, TransportError> {
        response
            .json::<T>()
            .await
            .map_err(|err| TransportError::Payload(format!("{operation}: {err}")))
    }
}

#[async_trait]
impl CameraTransport for MiddlewareTransport {
    async fn relative_move(&self, seq: u64, delta: MoveDelta) -> Result<MoveAck, TransportError> {
        let endpoint = self.target.api_endpoint("relativeMove");
        log::debug!("relativeMove seq={seq} delta={delta:?} -> {endpoint}");
        let body = MoveBody {
            seq,
            x: delta.x,
            y: delta.y,
            zoom: delta.zoom,
        };
        let response = self
            .send("relativeMove", self.client.post(&endpoint).json(&body))
            .await?;
        Self::decode("relativeMove", response).await
    }

    async fn absolute_move(
        &self,
        seq: u64,
        position: CameraPosition,
    ) -> Result<MoveAck, TransportError> {
        let endpoint = self.target.api_endpoint("absoluteMove");
        log::debug!("absoluteMove seq={seq} position={position:?} -> {endpoint}");
        let body = MoveBody {
            seq,
            x: position.x,
            y: position.y,
            zoom: position.zoom,
        };
        let response = self
            .send("absoluteMove", self.client.post(&endpoint).json(&body))
            .await?;
        Self::decode("absoluteMove", response).await
    }

    async fn status(&self) -> Result<CameraStatus, TransportError> {
        let endpoint = self.target.api_endpoint("status");
        let response = self.send("status", self.client.get(&endpoint)).await?;
        Self::decode("status", response).await
    }

    async fn presets(&self) -> Result<Vec<Preset>, TransportError> {
        let endpoint = self.target.presets_endpoint();
        let response = self.send("presets", self.client.get(&endpoint)).await?;
        Self::decode("presets", response).await
    }

    async fn store_preset(&self, preset: &Preset) -> Result<Preset, TransportError> {
        let endpoint = self.target.preset_endpoint(preset.id);
        log::debug!(
            "storePreset id={} version={} -> {endpoint}",
            preset.id,
            preset.version
        );
        let response = self
            .authorize(self.client.put(&endpoint).json(preset))
            .send()
            .await
            .map_err(|err| TransportError::Request(format!("storePreset: {err}")))?;
        let status = response.status();
        if status == StatusCode::CONFLICT {
            let body: ConflictBody = Self::decode("storePreset", response).await?;
            return Err(TransportError::Conflict {
                actual: body.version,
            });
        }
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("storePreset failed with HTTP {status}: {body}");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Self::decode("storePreset", response).await
    }
}

#[cfg(test)]
mod tests {
    mod success {
        use crate::middleware::MoveBody;
        use serde_json::json;
        use wardcam_core::presets::Preset;

        #[test]
        fn move_body_shape() {
            // values exactly representable in f32 so the JSON compares equal
            let body = MoveBody {
                seq: 4,
                x: 0.5,
                y: 0.0,
                zoom: -0.25,
            };
            let value = serde_json::to_value(&body).unwrap();
            assert_eq!(value, json!({"seq": 4, "x": 0.5, "y": 0.0, "zoom": -0.25}));
        }

        #[test]
        fn preset_payload_parses() {
            let raw = json!([
                {
                    "id": 3,
                    "meta": {
                        "preset_name": "bed head",
                        "position": {"x": 0.1, "y": 0.5, "zoom": 0.0}
                    },
                    "version": 2
                },
                {
                    "id": 1,
                    "meta": {
                        "preset_name": "door",
                        "position": {"x": 0.9, "y": 0.4, "zoom": 0.3}
                    }
                }
            ]);
            let presets: Vec<Preset> = serde_json::from_value(raw).unwrap();
            assert_eq!(presets[0].meta.preset_name, "bed head");
            assert_eq!(presets[0].version, 2);
            // version token defaults to zero for legacy rows
            assert_eq!(presets[1].version, 0);
        }
    }
}
