use crate::cli::Args;
use anyhow::{bail, Result};
use std::time::Duration;
use wardcam_core::position::{Boundary, BoundaryPreset};
use wardcam_core::stream::StreamKind;

#[derive(Debug, Clone)]
pub struct Target {
    host: String,
    port: u16,
    api_path: String,
    token: Option<String>,
    asset_id: String,
    bed_id: Option<String>,
    boundary: Option<BoundaryPreset>,
    tls: bool,
    insecure: bool,
    hls: bool,
    timeout: Duration,
}

impl Target {
    pub fn from_args(args: &Args) -> Result<Self> {
        let host = args.host.trim().to_string();
        if host.is_empty() {
            bail!("host is required");
        }
        let asset_id = args.asset_id.trim().to_string();
        if asset_id.is_empty() {
            bail!("asset-id is required");
        }
        let boundary = match &args.boundary {
            Some(raw) => Some(BoundaryPreset::new(args.boundary_id, parse_boundary(raw)?)),
            None => None,
        };
        Ok(Self {
            host,
            port: args.port,
            api_path: normalize_path(&args.api_path),
            token: args.token.clone(),
            asset_id,
            bed_id: args.bed_id.clone(),
            boundary,
            tls: args.tls,
            insecure: args.insecure,
            hls: args.hls,
            timeout: Duration::from_millis(args.timeout_ms),
        })
    }

    fn http_scheme(&self) -> &'static str {
        if self.tls {
            "https"
        } else {
            "http"
        }
    }

    fn ws_scheme(&self) -> &'static str {
        if self.tls {
            "wss"
        } else {
            "ws"
        }
    }

    pub fn api_endpoint(&self, operation: &str) -> String {
        format!(
            "{}://{}:{}{}/assets/{}/{}",
            self.http_scheme(),
            self.host,
            self.port,
            self.api_path,
            self.asset_id,
            operation
        )
    }

    pub fn presets_endpoint(&self) -> String {
        let base = self.api_endpoint("presets");
        match &self.bed_id {
            Some(bed) => format!("{base}?bed={bed}"),
            None => base,
        }
    }

    pub fn preset_endpoint(&self, id: u64) -> String {
        format!("{}/{}", self.api_endpoint("presets"), id)
    }

    pub fn stream_url(&self) -> String {
        match self.stream_kind() {
            StreamKind::Mse => format!(
                "{}://{}:{}/stream/{}/channel/0/mse",
                self.ws_scheme(),
                self.host,
                self.port,
                self.asset_id
            ),
            StreamKind::Hls => format!(
                "{}://{}:{}/stream/{}/channel/0/hls/live/index.m3u8",
                self.http_scheme(),
                self.host,
                self.port,
                self.asset_id
            ),
        }
    }

    pub fn stream_probe_url(&self) -> String {
        format!(
            "{}://{}:{}/stream/{}/status",
            self.http_scheme(),
            self.host,
            self.port,
            self.asset_id
        )
    }

    pub fn stream_kind(&self) -> StreamKind {
        if self.hls {
            StreamKind::Hls
        } else {
            StreamKind::Mse
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn boundary(&self) -> Option<BoundaryPreset> {
        self.boundary
    }

    pub fn insecure(&self) -> bool {
        self.insecure
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_boundary(raw: &str) -> Result<Boundary> {
    let parts: Vec<f32> = raw
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|err| anyhow::anyhow!("invalid boundary '{raw}': {err}"))?;
    let [min_x, max_x, min_y, max_y] = parts.as_slice() else {
        bail!("boundary must be min_x,max_x,min_y,max_y");
    };
    Ok(Boundary::new(*min_x, *max_x, *min_y, *max_y))
}
