use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "PTZ control and live-feed panel for ward camera middleware")]
pub struct Args {
    /// Hostname or IP of the camera middleware
    #[arg(long)]
    pub host: String,

    /// Middleware HTTP port
    #[arg(long, default_value_t = 8083)]
    pub port: u16,

    /// Middleware API prefix
    #[arg(long, default_value = "/api/v1")]
    pub api_path: String,

    /// Bearer token for middleware authentication
    #[arg(long)]
    pub token: Option<String>,

    /// Camera asset identifier
    #[arg(long)]
    pub asset_id: String,

    /// Bed identifier scoping preset lookups
    #[arg(long)]
    pub bed_id: Option<String>,

    /// Movement boundary as min_x,max_x,min_y,max_y
    #[arg(long)]
    pub boundary: Option<String>,

    /// Identifier of the bed-asset boundary association
    #[arg(long, default_value_t = 0)]
    pub boundary_id: u64,

    /// Use HTTPS/WSS towards the middleware
    #[arg(long)]
    pub tls: bool,

    /// Allow invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Use HLS for the live feed instead of MSE over WebSocket
    #[arg(long)]
    pub hls: bool,

    /// Timeout in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub timeout_ms: u64,
}
