use clap::Parser;

use crate::repositories::google_places_repo::PLACES_BASE_URL;

/// Process configuration, read once at startup. A missing API key aborts the
/// process before any request handling starts.
#[derive(Parser, Clone)]
pub struct Config {
    #[clap(env, long)]
    pub google_maps_api_key: String,

    #[clap(env, long, default_value = "4000")]
    pub port: u16,

    /// Comma-separated list of allowed CORS origins.
    #[clap(
        env,
        long,
        default_value = "http://localhost:5173,http://127.0.0.1:5173,http://localhost:3000,http://127.0.0.1:3000"
    )]
    pub origin_urls: String,

    /// Upstream Places API base URL, overridable to point at a local stand-in.
    #[clap(env, long, default_value = PLACES_BASE_URL)]
    pub places_base_url: String,
}
