//! Client configuration.

/// Configuration for the Verdia client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the REST API (e.g. "http://localhost:5000/api").
    pub api_url: String,
    /// Base URL of the realtime channel (e.g. "ws://localhost:5000").
    pub ws_url: String,
}

impl ClientConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable         | Default                     |
    /// |------------------|-----------------------------|
    /// | `VERDIA_API_URL` | `http://localhost:5000/api` |
    /// | `VERDIA_WS_URL`  | `ws://localhost:5000`       |
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("VERDIA_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".into()),
            ws_url: std::env::var("VERDIA_WS_URL")
                .unwrap_or_else(|_| "ws://localhost:5000".into()),
        }
    }

    /// Configuration pointing at an explicit API base URL.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ws_url: "ws://localhost:5000".into(),
        }
    }
}
