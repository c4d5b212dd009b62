//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Base URL of the billing API.
    pub billing_api_url: String,
    /// Billing API credential. Absent means every billing call is rejected
    /// with a validation alert before any network I/O.
    #[serde(default)]
    pub billing_api_key: Option<String>,
}
