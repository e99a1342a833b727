// ── Runtime store configuration ──
//
// These types describe *where* the apartment service lives and where the
// fallback cache is kept. They never touch disk themselves: the CLI (via
// roost-config) constructs a `StoreConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use roost_api::{TlsMode, TransportConfig};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Where the fallback cache lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLocation {
    /// A JSON file slot at this path.
    File(PathBuf),
    /// Process memory only; nothing survives the run.
    Memory,
}

/// Configuration for one apartment store session.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the apartment service; `apartments` is appended to it.
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Fallback cache slot.
    pub cache: CacheLocation,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            cache: CacheLocation::Memory,
        }
    }
}

impl StoreConfig {
    /// Translate into the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
