//! Federated IP geolocation, WHOIS and DNS lookups.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lookout::LookupEngine;
//!
//! #[tokio::main]
//! async fn main() -> lookout::Result<()> {
//!     let engine = LookupEngine::builder().build().await?;
//!
//!     // Walks the IP-geo providers in order until one answers well
//!     if let Some(geo) = engine.lookup_ip("8.8.8.8").await? {
//!         println!("{}, {} via {}", geo.city, geo.country, geo.source_host());
//!     }
//!
//!     // Races every WHOIS provider, first good answer wins
//!     if let Some(whois) = engine.lookup_whois("example.com").await? {
//!         println!("registrar: {}", whois.registrar);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS
//! - `recon` - DNS overview report and blocklist check

#![doc(html_root_url = "https://docs.rs/lookout/0.3.0")]

// Re-export core types
pub use lookout_core::*;

// Re-export engine and its collaborators
pub use lookout_client::{
    providers, registry, Adapter, ConfigStore, DohClient, EscalationConfig, FileStore, GeoAdapter,
    LookupEngine, LookupEngineBuilder, MemoryStore, Provider, ProviderKind, ProviderRegistry,
    Settings, Strategy, Theme, WhoisAdapter,
};

// Re-export recon if enabled
#[cfg(feature = "recon")]
pub use lookout_recon as recon;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
