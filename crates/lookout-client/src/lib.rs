//! Provider orchestration for lookout.
//!
//! This crate provides the [`LookupEngine`], which resolves IP geolocation
//! and WHOIS queries against a configurable list of public providers, plus
//! the DNS-over-HTTPS client used for record fetches and reverse lookups.

#![doc(html_root_url = "https://docs.rs/lookout-client/0.3.0")]

mod cache;
mod client;
mod config;
pub mod dns;
mod engine;
pub mod enrichment;
pub mod orchestrator;
pub mod providers;
pub mod registry;

pub use cache::{CacheEntry, ResultCache};
pub use client::{HttpClient, HttpClientBuilder};
pub use config::*;
pub use dns::{DohClient, DEFAULT_RESOLVER};
pub use engine::{LookupEngine, LookupEngineBuilder};
pub use lookout_core::{LookoutError, Result};
pub use orchestrator::Strategy;
pub use providers::{Adapter, GeoAdapter, Provider, ProviderKind, WhoisAdapter};
pub use registry::{ConfigStore, FileStore, MemoryStore, ProviderRegistry, Settings, Theme};
