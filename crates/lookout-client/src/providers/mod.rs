//! Provider identities and their response adapters.
//!
//! A provider is an endpoint template plus an adapter tag. The tag is
//! assigned once, when the provider is registered, and carries the
//! normalizer that maps that provider's payloads into the canonical record.

mod fields;
mod geo;
mod whois;

pub use geo::GeoAdapter;
pub use whois::WhoisAdapter;

use lookout_core::{Candidate, LookoutError, Payload, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholders a template may use for the query subject
pub const PLACEHOLDERS: [&str; 2] = ["{ip}", "{host}"];

/// Built-in IP geolocation endpoints, in priority order
pub const DEFAULT_GEO_ENDPOINTS: &[&str] = &[
    "https://ip-api.com/json/{ip}",
    "https://ipwho.is/{ip}",
    "https://ipinfo.io/{ip}/json",
    "https://ipapi.co/{ip}/json",
    "https://freeipapi.com/api/json/{ip}",
    "https://ip.nf/{ip}.json",
    "https://api.ip.sb/geoip/{ip}",
    "https://extreme-ip-lookup.com/json/{ip}",
    "https://ipapi.com/ip_api.php?ip={ip}",
    "https://ip.seeip.org/geoip/{ip}",
    "https://geo.ipify.org/api/v2/country,city?apiKey=at_demo&ipAddress={ip}",
    "https://ipgeolocation.abstractapi.com/v1/?api_key=demo&ip_address={ip}",
    "https://ipgeolocation.io/ip-location/{ip}?apiKey=free",
    "https://ipstack.com/ipstack_api.php?ip={ip}&access_key=free",
    "https://ipapi.es/{ip}",
];

/// Built-in WHOIS endpoints (raced, so order does not matter)
pub const DEFAULT_WHOIS_ENDPOINTS: &[&str] = &[
    "https://api.whois.vu/?q={host}",
    "https://api.hackertarget.com/whois/?q={host}",
    "https://jsonwhoisapi.com/api/v1/whois?identifier={host}",
    "https://rproxy.glumy.cc/https://who.is/whois/{host}",
    "https://rdap.org/domain/{host}",
    "https://rdap.verisign.com/com/v1/domain/{host}",
    "https://rdap.markmonitor.com/rdap/domain/{host}",
    "https://rdap.godaddy.com/v1/domain/{host}",
];

/// Which provider list a registry operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// IP geolocation providers
    IpGeo,
    /// WHOIS / RDAP providers
    Whois,
}

impl ProviderKind {
    /// The built-in template list for this kind
    #[must_use]
    pub const fn defaults(self) -> &'static [&'static str] {
        match self {
            Self::IpGeo => DEFAULT_GEO_ENDPOINTS,
            Self::Whois => DEFAULT_WHOIS_ENDPOINTS,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IpGeo => write!(f, "ip-geo"),
            Self::Whois => write!(f, "whois"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = LookoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ip" | "geo" | "ip-geo" => Ok(Self::IpGeo),
            "whois" | "rdap" => Ok(Self::Whois),
            other => Err(LookoutError::Config(format!(
                "unknown provider kind: {other} (expected ip-geo or whois)"
            ))),
        }
    }
}

/// Normalizer capability carried by a provider tag
pub trait Adapter:
    Copy + fmt::Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Canonical record this adapter produces
    type Record: Candidate;

    /// Which provider list adapters of this type belong to
    const KIND: ProviderKind;

    /// Tag a template by the first entry of the substring table it matches,
    /// or the generic adapter when none does
    fn detect(template: &str) -> Self;

    /// Map a payload into the canonical record.
    ///
    /// Returns `None` when the payload has a shape no adapter can read. The
    /// result has not been through the quality gate yet.
    fn normalize(self, payload: &Payload, source: &str) -> Option<Self::Record>;

    /// Short stable name, used in logs and the settings file
    fn name(self) -> &'static str;
}

/// One external data source: an endpoint template and its adapter tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "ProviderEntry<A>",
    into = "ProviderEntry<A>",
    bound = "A: Adapter"
)]
pub struct Provider<A> {
    template: String,
    adapter: A,
}

impl<A: Adapter> Provider<A> {
    /// Register a template, tagging it with the adapter its URL matches
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let adapter = A::detect(&template);
        Self::with_adapter(template, adapter)
    }

    /// Register a template with an explicit adapter tag
    pub fn with_adapter(template: impl Into<String>, adapter: A) -> Result<Self> {
        let template = template.into().trim().to_string();
        if !PLACEHOLDERS.iter().any(|p| template.contains(p)) {
            return Err(LookoutError::Config(format!(
                "endpoint template has no {{ip}} or {{host}} placeholder: {template}"
            )));
        }
        Ok(Self { template, adapter })
    }

    /// The built-in providers for this adapter family
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        A::KIND
            .defaults()
            .iter()
            .map(|template| Self {
                template: (*template).to_string(),
                adapter: A::detect(template),
            })
            .collect()
    }

    /// The endpoint template
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The adapter tag
    #[must_use]
    pub const fn adapter(&self) -> A {
        self.adapter
    }

    /// Substitute the percent-encoded subject into the template
    #[must_use]
    pub fn resolve(&self, subject: &str) -> String {
        let encoded = urlencoding::encode(subject);
        PLACEHOLDERS
            .into_iter()
            .find(|p| self.template.contains(p))
            .map_or_else(
                || self.template.clone(),
                |p| self.template.replacen(p, &encoded, 1),
            )
    }

    /// Normalize a payload this provider returned
    #[must_use]
    pub fn normalize(&self, payload: &Payload, source: &str) -> Option<A::Record> {
        self.adapter.normalize(payload, source)
    }
}

/// On-disk shape of a provider: the adapter may be left out and detected
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProviderEntry<A> {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapter: Option<A>,
}

impl<A: Adapter> TryFrom<ProviderEntry<A>> for Provider<A> {
    type Error = LookoutError;

    fn try_from(entry: ProviderEntry<A>) -> Result<Self> {
        match entry.adapter {
            Some(adapter) => Self::with_adapter(entry.url, adapter),
            None => Self::new(entry.url),
        }
    }
}

impl<A> From<Provider<A>> for ProviderEntry<A> {
    fn from(provider: Provider<A>) -> Self {
        Self {
            url: provider.template,
            adapter: Some(provider.adapter),
        }
    }
}

/// First adapter in `table` whose pattern occurs in `template`
fn match_table<A: Copy>(table: &[(&str, A)], template: &str, fallback: A) -> A {
    let lower = template.to_ascii_lowercase();
    table
        .iter()
        .find(|(pattern, _)| lower.contains(*pattern))
        .map_or(fallback, |(_, adapter)| *adapter)
}
