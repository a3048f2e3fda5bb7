use serde::{Deserialize, Serialize};

use super::{Candidate, UNKNOWN};

/// Canonical IP geolocation record.
///
/// Every field except `hostname` is always present; fields no provider
/// could fill hold `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    /// IP address as reported by the provider
    pub ip: String,

    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,

    /// Country name (some providers only give the code)
    pub country: String,

    /// Region / state
    pub region: String,

    /// City
    pub city: String,

    /// Organization, ISP or ASN
    pub org: String,

    /// Resolved provider URL that produced this record
    pub source: String,

    /// Reverse DNS name, filled by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl GeoRecord {
    /// Host part of the source URL, for display
    #[must_use]
    pub fn source_host(&self) -> &str {
        let rest = self
            .source
            .split_once("://")
            .map_or(self.source.as_str(), |(_, rest)| rest);
        rest.split(['/', '?', ':']).next().unwrap_or(rest)
    }
}

impl Candidate for GeoRecord {
    fn passes_quality_gate(&self) -> bool {
        !self.country.is_empty() && self.country != UNKNOWN
    }

    fn source(&self) -> &str {
        &self.source
    }
}
