//! Per-field priority chains.
//!
//! Each adapter is a table naming, for every canonical field, the source
//! paths to try in order. The first present, non-empty value wins.

use lookout_core::{GeoRecord, Payload, WhoisRecord, UNKNOWN};

/// Source paths for each canonical geo field
pub(super) struct GeoFields {
    pub ip: &'static [&'static str],
    pub country_code: &'static [&'static str],
    pub country: &'static [&'static str],
    pub region: &'static [&'static str],
    pub city: &'static [&'static str],
    pub org: &'static [&'static str],
}

impl GeoFields {
    /// Build a record from a JSON object payload
    pub fn extract(&self, payload: &Payload, source: &str) -> Option<GeoRecord> {
        payload.as_object()?;

        let pick = |paths: &[&str]| payload.first_field(paths).unwrap_or_else(|| UNKNOWN.to_string());
        let country = pick(self.country);
        let country_code = payload
            .first_field(self.country_code)
            .or_else(|| two_letter_code(&country))
            .unwrap_or_else(|| UNKNOWN.to_string());

        Some(GeoRecord {
            ip: pick(self.ip),
            country_code,
            country,
            region: pick(self.region),
            city: pick(self.city),
            org: pick(self.org),
            source: source.to_string(),
            hostname: None,
        })
    }
}

/// Source paths for each canonical WHOIS field
pub(super) struct WhoisFields {
    pub registered: &'static [&'static str],
    pub expiry: &'static [&'static str],
    pub registrar: &'static [&'static str],
}

impl WhoisFields {
    /// Build a record from a JSON object payload
    pub fn extract(&self, payload: &Payload, source: &str) -> Option<WhoisRecord> {
        payload.as_object()?;

        let pick = |paths: &[&str]| payload.first_field(paths).unwrap_or_default();
        Some(WhoisRecord {
            registered: pick(self.registered),
            expiry: pick(self.expiry),
            registrar: pick(self.registrar),
            source: source.to_string(),
        })
    }
}

/// Some providers only report an ISO code in their country field
fn two_letter_code(country: &str) -> Option<String> {
    (country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| country.to_ascii_uppercase())
}
