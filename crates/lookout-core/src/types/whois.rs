use serde::{Deserialize, Serialize};

use super::Candidate;

/// Canonical WHOIS record. Unresolved fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisRecord {
    /// Registration / creation date, as the provider formats it
    pub registered: String,

    /// Expiration date
    pub expiry: String,

    /// Registrar name
    pub registrar: String,

    /// Resolved provider URL that won the race
    pub source: String,
}

impl Candidate for WhoisRecord {
    fn passes_quality_gate(&self) -> bool {
        !(self.registered.is_empty() && self.expiry.is_empty() && self.registrar.is_empty())
    }

    fn source(&self) -> &str {
        &self.source
    }
}
