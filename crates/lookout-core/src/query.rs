//! Query subjects and kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::net::IpAddr;

use crate::error::{LookoutError, Result};

/// What kind of answer a query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    /// IP geolocation (sequential fallback)
    IpGeo,
    /// Domain registration data (parallel race)
    Whois,
    /// Plain DNS record set (escalation ladder)
    DnsRecord,
    /// Reverse lookup of an IP literal
    Ptr,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IpGeo => write!(f, "ip-geo"),
            Self::Whois => write!(f, "whois"),
            Self::DnsRecord => write!(f, "dns-record"),
            Self::Ptr => write!(f, "ptr"),
        }
    }
}

/// A subject plus the kind of lookup to run on it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    subject: String,
    kind: QueryKind,
}

impl Query {
    /// Build a query without validating the subject
    pub fn new(kind: QueryKind, subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into().trim().to_string(),
            kind,
        }
    }

    /// IP geolocation query; the subject must be an IPv4 or IPv6 literal
    pub fn ip(subject: impl Into<String>) -> Result<Self> {
        let query = Self::new(QueryKind::IpGeo, subject);
        query.ip_addr()?;
        Ok(query)
    }

    /// Reverse lookup query; the subject must be an IP literal
    pub fn ptr(subject: impl Into<String>) -> Result<Self> {
        let query = Self::new(QueryKind::Ptr, subject);
        query.ip_addr()?;
        Ok(query)
    }

    /// The subject string
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The query kind
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Parse the subject as an IP literal
    pub fn ip_addr(&self) -> Result<IpAddr> {
        self.subject
            .parse()
            .map_err(|_| LookoutError::InvalidIp(self.subject.clone()))
    }
}

/// True when `subject` is an IPv4 or IPv6 literal
#[must_use]
pub fn is_ip_literal(subject: &str) -> bool {
    subject.trim().parse::<IpAddr>().is_ok()
}

/// Reverse-zone name for an address.
///
/// `1.2.3.4` becomes `4.3.2.1.in-addr.arpa`; IPv6 addresses expand to
/// nibbles under `ip6.arpa`.
#[must_use]
pub fn reverse_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}.in-addr.arpa")
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(72);
            for byte in v6.octets().iter().rev() {
                let _ = write!(name, "{:x}.{:x}.", byte & 0x0f, byte >> 4);
            }
            name.push_str("ip6.arpa");
            name
        }
    }
}

/// True when `name` is itself a reverse-zone name rather than a hostname
#[must_use]
pub fn is_reverse_zone_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("in-addr.arpa") || lower.contains("ip6.arpa")
}

/// Drop a leading `www.` label from a hostname
#[must_use]
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
