//! DNS blocklist (DNSBL) lookups.

use lookout_client::DohClient;
use lookout_core::{DnsRecord, RecordType};
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;
use tracing::{debug, warn};

use crate::error::ReconResult;

/// Spamhaus combined blocklist zone
pub const DNSBL_ZONE: &str = "zen.spamhaus.org";

/// Outcome of a blocklist check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlacklistStatus {
    /// At least one address is listed
    Listed,
    /// No address is listed
    Clean,
    /// The check itself failed
    Unknown,
}

impl fmt::Display for BlacklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed => write!(f, "listed"),
            Self::Clean => write!(f, "not listed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Query name for `ip` in the blocklist zone
#[must_use]
pub fn dnsbl_name(ip: Ipv4Addr) -> String {
    let [a, b, c, d] = ip.octets();
    format!("{d}.{c}.{b}.{a}.{DNSBL_ZONE}")
}

/// IPv4 addresses carried by A records; other answers are ignored
pub fn ipv4_addresses(records: &[DnsRecord]) -> impl Iterator<Item = Ipv4Addr> + '_ {
    records
        .iter()
        .filter(|r| r.record_type == RecordType::A)
        .filter_map(|r| r.data.trim().parse().ok())
}

/// Check addresses one by one, stopping at the first listing.
///
/// Any failed query makes the whole result [`BlacklistStatus::Unknown`].
pub async fn check<I>(doh: &DohClient, addresses: I) -> BlacklistStatus
where
    I: IntoIterator<Item = Ipv4Addr>,
{
    for ip in addresses {
        match is_listed(doh, ip).await {
            Ok(true) => {
                debug!(%ip, "address is listed");
                return BlacklistStatus::Listed;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(%ip, error = %e, "blocklist check failed");
                return BlacklistStatus::Unknown;
            }
        }
    }
    BlacklistStatus::Clean
}

async fn is_listed(doh: &DohClient, ip: Ipv4Addr) -> ReconResult<bool> {
    let answers = doh.query(&dnsbl_name(ip), RecordType::A, &[]).await?;
    Ok(!answers.is_empty())
}
