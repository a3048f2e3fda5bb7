//! DNS overview report for a site.

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use lookout_client::{DohClient, EscalationConfig};
use lookout_core::query::strip_www;
use lookout_core::{DnsRecord, RecordType};
use serde::Serialize;
use std::net::IpAddr;
use tracing::{debug, info, instrument};

use crate::blacklist::{self, BlacklistStatus};
use crate::error::{ReconError, ReconResult};

/// Record counts per section of a [`DnsReport`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub a: usize,
    pub ptr: usize,
    pub www: usize,
    pub ns: usize,
    pub mx: usize,
    pub txt: usize,
}

/// Everything DNS knows about a site, gathered in one pass
#[derive(Debug, Clone, Serialize)]
pub struct DnsReport {
    /// Inspected host, with any leading `www.` removed
    pub host: String,
    pub a: Vec<DnsRecord>,
    /// Reverse names of every A record address
    pub ptr: Vec<DnsRecord>,
    /// CNAME of `www.<host>`, or its A records when there is no CNAME
    pub www: Vec<DnsRecord>,
    pub ns: Vec<DnsRecord>,
    pub mx: Vec<DnsRecord>,
    pub txt: Vec<DnsRecord>,
    pub counts: RecordCounts,
    pub blacklist: BlacklistStatus,
    pub collected_at: DateTime<Utc>,
}

impl DnsReport {
    /// Collect a report for `host`.
    ///
    /// Individual record sets that fail to resolve come back empty; only a
    /// host that cannot be a DNS name is an error.
    #[instrument(skip(doh, escalation))]
    pub async fn collect(
        doh: &DohClient,
        escalation: &EscalationConfig,
        host: &str,
    ) -> ReconResult<Self> {
        let host = validate_host(host)?;

        let a = doh.records(&host, RecordType::A, escalation).await;
        let addresses: Vec<IpAddr> = a
            .iter()
            .filter(|r| r.is_address_record())
            .filter_map(|r| r.data.trim().parse().ok())
            .collect();

        let (ptr, blacklist, www, ns, mx, txt) = tokio::join!(
            reverse_all(doh, &addresses),
            blacklist::check(doh, blacklist::ipv4_addresses(&a)),
            www_records(doh, &host),
            doh.records(&host, RecordType::Ns, escalation),
            doh.records(&host, RecordType::Mx, escalation),
            doh.records(&host, RecordType::Txt, escalation),
        );

        let counts = RecordCounts {
            a: a.len(),
            ptr: ptr.len(),
            www: www.len(),
            ns: ns.len(),
            mx: mx.len(),
            txt: txt.len(),
        };
        info!(host = %host, ?counts, %blacklist, "DNS report collected");

        Ok(Self {
            host,
            a,
            ptr,
            www,
            ns,
            mx,
            txt,
            counts,
            blacklist,
            collected_at: Utc::now(),
        })
    }

    /// Sections in display order, labelled
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &[DnsRecord]); 6] {
        [
            ("A", self.a.as_slice()),
            ("WWW", self.www.as_slice()),
            ("NS", self.ns.as_slice()),
            ("MX", self.mx.as_slice()),
            ("TXT", self.txt.as_slice()),
            ("PTR", self.ptr.as_slice()),
        ]
    }

    /// Total number of records across all sections
    #[must_use]
    pub fn total(&self) -> usize {
        self.sections().iter().map(|(_, records)| records.len()).sum()
    }
}

fn validate_host(host: &str) -> ReconResult<String> {
    let lower = host.trim().trim_end_matches('.').to_ascii_lowercase();
    let host = strip_www(&lower).to_string();
    if host.is_empty()
        || host.len() > 253
        || host.contains(|c: char| c.is_whitespace() || matches!(c, '/' | ':' | '@' | '?' | '#'))
    {
        return Err(ReconError::InvalidHost(host));
    }
    Ok(host)
}

async fn reverse_all(doh: &DohClient, addresses: &[IpAddr]) -> Vec<DnsRecord> {
    let lookups = addresses.iter().map(|ip| async move {
        doh.reverse(*ip).await.unwrap_or_else(|e| {
            debug!(%ip, error = %e, "PTR lookup failed");
            Vec::new()
        })
    });
    join_all(lookups).await.into_iter().flatten().collect()
}

/// `www.<host>` as a CNAME, falling back to plain A records
async fn www_records(doh: &DohClient, host: &str) -> Vec<DnsRecord> {
    let www = format!("www.{host}");
    match doh.query(&www, RecordType::Cname, &[]).await {
        Ok(cname) if !cname.is_empty() => cname,
        Ok(_) => doh.query(&www, RecordType::A, &[]).await.unwrap_or_else(|e| {
            debug!(host = %www, error = %e, "www A lookup failed");
            Vec::new()
        }),
        Err(e) => {
            debug!(host = %www, error = %e, "www CNAME lookup failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_is_normalized() {
        assert_eq!(validate_host("www.Example.COM.").unwrap(), "example.com");
        assert_eq!(validate_host("  example.org ").unwrap(), "example.org");
    }

    #[test]
    fn urls_and_blanks_are_rejected() {
        assert!(matches!(validate_host(""), Err(ReconError::InvalidHost(_))));
        assert!(validate_host("https://example.com/").is_err());
        assert!(validate_host("exa mple.com").is_err());
    }
}
