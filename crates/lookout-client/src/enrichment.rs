//! Reverse-lookup enrichment of accepted IP records.

use lookout_core::query::is_reverse_zone_name;
use lookout_core::{DnsRecord, RecordType};
use std::net::IpAddr;
use tracing::debug;

use crate::dns::DohClient;

/// Human-readable name for an IP subject, if one can be found.
///
/// Never fails: a subject that is not an IP literal, a transport error or
/// an empty answer set all yield `None`.
pub async fn reverse_hostname(doh: &DohClient, subject: &str) -> Option<String> {
    let ip: IpAddr = subject.trim().parse().ok()?;
    match doh.reverse(ip).await {
        Ok(answers) => pick_hostname(&answers),
        Err(e) => {
            debug!(subject, error = %e, "reverse lookup failed");
            None
        }
    }
}

/// Choose a hostname from PTR answers.
///
/// Prefers the first PTR whose data is a real name rather than an echo of
/// the reverse-zone name; otherwise the first answer. The trailing root dot
/// is removed.
#[must_use]
pub fn pick_hostname(answers: &[DnsRecord]) -> Option<String> {
    answers
        .iter()
        .find(|a| a.record_type == RecordType::Ptr && !is_reverse_zone_name(&a.data))
        .or_else(|| answers.first())
        .map(|a| a.data_without_root().to_string())
        .filter(|name| !name.is_empty())
}
