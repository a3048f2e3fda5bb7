//! DNS-over-HTTPS client and the escalation ladder.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lookout_core::query::reverse_name;
use lookout_core::{DnsRecord, RecordType, Result};
use serde::Deserialize;
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::client::HttpClient;
use crate::config::{EscalationConfig, LADDER};

/// Google's JSON DoH endpoint
pub const DEFAULT_RESOLVER: &str = "https://dns.google/resolve";

/// Queries per second allowed against the resolver
const DEFAULT_QUERIES_PER_SECOND: u32 = 20;

/// Client for a JSON DNS-over-HTTPS resolver
#[derive(Clone)]
pub struct DohClient {
    inner: Arc<DohInner>,
}

struct DohInner {
    http: HttpClient,
    endpoint: String,
    limiter: DefaultDirectRateLimiter,
}

impl DohClient {
    /// Client for `endpoint` with the default query rate
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self::with_rate(http, endpoint, DEFAULT_QUERIES_PER_SECOND)
    }

    /// Client for `endpoint` allowing `per_second` queries per second
    pub fn with_rate(http: HttpClient, endpoint: impl Into<String>, per_second: u32) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN));
        Self {
            inner: Arc::new(DohInner {
                http,
                endpoint: endpoint.into(),
                limiter: RateLimiter::direct(quota),
            }),
        }
    }

    /// The resolver endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Issue one query. Transport and parse failures are errors.
    pub async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        extra: &[(&str, &str)],
    ) -> Result<Vec<DnsRecord>> {
        self.inner.limiter.until_ready().await;

        let rtype = record_type.to_string();
        let mut params = vec![("name", name), ("type", rtype.as_str())];
        params.extend_from_slice(extra);

        let response: DohResponse = self.inner.http.get_json(&self.inner.endpoint, &params).await?;
        debug!(name, record_type = %record_type, status = response.status, answers = response.answer.len(), "DoH answer");
        Ok(response.answer.into_iter().map(DnsRecord::from).collect())
    }

    /// Fetch a record set, escalating on empty answers.
    ///
    /// The ladder is climbed only while the previous attempt returned a valid
    /// but empty answer set and `name` matches one of the escalation
    /// suffixes. A transport or parse failure at any rung ends the fetch with
    /// zero records.
    #[instrument(skip(self, escalation))]
    pub async fn records(
        &self,
        name: &str,
        record_type: RecordType,
        escalation: &EscalationConfig,
    ) -> Vec<DnsRecord> {
        let mut answers = match self.query(name, record_type, &[]).await {
            Ok(answers) => answers,
            Err(e) => {
                debug!(error = %e, "DNS query failed");
                return Vec::new();
            }
        };

        if !answers.is_empty() || !escalation.applies_to(name) {
            return answers;
        }

        for (rung, params) in LADDER.iter().enumerate() {
            debug!(rung = rung + 1, "empty answer, escalating");
            answers = match self.query(name, record_type, params).await {
                Ok(answers) => answers,
                Err(e) => {
                    debug!(rung = rung + 1, error = %e, "escalated DNS query failed");
                    return Vec::new();
                }
            };
            if !answers.is_empty() {
                break;
            }
        }

        answers
    }

    /// PTR answers for an address
    pub async fn reverse(&self, ip: IpAddr) -> Result<Vec<DnsRecord>> {
        self.query(&reverse_name(ip), RecordType::Ptr, &[]).await
    }
}

/// JSON body of a DoH answer
#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Status", default)]
    status: u32,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    rtype: u16,
    #[serde(rename = "TTL", default)]
    ttl: u32,
    #[serde(default)]
    data: String,
}

impl From<DohAnswer> for DnsRecord {
    fn from(answer: DohAnswer) -> Self {
        Self {
            name: answer.name,
            record_type: RecordType::from_code(answer.rtype),
            data: answer.data,
            ttl: answer.ttl,
        }
    }
}
