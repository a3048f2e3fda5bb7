//! Fetch orchestration across a provider list.
//!
//! Two strategies exist. [`Strategy::Sequential`] walks the list in priority
//! order and stops at the first accepted record, keeping provider load low.
//! [`Strategy::Race`] launches every provider at once and takes the first
//! accepted record, keeping latency low. Either way, per-provider failures
//! are logged and skipped; only the aggregate outcome is returned.

mod race;
mod sequential;

pub use race::race;
pub use sequential::first_accepted;

use lookout_core::{Candidate, LookoutError, Payload};
use thiserror::Error;

use crate::client::HttpClient;
use crate::providers::{Adapter, Provider, ProviderKind};

/// How to schedule provider attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One provider at a time, in registry order
    Sequential,
    /// All providers concurrently, first acceptance wins
    Race,
}

impl Strategy {
    /// The strategy used for a provider kind
    #[must_use]
    pub const fn for_kind(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::IpGeo => Self::Sequential,
            ProviderKind::Whois => Self::Race,
        }
    }

    /// Run the strategy; `None` means every provider was exhausted
    pub async fn run<A: Adapter>(
        self,
        http: &HttpClient,
        providers: &[Provider<A>],
        subject: &str,
    ) -> Option<A::Record> {
        match self {
            Self::Sequential => first_accepted(http, providers, subject).await,
            Self::Race => race(http, providers, subject).await,
        }
    }
}

/// Why a provider attempt produced no record
#[derive(Error, Debug)]
pub enum Skip {
    /// Connection failure or non-success status
    #[error("transport: {0}")]
    Transport(#[from] LookoutError),

    /// Body could not be parsed
    #[error("unparseable body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Payload carried an explicit failure marker
    #[error("provider reported failure")]
    Failed,

    /// No adapter could read the payload's shape
    #[error("payload shape not recognized")]
    Unreadable,

    /// Normalized record failed the quality gate
    #[error("rejected by quality gate")]
    Rejected,
}

/// How a provider body is turned into a payload
#[derive(Debug, Clone, Copy)]
pub(crate) enum BodyParsing {
    /// JSON only; anything else is a parse failure
    Strict,
    /// JSON, falling back to raw text
    Lenient,
}

/// Fetch, parse, normalize and gate one provider
pub(crate) async fn attempt<A: Adapter>(
    http: &HttpClient,
    provider: &Provider<A>,
    url: &str,
    parsing: BodyParsing,
) -> Result<A::Record, Skip> {
    let body = http.fetch(url).await?;
    let payload = match parsing {
        BodyParsing::Strict => Payload::from_json_str(&body)?,
        BodyParsing::Lenient => Payload::from_body(body),
    };

    if payload.is_failure() {
        return Err(Skip::Failed);
    }

    let record = provider.normalize(&payload, url).ok_or(Skip::Unreadable)?;
    if record.passes_quality_gate() {
        Ok(record)
    } else {
        Err(Skip::Rejected)
    }
}
