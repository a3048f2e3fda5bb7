use lookout_core::Candidate;
use tracing::{debug, info, instrument};

use super::{attempt, BodyParsing};
use crate::client::HttpClient;
use crate::providers::{Adapter, Provider};

/// Try providers in order and return the first accepted record.
///
/// Providers after the winner are never contacted. Total latency is the sum
/// of every attempt up to and including the winner.
#[instrument(skip(http, providers), fields(providers = providers.len()))]
pub async fn first_accepted<A: Adapter>(
    http: &HttpClient,
    providers: &[Provider<A>],
    subject: &str,
) -> Option<A::Record> {
    for (index, provider) in providers.iter().enumerate() {
        let url = provider.resolve(subject);
        match attempt(http, provider, &url, BodyParsing::Strict).await {
            Ok(record) => {
                info!(
                    index,
                    adapter = provider.adapter().name(),
                    source = record.source(),
                    "provider accepted"
                );
                return Some(record);
            }
            Err(skip) => {
                debug!(index, url = %url, reason = %skip, "provider skipped");
            }
        }
    }

    debug!("all providers exhausted");
    None
}
