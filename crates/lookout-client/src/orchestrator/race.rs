use lookout_core::Candidate;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use super::{attempt, BodyParsing, Skip};
use crate::client::HttpClient;
use crate::providers::{Adapter, Provider};

/// Launch every provider concurrently and return the first accepted record.
///
/// Outcomes are consumed one at a time from a single [`JoinSet`], so exactly
/// one record can ever be accepted. The call returns as soon as that
/// happens; the remaining attempts keep running in a drain task and their
/// results are discarded. `None` is returned only after every attempt has
/// completed without an accepted record.
#[instrument(skip(http, providers), fields(providers = providers.len()))]
pub async fn race<A: Adapter>(
    http: &HttpClient,
    providers: &[Provider<A>],
    subject: &str,
) -> Option<A::Record> {
    let launched = providers.len();
    let mut tasks = JoinSet::new();

    for provider in providers {
        let http = http.clone();
        let provider = provider.clone();
        let url = provider.resolve(subject);
        tasks.spawn(async move {
            let outcome = attempt(&http, &provider, &url, BodyParsing::Lenient).await;
            (url, provider.adapter().name(), outcome)
        });
    }

    let mut completed = 0_usize;
    while let Some(joined) = tasks.join_next().await {
        completed += 1;
        match joined {
            Ok((_, adapter, Ok(record))) => {
                info!(adapter, source = record.source(), completed, launched, "race won");
                drain(tasks, launched);
                return Some(record);
            }
            Ok((url, _, Err(skip))) => log_skip(&url, &skip),
            Err(e) => warn!(error = %e, "provider task did not complete"),
        }
    }

    debug!(launched, "every provider completed without an accepted record");
    None
}

fn log_skip(url: &str, skip: &Skip) {
    debug!(url = %url, reason = %skip, "provider skipped");
}

/// Let stragglers run to completion without holding up the caller
fn drain<T: Send + 'static>(mut tasks: JoinSet<T>, launched: usize) {
    if tasks.is_empty() {
        return;
    }

    tokio::spawn(async move {
        let mut stragglers = 0_usize;
        while tasks.join_next().await.is_some() {
            stragglers += 1;
        }
        debug!(launched, stragglers, "race stragglers finished, results discarded");
    });
}
