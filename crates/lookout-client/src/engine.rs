//! The lookup engine: cache, orchestration, enrichment.

use lookout_core::query::is_ip_literal;
use lookout_core::{
    DnsRecord, GeoRecord, LookoutError, Query, QueryKind, RecordType, Result, WhoisRecord,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::cache::ResultCache;
use crate::client::{HttpClient, HttpClientBuilder};
use crate::dns::{DohClient, DEFAULT_RESOLVER};
use crate::enrichment::reverse_hostname;
use crate::orchestrator::Strategy;
use crate::providers::ProviderKind;
use crate::registry::{ConfigStore, MemoryStore, ProviderRegistry};

/// Federated lookup engine.
///
/// Cheap to clone; clones share the HTTP pool, the registry and the caches.
///
/// # Example
///
/// ```rust,ignore
/// use lookout_client::LookupEngine;
///
/// let engine = LookupEngine::builder().build().await?;
/// if let Some(geo) = engine.lookup_ip("8.8.8.8").await? {
///     println!("{} ({})", geo.country, geo.source);
/// }
/// ```
#[derive(Clone)]
pub struct LookupEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    http: HttpClient,
    doh: DohClient,
    registry: ProviderRegistry,
    geo_cache: ResultCache<GeoRecord>,
    whois_cache: ResultCache<WhoisRecord>,
}

impl LookupEngine {
    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> LookupEngineBuilder {
        LookupEngineBuilder::new()
    }

    /// The provider registry backing this engine
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.inner.registry
    }

    /// The DNS-over-HTTPS client
    #[must_use]
    pub fn doh(&self) -> &DohClient {
        &self.inner.doh
    }

    /// Cached geolocation records
    #[must_use]
    pub fn geo_cache(&self) -> &ResultCache<GeoRecord> {
        &self.inner.geo_cache
    }

    /// Cached WHOIS records
    #[must_use]
    pub fn whois_cache(&self) -> &ResultCache<WhoisRecord> {
        &self.inner.whois_cache
    }

    /// Geolocate a subject.
    ///
    /// `Ok(None)` means every provider was tried and none produced an
    /// acceptable record. When the subject is an IP literal the accepted
    /// record is enriched with a reverse-lookup hostname before it is cached.
    #[instrument(skip(self))]
    pub async fn lookup_ip(&self, subject: &str) -> Result<Option<GeoRecord>> {
        let query = subject_query(QueryKind::IpGeo, subject)?;
        let subject = query.subject();

        if let Some(hit) = self.inner.geo_cache.get(subject).await {
            debug!("geo cache hit");
            return Ok(Some(hit));
        }

        let providers = self.inner.registry.geo_providers().await?;
        let Some(mut record) = Strategy::for_kind(ProviderKind::IpGeo)
            .run(&self.inner.http, &providers, subject)
            .await
        else {
            info!(providers = providers.len(), "no provider produced a geo record");
            return Ok(None);
        };

        if is_ip_literal(subject) {
            record.hostname = reverse_hostname(&self.inner.doh, subject).await;
        }

        self.inner.geo_cache.insert(subject, record.clone()).await;
        Ok(Some(record))
    }

    /// Registration data for a domain, raced across every WHOIS provider
    #[instrument(skip(self))]
    pub async fn lookup_whois(&self, domain: &str) -> Result<Option<WhoisRecord>> {
        let query = subject_query(QueryKind::Whois, domain)?;
        let domain = query.subject();

        if let Some(hit) = self.inner.whois_cache.get(domain).await {
            debug!("whois cache hit");
            return Ok(Some(hit));
        }

        let providers = self.inner.registry.whois_providers().await?;
        let Some(record) = Strategy::for_kind(ProviderKind::Whois)
            .run(&self.inner.http, &providers, domain)
            .await
        else {
            info!(providers = providers.len(), "no provider produced a whois record");
            return Ok(None);
        };

        self.inner.whois_cache.insert(domain, record.clone()).await;
        Ok(Some(record))
    }

    /// One record set, escalating on empty answers for configured suffixes
    #[instrument(skip(self))]
    pub async fn dns_records(&self, domain: &str, record_type: RecordType) -> Result<Vec<DnsRecord>> {
        let query = subject_query(QueryKind::DnsRecord, domain)?;
        let escalation = self.inner.registry.escalation().await?;
        Ok(self
            .inner
            .doh
            .records(query.subject(), record_type, &escalation)
            .await)
    }

    /// Hostname for an IP literal; invalid input is an error, no name is `None`
    pub async fn reverse_lookup(&self, ip: &str) -> Result<Option<String>> {
        let query = Query::ptr(ip)?;
        Ok(reverse_hostname(&self.inner.doh, query.subject()).await)
    }

    /// Drop every cached record
    pub async fn clear_caches(&self) {
        self.inner.geo_cache.clear().await;
        self.inner.whois_cache.clear().await;
    }
}

fn subject_query(kind: QueryKind, subject: &str) -> Result<Query> {
    let query = Query::new(kind, subject);
    if query.subject().is_empty() {
        return Err(LookoutError::InvalidQuery(format!("empty {kind} subject")));
    }
    Ok(query)
}

/// Builder for configuring a [`LookupEngine`]
pub struct LookupEngineBuilder {
    http: HttpClientBuilder,
    store: Option<Arc<dyn ConfigStore>>,
    resolver: Option<String>,
    dns_rate: Option<u32>,
}

impl Default for LookupEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupEngineBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: HttpClient::builder(),
            store: None,
            resolver: None,
            dns_rate: None,
        }
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.timeout(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.http = self.http.user_agent(agent);
        self
    }

    /// Settings store; defaults to an in-memory store
    #[must_use]
    pub fn store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// DNS-over-HTTPS endpoint, overriding any stored resolver
    #[must_use]
    pub fn resolver(mut self, url: impl Into<String>) -> Self {
        self.resolver = Some(url.into());
        self
    }

    /// DNS-over-HTTPS queries allowed per second
    #[must_use]
    pub const fn dns_rate(mut self, per_second: u32) -> Self {
        self.dns_rate = Some(per_second);
        self
    }

    /// Build the engine.
    ///
    /// Reads the store once to pick up a resolver override.
    pub async fn build(self) -> Result<LookupEngine> {
        let http = self.http.build()?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn ConfigStore>);
        let registry = ProviderRegistry::new(store);

        let resolver = match self.resolver {
            Some(url) => url,
            None => registry
                .resolver_url()
                .await?
                .unwrap_or_else(|| DEFAULT_RESOLVER.to_string()),
        };
        let doh = match self.dns_rate {
            Some(rate) => DohClient::with_rate(http.clone(), resolver, rate),
            None => DohClient::new(http.clone(), resolver),
        };

        Ok(LookupEngine {
            inner: Arc::new(EngineInner {
                http,
                doh,
                registry,
                geo_cache: ResultCache::new(QueryKind::IpGeo),
                whois_cache: ResultCache::new(QueryKind::Whois),
            }),
        })
    }
}
