//! Engine-level lookups against mock providers.

use lookout_client::{
    GeoAdapter, LookupEngine, MemoryStore, Provider, Settings, WhoisAdapter,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geo(server: &MockServer, name: &str) -> Provider<GeoAdapter> {
    Provider::new(format!("{}/geo/{name}/{{ip}}", server.uri())).unwrap()
}

fn whois(server: &MockServer, name: &str) -> Provider<WhoisAdapter> {
    Provider::new(format!("{}/whois/{name}/{{host}}", server.uri())).unwrap()
}

async fn engine(server: &MockServer, settings: Settings) -> LookupEngine {
    LookupEngine::builder()
        .store(Arc::new(MemoryStore::with_settings(settings)))
        .resolver(format!("{}/resolve", server.uri()))
        .build()
        .await
        .unwrap()
}

fn google_dns() -> serde_json::Value {
    json!({
        "query": "8.8.8.8",
        "country": "United States",
        "countryCode": "US",
        "regionName": "Virginia",
        "city": "Ashburn",
        "isp": "Google LLC"
    })
}

#[tokio::test]
async fn sequential_skips_failures_and_stops_at_first_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/down/8.8.8.8"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/garbage/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/unknown/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "8.8.8.8" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/good/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_dns()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/never/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_dns()))
        .expect(0)
        .mount(&server)
        .await;

    let settings = Settings {
        ip_geo: ["down", "garbage", "unknown", "good", "never"]
            .iter()
            .map(|name| geo(&server, name))
            .collect(),
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let record = engine.lookup_ip("8.8.8.8").await.unwrap().unwrap();
    assert_eq!(record.country, "United States");
    assert_eq!(record.country_code, "US");
    assert_eq!(record.city, "Ashburn");
    assert_eq!(record.org, "Google LLC");
    assert!(record.source.ends_with("/geo/good/8.8.8.8"));
}

#[tokio::test]
async fn failure_indicator_skips_provider_and_cache_hit_is_offline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/fail/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "country": "Should Not Be Used"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/ok/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_dns()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "8.8.8.8.in-addr.arpa"))
        .and(query_param("type", "PTR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": 0,
            "Answer": [{ "name": "8.8.8.8.in-addr.arpa.", "type": 12, "TTL": 300, "data": "dns.google." }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Settings {
        ip_geo: vec![geo(&server, "fail"), geo(&server, "ok")],
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let first = engine.lookup_ip("8.8.8.8").await.unwrap().unwrap();
    assert_eq!(first.country, "United States");
    assert_eq!(first.hostname.as_deref(), Some("dns.google"));
    let requests = server.received_requests().await.unwrap().len();

    // Served from cache: identical record, no new requests
    let second = engine.lookup_ip("8.8.8.8").await.unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(server.received_requests().await.unwrap().len(), requests);
    assert_eq!(engine.geo_cache().len().await, 1);
}

#[tokio::test]
async fn exhausted_providers_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/empty/203.0.113.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "country": "Unknown" })))
        .expect(2)
        .mount(&server)
        .await;

    let settings = Settings {
        ip_geo: vec![geo(&server, "empty")],
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    assert!(engine.lookup_ip("203.0.113.9").await.unwrap().is_none());
    assert!(engine.lookup_ip("203.0.113.9").await.unwrap().is_none());
    assert!(engine.geo_cache().is_empty().await);
}

#[tokio::test]
async fn enrichment_failure_leaves_hostname_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/ok/8.8.4.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_dns()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let settings = Settings {
        ip_geo: vec![geo(&server, "ok")],
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let record = engine.lookup_ip("8.8.4.4").await.unwrap().unwrap();
    assert_eq!(record.hostname, None);
}

#[tokio::test]
async fn non_ip_subject_is_not_enriched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/ok/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_dns()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 0 })))
        .expect(0)
        .mount(&server)
        .await;

    let settings = Settings {
        ip_geo: vec![geo(&server, "ok")],
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let record = engine.lookup_ip("example.com").await.unwrap().unwrap();
    assert_eq!(record.hostname, None);
}

#[tokio::test]
async fn race_accepts_exactly_one_candidate() {
    let server = MockServer::start().await;

    for (name, registrar) in [("a", "Registrar A"), ("b", "Registrar B"), ("c", "Registrar C")] {
        Mock::given(method("GET"))
            .and(path(format!("/whois/{name}/example.com")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "registrar": registrar,
                "creation_date": "1995-08-14"
            })))
            .mount(&server)
            .await;
    }

    let settings = Settings {
        whois: ["a", "b", "c"].iter().map(|name| whois(&server, name)).collect(),
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let record = engine.lookup_whois("example.com").await.unwrap().unwrap();
    assert!(["Registrar A", "Registrar B", "Registrar C"].contains(&record.registrar.as_str()));
    assert_eq!(record.registered, "1995-08-14");

    // The cached record is the one that was returned, not a later straggler
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(engine.whois_cache().get("example.com").await, Some(record));
    assert_eq!(engine.whois_cache().len().await, 1);
}

#[tokio::test]
async fn race_returns_without_waiting_for_stragglers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/whois/slow/example.org"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "registrar": "Slow Registrar" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/whois/fast/example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "registrar": "Fast Registrar",
            "expires": "2030-01-01"
        })))
        .mount(&server)
        .await;

    let settings = Settings {
        whois: vec![whois(&server, "slow"), whois(&server, "fast")],
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let started = Instant::now();
    let record = engine.lookup_whois("example.org").await.unwrap().unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(record.registrar, "Fast Registrar");
    assert_eq!(record.expiry, "2030-01-01");
}

#[tokio::test]
async fn race_waits_for_every_provider_before_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/whois/empty/example.net"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/whois/slow/example.net"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("No match for domain")
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = Settings {
        whois: vec![whois(&server, "empty"), whois(&server, "slow")],
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let started = Instant::now();
    assert!(engine.lookup_whois("example.net").await.unwrap().is_none());
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(engine.whois_cache().is_empty().await);
}

#[tokio::test]
async fn race_slow_success_beats_fast_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/whois/broken/example.io"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/whois/text/example.io"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    "Domain Name: EXAMPLE.IO\nRegistrar: Example Registrar, Inc.\nCreation Date: 2014-09-01T00:00:00Z\n",
                )
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let text = Provider::with_adapter(
        format!("{}/whois/text/{{host}}", server.uri()),
        WhoisAdapter::HackerTarget,
    )
    .unwrap();
    let settings = Settings {
        whois: vec![whois(&server, "broken"), text],
        ..Settings::default()
    };
    let engine = engine(&server, settings).await;

    let record = engine.lookup_whois("example.io").await.unwrap().unwrap();
    assert_eq!(record.registrar, "Example Registrar, Inc.");
    assert_eq!(record.registered, "2014-09-01T00:00:00Z");
}

#[tokio::test]
async fn replaced_providers_are_used_and_clearing_caches_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/fresh/1.1.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "country": "Australia",
            "countryCode": "AU"
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/whois/fresh/example.net"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("Registrar: Fresh Registrar\nCreation Date: 2001-01-01\n"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let engine = engine(&server, Settings::default()).await;
    engine
        .registry()
        .set_geo_providers(vec![geo(&server, "fresh")])
        .await
        .unwrap();
    engine
        .registry()
        .set_whois_providers(vec![Provider::with_adapter(
            format!("{}/whois/fresh/{{host}}", server.uri()),
            WhoisAdapter::HackerTarget,
        )
        .unwrap()])
        .await
        .unwrap();
    assert_eq!(engine.registry().whois_providers().await.unwrap().len(), 1);

    let geo_first = engine.lookup_ip("1.1.1.1").await.unwrap().unwrap();
    let whois_first = engine.lookup_whois("example.net").await.unwrap().unwrap();
    assert_eq!(geo_first.country, "Australia");
    assert_eq!(whois_first.registrar, "Fresh Registrar");
    engine.lookup_ip("1.1.1.1").await.unwrap();
    assert_eq!(engine.whois_cache().len().await, 1);

    engine.clear_caches().await;
    assert_eq!(engine.geo_cache().len().await, 0);
    assert_eq!(engine.whois_cache().len().await, 0);

    // Both lookups go back to the network after clearing
    let geo_again = engine.lookup_ip("1.1.1.1").await.unwrap().unwrap();
    let whois_again = engine.lookup_whois("example.net").await.unwrap().unwrap();
    assert_eq!(geo_again.country, "Australia");
    assert_eq!(whois_again.registrar, "Fresh Registrar");
}

#[tokio::test]
async fn first_access_persists_default_providers() {
    let store = Arc::new(MemoryStore::new());
    let engine = LookupEngine::builder()
        .store(store.clone())
        .build()
        .await
        .unwrap();

    let geo = engine.registry().geo_providers().await.unwrap();
    assert_eq!(geo.len(), lookout_client::providers::DEFAULT_GEO_ENDPOINTS.len());
    let saved = store.snapshot().await.unwrap();
    assert_eq!(saved.ip_geo, geo);
}
