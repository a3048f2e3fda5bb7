//! DNS report collection against a mock DoH resolver.

use lookout_client::{DohClient, EscalationConfig, HttpClient};
use lookout_core::RecordType;
use lookout_recon::{BlacklistStatus, DnsReport};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn answer(name: &str, rtype: u16, data: &[&str]) -> ResponseTemplate {
    let answers: Vec<Value> = data
        .iter()
        .map(|d| json!({ "name": format!("{name}."), "type": rtype, "TTL": 300, "data": d }))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({ "Status": 0, "Answer": answers }))
}

async fn mock(server: &MockServer, name: &str, rtype: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", name))
        .and(query_param("type", rtype))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mock_site(server: &MockServer) {
    mock(server, "example.com", "A", answer("example.com", 1, &["93.184.216.34"])).await;
    mock(
        server,
        "34.216.184.93.in-addr.arpa",
        "PTR",
        answer("34.216.184.93.in-addr.arpa", 12, &["edge.example.net."]),
    )
    .await;
    mock(server, "www.example.com", "CNAME", answer("www.example.com", 5, &[])).await;
    mock(server, "www.example.com", "A", answer("www.example.com", 1, &["93.184.216.34"])).await;
    mock(
        server,
        "example.com",
        "NS",
        answer("example.com", 2, &["a.iana-servers.net.", "b.iana-servers.net."]),
    )
    .await;
    mock(server, "example.com", "MX", answer("example.com", 15, &["10 mail.example.com."])).await;
    mock(
        server,
        "example.com",
        "TXT",
        answer("example.com", 16, &["\"v=spf1 -all\"", "\"wgyf8z8cgvm2qmxpnbnldrcltvk4xqfn\""]),
    )
    .await;
}

fn doh(server: &MockServer) -> DohClient {
    DohClient::new(HttpClient::new().unwrap(), format!("{}/resolve", server.uri()))
}

#[tokio::test]
async fn collects_every_section_with_matching_counts() {
    let server = MockServer::start().await;
    mock_site(&server).await;
    mock(
        &server,
        "34.216.184.93.zen.spamhaus.org",
        "A",
        answer("34.216.184.93.zen.spamhaus.org", 1, &[]),
    )
    .await;

    let report = DnsReport::collect(&doh(&server), &EscalationConfig::disabled(), "www.example.com")
        .await
        .unwrap();

    assert_eq!(report.host, "example.com");
    assert_eq!(report.counts.a, report.a.len());
    assert_eq!(report.counts.ptr, report.ptr.len());
    assert_eq!(report.counts.www, report.www.len());
    assert_eq!(report.counts.ns, report.ns.len());
    assert_eq!(report.counts.mx, report.mx.len());
    assert_eq!(report.counts.txt, report.txt.len());
    assert_eq!(report.total(), 8);

    assert_eq!(report.ptr[0].data_without_root(), "edge.example.net");
    assert_eq!(report.www[0].record_type, RecordType::A);
    assert_eq!(report.mx[0].display_data(), "mail.example.com. (10)");
    assert_eq!(report.txt[0].display_data(), "v=spf1 -all");
    assert_eq!(report.blacklist, BlacklistStatus::Clean);
}

#[tokio::test]
async fn listed_address_is_flagged() {
    let server = MockServer::start().await;
    mock_site(&server).await;
    mock(
        &server,
        "34.216.184.93.zen.spamhaus.org",
        "A",
        answer("34.216.184.93.zen.spamhaus.org", 1, &["127.0.0.2"]),
    )
    .await;

    let report = DnsReport::collect(&doh(&server), &EscalationConfig::disabled(), "example.com")
        .await
        .unwrap();
    assert_eq!(report.blacklist, BlacklistStatus::Listed);
}

#[tokio::test]
async fn failed_blocklist_query_is_unknown() {
    let server = MockServer::start().await;
    mock_site(&server).await;
    mock(
        &server,
        "34.216.184.93.zen.spamhaus.org",
        "A",
        ResponseTemplate::new(502),
    )
    .await;

    let report = DnsReport::collect(&doh(&server), &EscalationConfig::disabled(), "example.com")
        .await
        .unwrap();
    assert_eq!(report.blacklist, BlacklistStatus::Unknown);
    assert_eq!(report.counts.a, 1);
}

#[tokio::test]
async fn unresolvable_site_yields_empty_sections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 3 })))
        .mount(&server)
        .await;

    let report = DnsReport::collect(&doh(&server), &EscalationConfig::disabled(), "nothing.invalid")
        .await
        .unwrap();
    assert_eq!(report.total(), 0);
    assert!(report.ptr.is_empty());
    assert_eq!(report.blacklist, BlacklistStatus::Clean);
}
