use lookout_core::{Payload, WhoisRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::WhoisFields;
use super::{match_table, Adapter, ProviderKind};

/// Adapter tags for WHOIS / RDAP providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhoisAdapter {
    /// api.whois.vu JSON
    WhoisVu,
    /// api.hackertarget.com plain-text WHOIS
    HackerTarget,
    /// jsonwhoisapi.com JSON
    JsonWhoisApi,
    /// who.is HTML page, usually fetched through a proxy
    WhoIs,
    /// Any RDAP server
    Rdap,
    /// Conventionally named fields
    Generic,
}

const DETECT: &[(&str, WhoisAdapter)] = &[
    ("whois.vu", WhoisAdapter::WhoisVu),
    ("hackertarget.com", WhoisAdapter::HackerTarget),
    ("jsonwhoisapi.com", WhoisAdapter::JsonWhoisApi),
    ("who.is", WhoisAdapter::WhoIs),
    ("rdap", WhoisAdapter::Rdap),
    ("verisign", WhoisAdapter::Rdap),
    ("markmonitor", WhoisAdapter::Rdap),
    ("godaddy", WhoisAdapter::Rdap),
];

const WHOIS_VU: WhoisFields = WhoisFields {
    registered: &["created", "creation_date", "registered"],
    expiry: &["expiry", "expiration_date", "expires"],
    registrar: &["registrar", "sponsor"],
};

const JSON_WHOIS_API: WhoisFields = WhoisFields {
    registered: &["created", "creation_date"],
    expiry: &["expires_at", "expiry", "expiration_date"],
    registrar: &["registrar_name", "registrar", "registrar.name"],
};

const GENERIC: WhoisFields = WhoisFields {
    registered: &["created", "creation_date", "registered"],
    expiry: &["expiry", "expiration_date", "expires"],
    registrar: &["registrar", "sponsor", "registrar_name"],
};

impl Adapter for WhoisAdapter {
    type Record = WhoisRecord;

    const KIND: ProviderKind = ProviderKind::Whois;

    fn detect(template: &str) -> Self {
        match_table(DETECT, template, Self::Generic)
    }

    fn normalize(self, payload: &Payload, source: &str) -> Option<WhoisRecord> {
        let specific = match self {
            Self::WhoisVu => WHOIS_VU.extract(payload, source),
            Self::JsonWhoisApi => JSON_WHOIS_API.extract(payload, source),
            Self::HackerTarget => payload.as_text().map(|text| parse_whois_text(text, source)),
            Self::WhoIs => payload.as_text().map(|html| scrape_who_is(html, source)),
            Self::Rdap => payload.as_object().map(|_| parse_rdap(payload, source)),
            Self::Generic => None,
        };
        // A payload of the wrong shape for its adapter still gets the
        // conventional field names tried on it
        specific.or_else(|| GENERIC.extract(payload, source))
    }

    fn name(self) -> &'static str {
        match self {
            Self::WhoisVu => "whois-vu",
            Self::HackerTarget => "hacker-target",
            Self::JsonWhoisApi => "json-whois-api",
            Self::WhoIs => "who-is",
            Self::Rdap => "rdap",
            Self::Generic => "generic",
        }
    }
}

/// Line-based parse of a raw WHOIS text response
fn parse_whois_text(raw: &str, source: &str) -> WhoisRecord {
    let mut record = WhoisRecord {
        source: source.to_string(),
        ..WhoisRecord::default()
    };

    for line in raw.lines() {
        let line = line.trim();
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_lowercase();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            let slot = match key.as_str() {
                "creation date" | "registered on" | "created" => &mut record.registered,
                k if k.ends_with("expiry date")
                    || k.ends_with("expiration date")
                    || k == "expires" =>
                {
                    &mut record.expiry
                }
                k if k == "registrar" || k.ends_with(" registrar") => &mut record.registrar,
                _ => continue,
            };
            // First occurrence wins
            if slot.is_empty() {
                *slot = value.to_string();
            }
        }
    }

    record
}

/// Pull the label/value cells out of a who.is result page
fn scrape_who_is(html: &str, source: &str) -> WhoisRecord {
    WhoisRecord {
        registered: scrape_cell(html, "Registered On").unwrap_or_default(),
        expiry: scrape_cell(html, "Expires On").unwrap_or_default(),
        registrar: scrape_cell(html, "Registrar").unwrap_or_default(),
        source: source.to_string(),
    }
}

fn scrape_cell(html: &str, label: &str) -> Option<String> {
    const CELL: &str = "<div class=\"col-md-8\">";

    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let marker = format!("{}</div>", label.to_ascii_lowercase());

    lower.match_indices(&marker).find_map(|(at, _)| {
        let after_label = at + marker.len();
        let rest = &lower[after_label..];
        let cell_start = after_label + (rest.len() - rest.trim_start().len());
        if !lower[cell_start..].starts_with(CELL) {
            return None;
        }

        let value_start = cell_start + CELL.len();
        let value_len = html[value_start..].find('<')?;
        let value = html[value_start..value_start + value_len].trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn parse_rdap(payload: &Payload, source: &str) -> WhoisRecord {
    let Some(object) = payload.as_object() else {
        return WhoisRecord::default();
    };

    let event_date = |action: &str| {
        object
            .get("events")
            .and_then(Value::as_array)
            .and_then(|events| {
                events
                    .iter()
                    .find(|e| e.get("eventAction").and_then(Value::as_str) == Some(action))
            })
            .and_then(|e| e.get("eventDate"))
            .and_then(lookout_core::scalar)
            .unwrap_or_default()
    };

    let registrar = match object.get("registrar") {
        Some(Value::Object(r)) => r.get("name").and_then(lookout_core::scalar),
        Some(other) => lookout_core::scalar(other),
        None => rdap_registrar_entity(object.get("entities")),
    };

    WhoisRecord {
        registered: event_date("registration"),
        expiry: event_date("expiration"),
        registrar: registrar.unwrap_or_default(),
        source: source.to_string(),
    }
}

/// `fn` property of the vCard belonging to the entity with role `registrar`
fn rdap_registrar_entity(entities: Option<&Value>) -> Option<String> {
    let entity = entities?.as_array()?.iter().find(|e| {
        e.get("roles")
            .and_then(Value::as_array)
            .is_some_and(|roles| roles.iter().any(|r| r.as_str() == Some("registrar")))
    })?;

    entity
        .get("vcardArray")?
        .get(1)?
        .as_array()?
        .iter()
        .find(|prop| prop.get(0).and_then(Value::as_str) == Some("fn"))?
        .get(3)
        .and_then(lookout_core::scalar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_core::Candidate;
    use serde_json::json;

    const SRC: &str = "https://provider.test/example.com";

    #[test]
    fn hackertarget_text() {
        let raw = "Domain Name: EXAMPLE.COM\r\n\
                   Registry Expiry Date: 2025-08-13T04:00:00Z\r\n\
                   Registrar: RESERVED-Internet Assigned Numbers Authority\r\n\
                   Creation Date: 1995-08-14T04:00:00Z\r\n\
                   Registrar: Somebody Else\r\n";
        let record = WhoisAdapter::HackerTarget
            .normalize(&Payload::Text(raw.into()), SRC)
            .unwrap();
        assert_eq!(record.registered, "1995-08-14T04:00:00Z");
        assert_eq!(record.expiry, "2025-08-13T04:00:00Z");
        assert_eq!(record.registrar, "RESERVED-Internet Assigned Numbers Authority");
    }

    #[test]
    fn who_is_scrape() {
        let html = r#"<div class="col-md-4 queryResponseBodyKey">Registered On</div>
            <div class="col-md-8">1995-08-14</div>
            <div class="col-md-4">Expires On</div> <div class="col-md-8">2025-08-13</div>
            <div class="col-md-4">Registrar</div><div class="col-md-8"> IANA </div>"#;
        let record = WhoisAdapter::WhoIs
            .normalize(&Payload::Text(html.into()), SRC)
            .unwrap();
        assert_eq!(record.registered, "1995-08-14");
        assert_eq!(record.expiry, "2025-08-13");
        assert_eq!(record.registrar, "IANA");
    }

    #[test]
    fn who_is_scrape_skips_labels_without_a_value_cell() {
        let html = r#"<span>Registrar</div><p>see below</p>
            <div class="col-md-4">Registrar</div><div class="col-md-8"></div>
            <div class="col-md-4">Registrar</div>
            <div class="col-md-8">IANA</div>"#;
        let record = WhoisAdapter::WhoIs
            .normalize(&Payload::Text(html.into()), SRC)
            .unwrap();
        assert_eq!(record.registrar, "IANA");
        assert!(record.registered.is_empty());
    }

    #[test]
    fn rdap_events_and_vcard_registrar() {
        let payload = Payload::Json(json!({
            "objectClassName": "domain",
            "status": ["active"],
            "events": [
                { "eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z" },
                { "eventAction": "expiration", "eventDate": "2025-08-13T04:00:00Z" }
            ],
            "entities": [
                { "roles": ["technical"], "vcardArray": ["vcard", [["fn", {}, "text", "Tech"]]] },
                { "roles": ["registrar"], "vcardArray": ["vcard", [
                    ["version", {}, "text", "4.0"],
                    ["fn", {}, "text", "RESERVED-IANA"]
                ]] }
            ]
        }));
        let record = WhoisAdapter::Rdap.normalize(&payload, SRC).unwrap();
        assert_eq!(record.registered, "1995-08-14T04:00:00Z");
        assert_eq!(record.expiry, "2025-08-13T04:00:00Z");
        assert_eq!(record.registrar, "RESERVED-IANA");
    }

    #[test]
    fn rdap_registrar_object() {
        let payload = Payload::Json(json!({ "registrar": { "name": "MarkMonitor Inc." } }));
        let record = WhoisAdapter::Rdap.normalize(&payload, SRC).unwrap();
        assert_eq!(record.registrar, "MarkMonitor Inc.");
        assert!(record.passes_quality_gate());
    }

    #[test]
    fn wrong_shape_falls_back_to_generic() {
        let payload = Payload::Json(json!({ "creation_date": "2001-01-01" }));
        let record = WhoisAdapter::HackerTarget.normalize(&payload, SRC).unwrap();
        assert_eq!(record.registered, "2001-01-01");

        assert!(WhoisAdapter::Rdap
            .normalize(&Payload::Text("<html></html>".into()), SRC)
            .is_none());
    }

    #[test]
    fn empty_text_fails_gate() {
        let record = WhoisAdapter::HackerTarget
            .normalize(&Payload::Text("error check your api query".into()), SRC)
            .unwrap();
        assert!(!record.passes_quality_gate());
    }
}
