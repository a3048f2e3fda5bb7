use lookout_core::{GeoRecord, Payload};
use serde::{Deserialize, Serialize};

use super::fields::GeoFields;
use super::{match_table, Adapter, ProviderKind};

/// Adapter tags for IP geolocation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeoAdapter {
    /// ip-api.com
    IpApi,
    /// ipwho.is
    IpWhoIs,
    /// ipinfo.io
    IpInfo,
    /// ipapi.co
    IpApiCo,
    /// freeipapi.com
    FreeIpApi,
    /// Conventionally named fields
    Generic,
}

/// Substring table, tried in order. `ipapi.co/` keeps `ipapi.com` out.
const DETECT: &[(&str, GeoAdapter)] = &[
    ("ip-api.com", GeoAdapter::IpApi),
    ("ipwho.is", GeoAdapter::IpWhoIs),
    ("ipinfo.io", GeoAdapter::IpInfo),
    ("ipapi.co/", GeoAdapter::IpApiCo),
    ("freeipapi.com", GeoAdapter::FreeIpApi),
];

const IP_API: GeoFields = GeoFields {
    ip: &["query", "ip"],
    country_code: &["countryCode"],
    country: &["country"],
    region: &["regionName", "region"],
    city: &["city"],
    org: &["org", "isp", "as"],
};

const IPWHOIS: GeoFields = GeoFields {
    ip: &["ip"],
    country_code: &["country_code"],
    country: &["country"],
    region: &["region"],
    city: &["city"],
    org: &["connection.org", "connection.isp", "connection.asn"],
};

// ipinfo only ever reports the ISO code
const IPINFO: GeoFields = GeoFields {
    ip: &["ip"],
    country_code: &["country"],
    country: &["country"],
    region: &["region"],
    city: &["city"],
    org: &["org"],
};

const IPAPI_CO: GeoFields = GeoFields {
    ip: &["ip"],
    country_code: &["country_code", "country"],
    country: &["country_name", "country"],
    region: &["region"],
    city: &["city"],
    org: &["org", "asn"],
};

const FREEIPAPI: GeoFields = GeoFields {
    ip: &["ipAddress"],
    country_code: &["countryCode"],
    country: &["countryName"],
    region: &["regionName"],
    city: &["cityName"],
    org: &["asnOrganization"],
};

const GENERIC: GeoFields = GeoFields {
    ip: &["ip", "query", "ip_address", "IP", "data.ip"],
    country_code: &["countryCode", "country_code", "data.country_code"],
    country: &[
        "country",
        "country_name",
        "countryCode",
        "country_code",
        "data.country",
    ],
    region: &["region", "regionName", "region_name", "state"],
    city: &["city", "data.city"],
    org: &[
        "org",
        "isp",
        "connection.organization",
        "connection.isp",
        "connection.org",
        "connection.organisation",
        "asn",
        "autonomous_system_organization",
    ],
};

impl GeoAdapter {
    const fn fields(self) -> &'static GeoFields {
        match self {
            Self::IpApi => &IP_API,
            Self::IpWhoIs => &IPWHOIS,
            Self::IpInfo => &IPINFO,
            Self::IpApiCo => &IPAPI_CO,
            Self::FreeIpApi => &FREEIPAPI,
            Self::Generic => &GENERIC,
        }
    }
}

impl Adapter for GeoAdapter {
    type Record = GeoRecord;

    const KIND: ProviderKind = ProviderKind::IpGeo;

    fn detect(template: &str) -> Self {
        match_table(DETECT, template, Self::Generic)
    }

    fn normalize(self, payload: &Payload, source: &str) -> Option<GeoRecord> {
        self.fields().extract(payload, source)
    }

    fn name(self) -> &'static str {
        match self {
            Self::IpApi => "ip-api",
            Self::IpWhoIs => "ip-who-is",
            Self::IpInfo => "ip-info",
            Self::IpApiCo => "ip-api-co",
            Self::FreeIpApi => "free-ip-api",
            Self::Generic => "generic",
        }
    }
}
