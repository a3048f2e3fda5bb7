use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// DNS record type, as used in DNS-over-HTTPS queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Mail exchanger
    Mx,
    /// Name server
    Ns,
    /// Pointer (reverse lookup)
    Ptr,
    /// Start of authority
    Soa,
    /// Text
    Txt,
    /// Any other numeric type
    Other(u16),
}

impl RecordType {
    /// Numeric RR type code
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::A => 1,
            Self::Ns => 2,
            Self::Cname => 5,
            Self::Soa => 6,
            Self::Ptr => 12,
            Self::Mx => 15,
            Self::Txt => 16,
            Self::Aaaa => 28,
            Self::Other(code) => code,
        }
    }

    /// Map a numeric RR type code back to a record type
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::A,
            2 => Self::Ns,
            5 => Self::Cname,
            6 => Self::Soa,
            12 => Self::Ptr,
            15 => Self::Mx,
            16 => Self::Txt,
            28 => Self::Aaaa,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Cname => write!(f, "CNAME"),
            Self::Mx => write!(f, "MX"),
            Self::Ns => write!(f, "NS"),
            Self::Ptr => write!(f, "PTR"),
            Self::Soa => write!(f, "SOA"),
            Self::Txt => write!(f, "TXT"),
            Self::Other(code) => write!(f, "TYPE{code}"),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "PTR" => Ok(Self::Ptr),
            "SOA" => Ok(Self::Soa),
            "TXT" => Ok(Self::Txt),
            _ => upper
                .strip_prefix("TYPE")
                .and_then(|code| code.parse().ok())
                .map(Self::from_code)
                .ok_or_else(|| format!("unknown record type: {s}")),
        }
    }
}

impl TryFrom<String> for RecordType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.to_string()
    }
}

/// One answer row of a DNS lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Owner name of the record
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Record data in presentation format
    pub data: String,

    /// Time to live in seconds
    pub ttl: u32,
}

impl DnsRecord {
    /// Record data formatted for display.
    ///
    /// MX `10 mx.example.com.` becomes `mx.example.com. (10)` and TXT data
    /// loses one pair of surrounding quotes.
    #[must_use]
    pub fn display_data(&self) -> String {
        match self.record_type {
            RecordType::Mx => match self.data.split_once(' ') {
                Some((priority, server)) => format!("{server} ({priority})"),
                None => self.data.clone(),
            },
            RecordType::Txt => {
                let data = self.data.as_str();
                if data.len() >= 2 && data.starts_with('"') && data.ends_with('"') {
                    data[1..data.len() - 1].to_string()
                } else {
                    data.to_string()
                }
            }
            _ => self.data.clone(),
        }
    }

    /// Data with one trailing root dot removed
    #[must_use]
    pub fn data_without_root(&self) -> &str {
        self.data.strip_suffix('.').unwrap_or(&self.data)
    }

    /// Returns true if this is an A or AAAA record
    #[must_use]
    pub const fn is_address_record(&self) -> bool {
        matches!(self.record_type, RecordType::A | RecordType::Aaaa)
    }
}
