//! DNS reconnaissance built on lookout's DNS-over-HTTPS client.
//!
//! [`DnsReport`] gathers the record sets a person usually wants when
//! inspecting a site (addresses, reverse names, `www`, name servers, mail
//! exchangers, TXT) along with a DNS blocklist indicator.

#![doc(html_root_url = "https://docs.rs/lookout-recon/0.3.0")]

pub mod blacklist;
mod error;
pub mod report;

pub use blacklist::BlacklistStatus;
pub use error::{ReconError, ReconResult};
pub use report::{DnsReport, RecordCounts};
