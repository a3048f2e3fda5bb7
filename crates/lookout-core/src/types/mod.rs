mod dns;
mod geo;
mod payload;
mod whois;

pub use dns::*;
pub use geo::*;
pub use payload::*;
pub use whois::*;

/// Sentinel used by geo records for fields no provider field could fill.
pub const UNKNOWN: &str = "Unknown";

/// A normalized record that can be judged acceptable on its own.
pub trait Candidate: Clone + Send + Sync + 'static {
    /// Whether the record carries its primary identifying field.
    fn passes_quality_gate(&self) -> bool;

    /// URL of the provider response this record was built from.
    fn source(&self) -> &str;
}
