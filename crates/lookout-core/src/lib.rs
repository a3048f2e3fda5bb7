//! Core types and errors for the lookout federated lookup engine.
//!
//! This crate provides the foundational types shared by the engine crates:
//!
//! - **Types**: canonical records ([`GeoRecord`], [`WhoisRecord`], [`DnsRecord`])
//!   and the untyped [`Payload`] a provider hands back
//! - **Queries**: [`Query`] and [`QueryKind`]
//! - **Errors**: [`LookoutError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use lookout_core::{GeoRecord, Result};
//!
//! fn show(record: &GeoRecord) -> Result<()> {
//!     println!("{} is in {}", record.ip, record.country);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/lookout-core/0.3.0")]

mod error;
pub mod query;
pub mod types;

pub use error::{LookoutError, Result};
pub use query::{Query, QueryKind};
pub use types::*;
