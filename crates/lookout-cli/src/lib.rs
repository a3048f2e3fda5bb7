//! # lookout-cli
//!
//! Command-line front end for the lookout engine.
//!
//! ## Features
//!
//! - **IP geolocation**: sequential fallback across public providers
//! - **WHOIS**: parallel race, first complete answer wins
//! - **DNS**: record sets with escalation, site reports, reverse lookups
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
