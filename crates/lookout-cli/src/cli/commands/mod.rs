//! Command implementations.

pub mod config;
pub mod dns;
pub mod ip;
pub mod providers;
pub mod theme;
pub mod whois;

use lookout::LookupEngine;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Clone)]
pub struct Context {
    /// Engine backed by the settings file
    pub engine: LookupEngine,

    /// Output format
    pub output_format: OutputFormat,
}
