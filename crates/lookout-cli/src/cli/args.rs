//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use lookout::{ProviderKind, RecordType, Theme};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Federated IP geolocation, WHOIS and DNS lookups
///
/// Every lookup is answered by public providers. IP geolocation tries them
/// one at a time in priority order; WHOIS asks all of them at once and keeps
/// the first complete answer.
#[derive(Parser, Debug)]
#[command(name = "lookout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long, env = "LOOKOUT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// DNS-over-HTTPS endpoint, overriding the stored resolver
    #[arg(long, env = "LOOKOUT_RESOLVER", global = true)]
    pub resolver: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Geolocate an IP address
    Ip(IpArgs),

    /// Registration data for a domain
    Whois(WhoisArgs),

    /// DNS record sets, site reports and reverse lookups
    Dns(DnsArgs),

    /// List, replace or reset provider endpoints
    Providers(ProvidersArgs),

    /// Show or change the theme preference
    Theme(ThemeArgs),

    /// Settings file location
    Config(ConfigArgs),
}

// ============================================================================
// Lookup commands
// ============================================================================

#[derive(Args, Debug)]
pub struct IpArgs {
    /// IPv4 or IPv6 address to geolocate
    pub ip: String,
}

#[derive(Args, Debug)]
pub struct WhoisArgs {
    /// Domain name to look up
    pub domain: String,
}

// ============================================================================
// DNS command
// ============================================================================

#[derive(Args, Debug)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommands,
}

#[derive(Subcommand, Debug)]
pub enum DnsCommands {
    /// Fetch one record set
    Records {
        /// Domain name
        domain: String,

        /// Record type (A, AAAA, CNAME, MX, NS, PTR, SOA, TXT)
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: RecordType,
    },

    /// A, WWW, NS, MX, TXT and PTR records plus a blocklist check
    Report {
        /// Host to inspect; a leading www. is ignored
        host: String,
    },

    /// Reverse lookup of IP addresses
    Ptr {
        /// IP addresses (comma-separated or repeated)
        #[arg(required = true)]
        ips: Vec<String>,
    },
}

// ============================================================================
// Providers command
// ============================================================================

#[derive(Args, Debug)]
pub struct ProvidersArgs {
    #[command(subcommand)]
    pub command: ProvidersCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProvidersCommands {
    /// Show the providers in priority order
    List {
        /// Provider kind (ip or whois)
        kind: ProviderKind,
    },

    /// Replace the provider list
    Set {
        /// Provider kind (ip or whois)
        kind: ProviderKind,

        /// Endpoint templates containing {ip} or {host}
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Restore the built-in providers
    Reset {
        /// Provider kind (ip or whois)
        kind: ProviderKind,
    },
}

// ============================================================================
// Theme command
// ============================================================================

#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: ThemeCommands,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Show the current theme
    Get,

    /// Change the theme (dark, light or system)
    Set {
        theme: Theme,
    },
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the settings file path
    Path,
}
