//! `lookout whois` - domain registration data.

use anyhow::Result;
use colored::Colorize;
use lookout::WhoisRecord;

use super::Context;
use crate::cli::args::WhoisArgs;
use crate::output::{print_csv, print_structured, spinner, OutputFormat};

pub async fn execute(ctx: &Context, args: WhoisArgs) -> Result<()> {
    let domain = args.domain.trim();

    let progress = spinner(ctx.output_format, format!("Asking WHOIS providers about {domain}..."));
    let record = ctx.engine.lookup_whois(domain).await;
    progress.finish_and_clear();
    let record = record?;

    if print_structured(ctx.output_format, &record)? {
        return Ok(());
    }

    match (ctx.output_format, record) {
        (OutputFormat::Csv, record) => print_csv(record),
        (_, Some(record)) => {
            print_whois_pretty(domain, &record);
            Ok(())
        }
        (_, None) => {
            println!(
                "{} no WHOIS provider had registration data for {}",
                "Not found:".yellow().bold(),
                domain.cyan()
            );
            Ok(())
        }
    }
}

fn print_whois_pretty(domain: &str, whois: &WhoisRecord) {
    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".dimmed().to_string()
        } else {
            value.to_string()
        }
    };

    println!("{} {}", "Domain:".bold(), domain.cyan().bold());
    println!();
    println!("  {} {}", "Registrar:".bold(), or_dash(&whois.registrar));
    println!("  {} {}", "Registered:".bold(), or_dash(&whois.registered));
    println!("  {} {}", "Expires:".bold(), or_dash(&whois.expiry));
    println!();
    println!("{}", format!("Source: {}", whois.source).dimmed());
}
