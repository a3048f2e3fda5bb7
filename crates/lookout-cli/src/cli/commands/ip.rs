//! `lookout ip` - geolocate an IP address.

use anyhow::Result;
use colored::Colorize;
use lookout::{GeoRecord, Query, UNKNOWN};

use super::Context;
use crate::cli::args::IpArgs;
use crate::output::{print_csv, print_structured, spinner, OutputFormat};

pub async fn execute(ctx: &Context, args: IpArgs) -> Result<()> {
    let query = Query::ip(&args.ip)?;

    let progress = spinner(ctx.output_format, format!("Locating {}...", query.subject()));
    let record = ctx.engine.lookup_ip(query.subject()).await;
    progress.finish_and_clear();
    let record = record?;

    if print_structured(ctx.output_format, &record)? {
        return Ok(());
    }

    match (ctx.output_format, record) {
        (OutputFormat::Csv, record) => print_csv(record),
        (_, Some(record)) => {
            print_geo_pretty(&record);
            Ok(())
        }
        (_, None) => {
            println!(
                "{} no provider returned a usable answer for {}",
                "Not found:".yellow().bold(),
                query.subject().cyan()
            );
            Ok(())
        }
    }
}

fn print_geo_pretty(geo: &GeoRecord) {
    println!("{} {}", "IP:".bold(), geo.ip.cyan().bold());
    println!();

    let country = if geo.country_code == UNKNOWN {
        geo.country.clone()
    } else {
        format!("{} ({})", geo.country, geo.country_code)
    };
    println!("  {} {}", "Country:".bold(), country);
    println!("  {} {}", "Region:".bold(), geo.region);
    println!("  {} {}", "City:".bold(), geo.city);
    println!("  {} {}", "Organization:".bold(), geo.org);
    if let Some(hostname) = &geo.hostname {
        println!("  {} {}", "Hostname:".bold(), hostname.green());
    }

    println!();
    println!("{}", format!("Source: {}", geo.source_host()).dimmed());
}
