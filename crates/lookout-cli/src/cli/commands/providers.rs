//! `lookout providers` - manage provider endpoints.

use anyhow::Result;
use colored::Colorize;
use lookout::{Adapter, Provider, ProviderKind};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::{ProvidersArgs, ProvidersCommands};
use crate::output::{print_csv, print_structured, OutputFormat};

#[derive(Tabled, Serialize)]
struct ProviderRow {
    #[tabled(rename = "#")]
    priority: usize,
    #[tabled(rename = "Adapter")]
    adapter: &'static str,
    #[tabled(rename = "Endpoint")]
    url: String,
}

pub async fn execute(ctx: &Context, args: ProvidersArgs) -> Result<()> {
    match args.command {
        ProvidersCommands::List { kind } => {
            let rows = rows(ctx, kind).await?;
            render(ctx.output_format, kind, &rows)
        }
        ProvidersCommands::Set { kind, urls } => {
            ctx.engine.registry().set(kind, urls).await?;
            let rows = rows(ctx, kind).await?;
            if ctx.output_format == OutputFormat::Pretty {
                println!(
                    "{} {} {} provider(s) saved.",
                    "Success:".green().bold(),
                    rows.len(),
                    kind
                );
            }
            render(ctx.output_format, kind, &rows)
        }
        ProvidersCommands::Reset { kind } => {
            ctx.engine.registry().reset(kind).await?;
            let rows = rows(ctx, kind).await?;
            if ctx.output_format == OutputFormat::Pretty {
                println!("{} {} providers restored to defaults.", "Success:".green().bold(), kind);
            }
            render(ctx.output_format, kind, &rows)
        }
    }
}

async fn rows(ctx: &Context, kind: ProviderKind) -> Result<Vec<ProviderRow>> {
    let registry = ctx.engine.registry();
    Ok(match kind {
        ProviderKind::IpGeo => to_rows(&registry.geo_providers().await?),
        ProviderKind::Whois => to_rows(&registry.whois_providers().await?),
    })
}

fn to_rows<A: Adapter>(providers: &[Provider<A>]) -> Vec<ProviderRow> {
    providers
        .iter()
        .enumerate()
        .map(|(i, p)| ProviderRow {
            priority: i + 1,
            adapter: p.adapter().name(),
            url: p.template().to_string(),
        })
        .collect()
}

fn render(format: OutputFormat, kind: ProviderKind, rows: &[ProviderRow]) -> Result<()> {
    if print_structured(format, rows)? {
        return Ok(());
    }
    if format == OutputFormat::Csv {
        return print_csv(rows);
    }

    println!("{}", format!("{kind} providers").bold().underline());
    println!("{}", Table::new(rows).with(Style::rounded()).to_string());
    Ok(())
}
