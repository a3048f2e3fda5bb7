//! `lookout dns` - record sets, site reports and reverse lookups.

use anyhow::Result;
use colored::Colorize;
use lookout::recon::{BlacklistStatus, DnsReport};
use lookout::{DnsRecord, RecordType};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::{DnsArgs, DnsCommands};
use crate::output::{print_csv, print_structured, spinner, OutputFormat};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "TTL")]
    ttl: String,
}

impl From<&DnsRecord> for RecordRow {
    fn from(record: &DnsRecord) -> Self {
        Self {
            record_type: record.record_type.to_string(),
            data: record.display_data(),
            ttl: format!("{}s", record.ttl),
        }
    }
}

/// Flat row for CSV output of a report
#[derive(Serialize)]
struct ReportRow<'a> {
    section: &'static str,
    #[serde(rename = "type")]
    record_type: String,
    name: &'a str,
    data: &'a str,
    ttl: u32,
}

#[derive(Serialize)]
struct PtrRow {
    ip: String,
    hostname: Option<String>,
}

pub async fn execute(ctx: &Context, args: DnsArgs) -> Result<()> {
    match args.command {
        DnsCommands::Records { domain, record_type } => records(ctx, &domain, record_type).await,
        DnsCommands::Report { host } => report(ctx, &host).await,
        DnsCommands::Ptr { ips } => ptr(ctx, &ips).await,
    }
}

async fn records(ctx: &Context, domain: &str, record_type: RecordType) -> Result<()> {
    let progress = spinner(ctx.output_format, format!("Resolving {record_type} for {domain}..."));
    let records = ctx.engine.dns_records(domain, record_type).await;
    progress.finish_and_clear();
    let records = records?;

    if print_structured(ctx.output_format, &records)? {
        return Ok(());
    }
    if ctx.output_format == OutputFormat::Csv {
        return print_csv(&records);
    }

    println!(
        "{} {} {}",
        "Domain:".bold(),
        domain.cyan().bold(),
        format!("({record_type}, {})", records.len()).dimmed()
    );
    println!();
    print_records(&records);
    Ok(())
}

async fn report(ctx: &Context, host: &str) -> Result<()> {
    let escalation = ctx.engine.registry().escalation().await?;

    let progress = spinner(ctx.output_format, format!("Inspecting {host}..."));
    let report = DnsReport::collect(ctx.engine.doh(), &escalation, host).await;
    progress.finish_and_clear();
    let report = report?;

    if print_structured(ctx.output_format, &report)? {
        return Ok(());
    }
    if ctx.output_format == OutputFormat::Csv {
        let rows = report.sections().into_iter().flat_map(|(section, records)| {
            records.iter().map(move |r| ReportRow {
                section,
                record_type: r.record_type.to_string(),
                name: &r.name,
                data: &r.data,
                ttl: r.ttl,
            })
        });
        return print_csv(rows);
    }

    println!("{} {}", "Host:".bold(), report.host.cyan().bold());
    let blacklist = match report.blacklist {
        BlacklistStatus::Clean => report.blacklist.to_string().green(),
        BlacklistStatus::Listed => report.blacklist.to_string().red().bold(),
        BlacklistStatus::Unknown => report.blacklist.to_string().yellow(),
    };
    println!("  {} {}", "Blocklist:".bold(), blacklist);

    for (section, records) in report.sections() {
        println!();
        println!("{}", format!("{section} ({})", records.len()).bold().underline());
        print_records(records);
    }

    println!();
    println!(
        "{}",
        format!("Collected {}", report.collected_at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
    );
    Ok(())
}

async fn ptr(ctx: &Context, ips: &[String]) -> Result<()> {
    // Flatten comma-separated values
    let ip_list: Vec<&str> = ips
        .iter()
        .flat_map(|i| i.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut rows = Vec::with_capacity(ip_list.len());
    for ip in ip_list {
        let hostname = ctx.engine.reverse_lookup(ip).await?;
        rows.push(PtrRow {
            ip: ip.to_string(),
            hostname,
        });
    }

    if print_structured(ctx.output_format, &rows)? {
        return Ok(());
    }
    if ctx.output_format == OutputFormat::Csv {
        return print_csv(&rows);
    }

    println!("{}", "Reverse DNS:".bold().underline());
    for row in &rows {
        let name = row
            .hostname
            .as_deref()
            .map_or_else(|| "(none)".dimmed().to_string(), ToString::to_string);
        println!("  {} -> {}", row.ip.cyan(), name);
    }
    Ok(())
}

fn print_records(records: &[DnsRecord]) {
    if records.is_empty() {
        println!("  {}", "No records".dimmed());
        return;
    }
    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    println!("{}", Table::new(&rows).with(Style::rounded()).to_string());
}
