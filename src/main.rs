//! Command-line entry point.
//!
//! Thin glue around the library: read a register dump, run the pipeline,
//! write the report as JSON or terminal tables.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use daimidata::anomaly::Anomaly;
use daimidata::graph::LineageGraph;
use daimidata::record::{AliasTable, Normalizer, RawRecord, YearRange};
use daimidata::report::{Report, ReportOptions};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "daimidata", version, about = "Academic lineage statistics from a PhD register")]
struct Cli {
    /// JSON array of register records
    input: PathBuf,

    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Entries in the earliest-cohort list
    #[arg(long, default_value_t = 10)]
    first: usize,

    /// Entries in each supervisor ranking
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// JSON object of extra variant → canonical name mappings
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let aliases = match &cli.aliases {
        Some(path) => {
            let table = AliasTable::load(path)
                .with_context(|| format!("loading aliases from {}", path.display()))?;
            info!(entries = table.len(), "alias table loaded");
            table
        }
        None => AliasTable::builtin(),
    };
    let normalizer = Normalizer::new(aliases, YearRange::default());

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let elements: Vec<serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array", cli.input.display()))?;

    // Decode element by element so one broken row costs one record, not
    // the whole run.
    let mut raws = Vec::with_capacity(elements.len());
    let mut anomalies = Vec::new();
    for element in elements {
        let number = element
            .get("number")
            .and_then(serde_json::Value::as_u64)
            .map(|n| n as u32);
        match serde_json::from_value::<RawRecord>(element) {
            Ok(raw) => raws.push(raw),
            Err(err) => anomalies.push(Anomaly::RecordDropped {
                number,
                reason: err.to_string(),
            }),
        }
    }

    let (records, normalize_anomalies) = normalizer.normalize_all(&raws);
    anomalies.extend(normalize_anomalies);
    let (graph, build_anomalies) = LineageGraph::build(&records);
    anomalies.extend(build_anomalies);

    info!(
        read = raws.len(),
        kept = records.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        anomalies = anomalies.len(),
        "lineage built"
    );

    let options = ReportOptions {
        first: cli.first,
        top: cli.top,
    };
    let report = Report::assemble(&records, &graph, anomalies, &options);

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            match &cli.out {
                Some(path) => fs::write(path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        OutputFormat::Table => print_tables(&report),
    }

    Ok(())
}

fn print_tables(report: &Report) {
    use comfy_table::{ContentArrangement, Table};

    println!(
        "Records: {}   Supervisors: {}",
        report.stats.records, report.stats.supervisors
    );
    if let Some((from, to)) = report.stats.year_span {
        println!("Years:   {from}-{to}");
    }

    println!("\nFirst PhDs");
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Date", "Supervisors"]);
    for entry in &report.first_cohort {
        table.add_row(vec![
            entry.number.to_string(),
            entry.name.clone(),
            entry.date.clone(),
            entry.supervisors.join(", "),
        ]);
    }
    println!("{table}");

    println!("\nMost direct students");
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Supervisor", "Students"]);
    for entry in &report.top_supervisors {
        table.add_row(vec![entry.name.clone(), entry.students.to_string()]);
    }
    println!("{table}");

    println!("\nLongest supervisor chains");
    for chain in &report.longest_chains {
        let rendered: Vec<String> = chain
            .names
            .iter()
            .zip(&chain.years)
            .map(|(name, year)| match year {
                Some(y) => format!("{name} ({y})"),
                None => name.clone(),
            })
            .collect();
        println!("  {}", rendered.join(" -> "));
    }

    println!("\nLargest descendant sets");
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Supervisor", "Descendants"]);
    for entry in &report.most_descendants {
        table.add_row(vec![entry.name.clone(), entry.descendants.to_string()]);
    }
    println!("{table}");

    if !report.anomalies.is_empty() {
        println!("\nData anomalies ({})", report.anomalies.len());
        for anomaly in &report.anomalies {
            println!("  {anomaly}");
        }
    }
}
