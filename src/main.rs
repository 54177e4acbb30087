//! graphbind - filter delimited records through an operator pipeline

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser as ClapParser;
use graphbind::operator::{CsvScan, Filter, Limit, Operator, Projection};
use graphbind::predicate::{ComparisonKind, FieldComparison, Predicate, PredicateBuilder};
use log::{debug, info};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Reads a delimited file and writes the matching rows as JSON documents,
/// one per line.
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file; its first line names the fields
    input: PathBuf,

    /// Field delimiter (a single byte, `\t` for tab)
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Field comparison `left:op:right`, e.g. `age:gt:limit` or `a:=:b`.
    /// May be repeated.
    #[arg(short = 'w', long = "where")]
    comparisons: Vec<String>,

    /// Combine comparisons with OR instead of AND
    #[arg(long)]
    any: bool,

    /// Comma-separated fields to output
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<String>,

    /// Maximum number of rows to output
    #[arg(short, long)]
    limit: Option<usize>,

    /// Rows to skip before output starts
    #[arg(long, default_value = "0")]
    offset: usize,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut pipeline = build_pipeline(&args)?;
    pipeline.open().context("Failed to open pipeline")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut rows = 0usize;
    while let Some(record) = pipeline.next()? {
        let document = record.to_document(pipeline.header());
        serde_json::to_writer(&mut out, &document)?;
        writeln!(out)?;
        rows += 1;
    }
    out.flush()?;
    pipeline.close()?;

    info!("Wrote {} row(s)", rows);
    Ok(())
}

fn build_pipeline(args: &Args) -> Result<Box<dyn Operator>> {
    let delimiter = parse_delimiter(&args.delimiter)?;
    let mut pipeline: Box<dyn Operator> =
        Box::new(CsvScan::with_delimiter(&args.input, delimiter));

    let comparisons = args
        .comparisons
        .iter()
        .map(|s| parse_comparison(s).map(Predicate::Comparison))
        .collect::<Result<Vec<_>>>()?;
    let predicate = if args.any {
        PredicateBuilder::any(comparisons)
    } else {
        PredicateBuilder::all(comparisons)
    };
    if let Some(predicate) = predicate {
        debug!("Filtering with {}", predicate);
        pipeline = Box::new(Filter::new(pipeline, predicate));
    }

    if args.limit.is_some() || args.offset > 0 {
        let limit = args.limit.unwrap_or(usize::MAX);
        pipeline = Box::new(Limit::with_offset(pipeline, limit, args.offset));
    }

    if !args.select.is_empty() {
        pipeline = Box::new(Projection::new(pipeline, args.select.iter().cloned()));
    }

    Ok(pipeline)
}

fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 => Ok(s.as_bytes()[0]),
        _ => bail!("Delimiter must be a single byte, got '{}'", s),
    }
}

/// Parse `left:op:right` into a field comparison
fn parse_comparison(s: &str) -> Result<FieldComparison> {
    let parts: Vec<&str> = s.split(':').collect();
    let [left, op, right] = parts.as_slice() else {
        return Err(anyhow!("Expected left:op:right, got '{}'", s));
    };
    if left.is_empty() || right.is_empty() {
        bail!("Empty field name in '{}'", s);
    }
    let kind: ComparisonKind = op
        .parse()
        .with_context(|| format!("Invalid comparison '{}'", s))?;
    Ok(FieldComparison::new(*left, *right, kind))
}
