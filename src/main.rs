use anyhow::{Context, Result, bail};
use listing_normalizer::{JsonFlattener, NormalizerConfig, RuleNormalizer};
use polars::prelude::*;
use serde_json::Value;
use std::env;
use std::fs::File;
use tracing::info;

const USAGE: &str =
    "usage: listing-normalizer <input.json> [--config <file.toml>] [--parquet <out.parquet>]";

struct Args {
    input: String,
    config: Option<String>,
    parquet: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut input = None;
    let mut config = None;
    let mut parquet = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => config = Some(args.next().context(USAGE)?),
            "--parquet" | "-p" => parquet = Some(args.next().context(USAGE)?),
            _ if input.is_none() && !arg.starts_with('-') => input = Some(arg),
            _ => bail!("unexpected argument '{}'\n{}", arg, USAGE),
        }
    }

    Ok(Args {
        input: input.context(USAGE)?,
        config,
        parquet,
    })
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the normalized records
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => NormalizerConfig::from_file(path)
            .context("Failed to load normalizer configuration")?,
        None => NormalizerConfig::default(),
    };
    info!(
        "🚀 Normalizing {} (title fallback: {}, {} extra column aliases)",
        args.input,
        config.normalizer.fill_from_title,
        config.columns.len()
    );

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input))?;
    let json_data: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("Input is not a JSON array of listings: {}", args.input))?;

    let flattener = JsonFlattener::new();
    let normalizer = RuleNormalizer::from_config(&config);

    let records = flattener.to_records(&json_data);
    let canonical = normalizer.normalize_records(&records);
    println!("{}", serde_json::to_string_pretty(&canonical)?);

    if let Some(path) = &args.parquet {
        let mut df = normalizer.canonical_dataframe(&canonical)?;

        let file = File::create(path)
            .with_context(|| format!("Failed to create parquet file: {}", path))?;
        ParquetWriter::new(file).finish(&mut df)?;
        info!("📦 Wrote {} rows to {}", df.height(), path);
    }

    info!("✅ Normalized {} listings", canonical.len());
    Ok(())
}
