pub mod cli;
pub mod error;
pub mod infer;
pub mod io_utils;
pub mod parse;
pub mod preview;
pub mod profile;
pub mod record;
pub mod render;
pub mod stats;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("data_profile", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Profile(args) => handle_profile(&args),
        Commands::Preview(args) => handle_preview(&args),
    }
}

fn handle_profile(args: &cli::ProfileArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let payload = io_utils::read_payload(&args.input)?;
    let text = io_utils::decode_bytes(&payload, encoding)?;
    let hint = io_utils::source_hint(&args.input, args.name.as_deref());
    info!(
        "Profiling '{}' ({} bytes)",
        hint.as_deref().unwrap_or(profile::DEFAULT_SOURCE_NAME),
        payload.len()
    );

    let result = profile::profile(&text, hint.as_deref())?;

    if args.json {
        let document =
            serde_json::to_string_pretty(&result).context("Serializing profile document")?;
        println!("{document}");
    } else {
        render::print_profile(&result);
    }
    info!(
        "Profiled {} row(s) across {} column(s)",
        result.rows, result.columns
    );
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let payload = io_utils::read_payload(&args.input)?;
    let text = io_utils::decode_bytes(&payload, encoding)?;
    let hint = io_utils::source_hint(&args.input, args.name.as_deref());

    let records = parse::parse(&text, hint.as_deref())?;
    let sampled = preview::sample(&records);
    let shown = &sampled[..sampled.len().min(args.rows)];
    if shown.is_empty() {
        println!("No data");
        return Ok(());
    }

    let (headers, rows) = render::preview_rows(shown);
    render::print_table(&headers, &rows);
    info!("Displayed {} record(s) from {:?}", shown.len(), args.input);
    Ok(())
}
