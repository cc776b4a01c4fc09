use anyhow::{Context, Result};
use clap::Parser;
use logsheet::{prepare, Config, ConvertOptions};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Show what the converter would detect in a log, without writing anything.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    input: PathBuf,
    #[arg(short = 'k', long = "every", default_value_t = 1)]
    every: usize,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    offset: Option<usize>,
    /// Number of output rows to print.
    #[arg(long, default_value_t = 5)]
    head: usize,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let opts = ConvertOptions {
        config,
        stride: args.every,
        offset: args.offset,
        ..ConvertOptions::default()
    };

    let prepared = prepare(&args.input, &opts)
        .with_context(|| format!("inspecting {}", args.input.display()))?;
    let report = &prepared.report;
    let window = &report.window;

    println!("=== {} ===", args.input.display());
    println!("Kind:            {:?}", report.kind);
    println!("Header line:     {}", report.header_line);
    println!("Delimiter:       {:?}", report.delimiter);
    println!(
        "Dropped column:  {}",
        report.dropped_column.as_deref().unwrap_or("<none>")
    );
    println!("Columns:         {}", prepared.table.headers.join(" | "));
    println!("Data rows:       {}", report.table_rows);
    println!(
        "Trim column:     {} (index {}, offset {}{})",
        window.column_name,
        window.column,
        report.offset,
        if window.used_fallback { ", fallback" } else { "" }
    );
    println!(
        "Window:          {}..={} ({} rows)",
        window.start,
        window.end,
        window.row_count()
    );
    println!("Rows to write:   {} (every {})", report.rows_written, report.stride);
    println!();

    for row in prepared.table.rows.iter().take(args.head) {
        println!("{}", row.join(" | "));
    }
    Ok(())
}
