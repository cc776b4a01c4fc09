use anyhow::{Context, Result};
use clap::Parser;
use glob::glob;
use logsheet::{convert_file, Config, ConvertOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert an instrument log (.txt/.csv/.his) into a trimmed .xlsx"
)]
struct Args {
    /// Log file to convert; defaults to the first .txt in the current directory.
    input: Option<PathBuf>,
    /// Keep every k-th row of the trimmed data.
    #[arg(short = 'k', long = "every", default_value_t = 1)]
    every: usize,
    /// Directory for the spreadsheet.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// YAML file overriding the default settings.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Trim column position counted from the right (1 = last column).
    #[arg(long)]
    offset: Option<usize>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    let input = match args.input {
        Some(p) => p,
        None => match first_txt_in_cwd()? {
            Some(p) => {
                info!("using first .txt in current directory: {}", p.display());
                p
            }
            None => {
                info!("no .txt file in the current directory, nothing to do");
                return Ok(());
            }
        },
    };

    let opts = ConvertOptions {
        config,
        stride: args.every,
        offset: args.offset,
        out_dir: args.out_dir,
    };

    let report =
        convert_file(&input, &opts).with_context(|| format!("converting {}", input.display()))?;
    info!(
        "saved {} ({} rows, window {}..={} on '{}', every {} row)",
        report
            .output
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        report.rows_written,
        report.window.start,
        report.window.end,
        report.window.column_name,
        report.stride
    );
    Ok(())
}

fn first_txt_in_cwd() -> Result<Option<PathBuf>> {
    let mut found: Vec<PathBuf> = glob("*.txt")
        .context("invalid glob pattern")?
        .filter_map(|p| p.ok())
        .filter(|p| p.is_file())
        .collect();
    found.sort();
    Ok(found.into_iter().next())
}
