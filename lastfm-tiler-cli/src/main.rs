//! lastfm-tiler CLI - Album cover grids from the command line
//!
//! Builds one grid per user, all concurrently, and writes `<user>.<ext>`
//! into the output directory.

mod error;
mod output;

use clap::Parser;
use error::CliError;
use lastfm_tiler::config::{lenient_size, Period, TilerConfig};
use lastfm_tiler::grid::LastFmGridBuilder;
use lastfm_tiler::limiter::ConcurrencyLimiter;
use lastfm_tiler::log::{Logger, NoOpLogger, TracingLogger};
use lastfm_tiler::logging::{init_logging, DEFAULT_LOG_LEVEL};
use output::{output_path, write_grid, OutputFormat};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Parser)]
#[command(name = "lastfm-tiler")]
#[command(version = lastfm_tiler::VERSION)]
#[command(about = "Build album cover grids from Last.fm charts", long_about = None)]
struct Args {
    /// Last.fm user names, comma separated
    #[arg(long, required = true, value_delimiter = ',')]
    lastfm_users: Vec<String>,

    /// Last.fm API key
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    lastfm_api_key: Option<String>,

    /// Chart period: overall, 7day, 1month, 3month, 6month or 12month
    #[arg(long, default_value = "7day")]
    lastfm_period: String,

    /// Covers per side; values below 1 use the default
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    grid_size: i64,

    /// Pixels per cover side; values below 1 use the default
    #[arg(long, default_value_t = 174, allow_negative_numbers = true)]
    img_size_px: i64,

    /// Directory the grids are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Output image format
    #[arg(long, value_enum, default_value = "jpeg")]
    format: OutputFormat,

    /// Also write logs to this file (truncated at start)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Only report errors; per-tile diagnostics are discarded
    #[arg(long, short)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let level = if args.quiet { "error" } else { DEFAULT_LOG_LEVEL };
    let _logging_guard = init_logging(level, args.log_file.as_deref()).map_err(CliError::LoggingInit)?;

    let period: Period = args.lastfm_period.parse()?;
    let config = TilerConfig::new(args.lastfm_api_key.unwrap_or_default())
        .with_period(period)
        .with_grid_size(lenient_size(args.grid_size))
        .with_img_size_px(lenient_size(args.img_size_px));
    // Fail before any network traffic.
    config.validate()?;

    let users: Vec<String> = args
        .lastfm_users
        .into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    let logger: Arc<dyn Logger> = if args.quiet {
        Arc::new(NoOpLogger)
    } else {
        Arc::new(TracingLogger)
    };
    let builder = Arc::new(LastFmGridBuilder::lastfm(logger)?);

    let runtime = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
    let total = users.len();
    let failed = runtime.block_on(build_all(builder, config, users, args.output_dir, args.format));

    if failed > 0 {
        return Err(CliError::Incomplete { failed, total });
    }
    Ok(())
}

/// Builds and writes every user's grid. Returns the number of failures.
async fn build_all(
    builder: Arc<LastFmGridBuilder>,
    config: TilerConfig,
    users: Vec<String>,
    output_dir: PathBuf,
    format: OutputFormat,
) -> usize {
    tracing::info!(
        users = users.len(),
        pool_size = ConcurrencyLimiter::global().max_concurrent(),
        "Building grids"
    );

    let mut tasks = JoinSet::new();
    for user in users {
        let builder = Arc::clone(&builder);
        let config = config.clone();
        let path = output_path(&output_dir, &user, format);
        tasks.spawn(async move {
            let result = build_one(&builder, &config, &user, path, format).await;
            (user, result)
        });
    }

    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(path))) => println!("Wrote {}", path.display()),
            Ok((_, Err(e))) => {
                failed += 1;
                e.report();
            }
            Err(e) => {
                failed += 1;
                tracing::error!(error = %e, "Grid task aborted");
            }
        }
    }
    failed
}

async fn build_one(
    builder: &LastFmGridBuilder,
    config: &TilerConfig,
    user: &str,
    path: PathBuf,
    format: OutputFormat,
) -> Result<PathBuf, CliError> {
    let image = builder
        .build(config, user)
        .await
        .map_err(|error| CliError::Build {
            user: user.to_string(),
            error,
        })?;

    let written = path.clone();
    match tokio::task::spawn_blocking(move || write_grid(image, &path, format)).await {
        Ok(result) => result.map(|()| written),
        Err(e) => Err(CliError::FileWrite {
            path: written,
            error: image::ImageError::IoError(std::io::Error::other(e)),
        }),
    }
}
