//! Replay an input event script through the canvas editor and print the
//! resulting frame as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rect_canvas::config::{EditorConfig, LogLevel};
use rect_canvas::replay::{self, EventScript};

#[derive(Debug, Parser)]
#[command(name = "rect-canvas-replay")]
#[command(about = "Replay an input event script through the canvas editor")]
struct Cli {
    /// JSON event script (`{"events": [...]}`)
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,
    /// Background image; only its pixel size is read
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,
    /// Config file to use instead of the one in the user config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Install the logger before the config is read, at the default level.
///
/// Returns `true` when `RUST_LOG` sets the filter, in which case the
/// configured level is not applied.
fn init_logging() -> bool {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    let mut builder = env_logger::Builder::new();
    if from_env {
        builder.parse_default_env();
    } else {
        // The logger accepts everything; the global max level does the filtering.
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.init();

    if !from_env {
        log::set_max_level(LogLevel::default().to_level_filter());
    }
    from_env
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level_from_env = init_logging();

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::load_from_default_path(),
    };
    if !level_from_env {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let script = EventScript::load(&cli.script)?;
    let image = cli
        .image
        .as_deref()
        .map(replay::load_raster)
        .transpose()?;

    let report = replay::run(&script, &config, image)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Replay error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
