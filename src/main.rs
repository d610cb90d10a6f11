//! LessonVox - multilingual lesson narration
//!
//! Reads `tts_config.json` next to the executable and renders every
//! configured input to MP3.

use clap::Parser;
use lessonvox::config::{self, Config, ConfigLoad};
use lessonvox::lang::WhatlangDetector;
use lessonvox::runner::Runner;
use lessonvox::tts::edge::EdgeTtsCli;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to tts_config.json next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Setup logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = args.config.unwrap_or_else(config::config_path);
    let config = match Config::load_or_init(&config_path) {
        Ok(ConfigLoad::Loaded(config)) => config,
        Ok(ConfigLoad::TemplateWritten(path)) => {
            info!("📝 Wrote config template to {}", path.display());
            info!("   Edit 'inputs' and voices, then run again.");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let detector = WhatlangDetector::new();
    let synth = EdgeTtsCli::new(&config.tts_command);
    let runner = Runner::new(&config, &detector, &synth);

    let base_dir = config::base_dir(&config_path);
    let files = match runner.resolve_inputs(&base_dir) {
        Ok(files) => files,
        Err(e) => {
            error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("🗂️ {} input file(s)", files.len());

    let summary = runner.run(&files).await;
    info!(
        "🏁 Done: {} rendered, {} skipped, {} aborted; {} output(s), {} block(s) ok, {} failed",
        summary.files_processed,
        summary.files_skipped,
        summary.files_failed,
        summary.outputs_written,
        summary.blocks_rendered,
        summary.blocks_failed
    );
    ExitCode::SUCCESS
}
