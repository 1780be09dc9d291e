use std::error::Error;

use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use tinyllm::cli::{display, Args};
use tinyllm::config::{LoggingConfig, OutputFormat, Settings};
use tinyllm::Model;

/// Main entry point for tinyllm
///
/// Loads settings, applies command-line overrides, builds the model and
/// prints the result of one forward pass over the input text.
///
/// # Errors
/// Returns an error if configuration is invalid, the text cannot be
/// tokenized within the model limits, or output cannot be rendered
fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    let mut settings = Settings::from_dir(&args.config_dir)?;
    args.apply(&mut settings);
    settings.validate()?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = init_logging(&settings.logging);

    info!("tinyllm starting up");
    info!("Settings loaded from {}", args.config_dir.display());

    let model = Model::new(&settings.model)?;

    let text = settings.run.text.as_str();
    let tokens = model.tokenize(text)?;
    let output = model.forward_tokens(&tokens)?;
    info!("Forward pass complete, output shape {:?}", output.shape());

    match settings.run.format {
        OutputFormat::Table => println!("{}", display::render_table(&tokens, &output)),
        OutputFormat::Json => println!("{}", display::render_json(text, &tokens, &output)?),
    }

    Ok(())
}

/// Installs the global subscriber. RUST_LOG wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match &logging.file {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::RollingFileAppender::new(
                tracing_appender::rolling::Rotation::DAILY,
                dir,
                "tinyllm",
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                // Disable ANSI colors for cleaner log files
                .with_ansi(false)
                .with_line_number(true)
                .with_file(true)
                .with_thread_ids(true)
                .with_target(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    }
}
