use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::{ProcessingError, Result};
use crate::processors::{ConversionOutput, ParallelProcessor};
use crate::readers::MemberReader;
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::JsonWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Convert { run, out } => {
            let mut settings = resolve_settings(&run)?;
            if let Some(out_dir) = out {
                settings.out_dir = out_dir;
            }

            let output = convert(&run.csv_path, &settings, cli.quiet)?;

            let writer = JsonWriter::new();
            let input_csv = run.csv_path.display().to_string();
            let metadata = writer.write_all(&output, &input_csv, &settings.out_dir)?;

            println!("Wrote:");
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }

        Commands::Validate { run } => {
            let settings = resolve_settings(&run)?;
            let output = convert(&run.csv_path, &settings, cli.quiet)?;

            println!("{}", output.summary.generate_summary());

            if output.summary.rows_dropped_invalid_coordinates == 0 {
                println!("✅ Every row has a valid lat/lon");
            } else {
                println!(
                    "⚠️  {} rows would be dropped for invalid lat/lon",
                    output.summary.rows_dropped_invalid_coordinates
                );
            }
            println!("Validation complete - no output files written");
        }

        Commands::Info { file } => {
            let metadata = JsonWriter::new().read_metadata(&file)?;
            println!("{}", metadata.summary());
            println!("Privacy: {}", metadata.privacy_note);
        }
    }

    Ok(())
}

/// Layer CLI flags over file and environment settings
fn resolve_settings(run: &RunArgs) -> Result<Settings> {
    apply_run_args(Settings::load(run.config.as_deref())?, run)
}

fn apply_run_args(mut settings: Settings, run: &RunArgs) -> Result<Settings> {
    if run.no_aggregate {
        settings.aggregate = false;
    }
    if let Some(decimals) = run.decimals {
        settings.precision_decimals = decimals;
    }
    if let Some(max_workers) = run.max_workers {
        settings.max_workers = max_workers;
    }
    if let Some(chunk_size) = run.chunk_size {
        settings.chunk_size = chunk_size;
    }

    validator::Validate::validate(&settings)?;
    debug!(?settings, "Resolved settings");
    Ok(settings)
}

fn convert(csv_path: &Path, settings: &Settings, quiet: bool) -> Result<ConversionOutput> {
    info!(input = %csv_path.display(), "Converting member export");

    let progress = ProgressReporter::new_spinner("Reading member rows...", quiet);

    let rows = MemberReader::new().read_rows(csv_path)?;
    let processor = ParallelProcessor::new(settings.max_workers)
        .with_chunk_size(settings.chunk_size)
        .with_config(settings.conversion_config());
    let output = processor.process_source(rows, Some(&progress))?;

    progress.finish_with_message(&format!(
        "Converted {} rows into {} points",
        output.summary.rows_read, output.summary.points_output
    ));

    Ok(output)
}
