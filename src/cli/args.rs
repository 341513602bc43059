use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "member-heatmap")]
#[command(about = "Convert member-location CSV exports into map points, heatmaps and metadata JSON")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a member CSV export into Leaflet-ready JSON files
    Convert {
        #[command(flatten)]
        run: RunArgs,

        #[arg(short, long, help = "Output directory [default: ./out]")]
        out: Option<PathBuf>,
    },

    /// Run the conversion and report row statistics without writing files
    Validate {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Display a previously written members_meta.json
    Info {
        #[arg(help = "Path to members_meta.json")]
        file: PathBuf,
    },
}

/// Options shared by every command that runs the pipeline
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(help = "Path to the member CSV export")]
    pub csv_path: PathBuf,

    #[arg(long, help = "Disable coordinate aggregation")]
    pub no_aggregate: bool,

    #[arg(short, long, help = "Rounding decimals when aggregating [default: 3]")]
    pub decimals: Option<i32>,

    #[arg(long, help = "Worker threads for parsing [default: number of CPUs]")]
    pub max_workers: Option<usize>,

    #[arg(long, help = "Rows per parallel parsing chunk [default: 10000]")]
    pub chunk_size: Option<usize>,

    #[arg(short, long, help = "TOML settings file")]
    pub config: Option<PathBuf>,
}
