use clap::Parser;
use member_heatmap::cli::{run, Cli};
use member_heatmap::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
