use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Dump host machine specifications for benchmark provenance.
#[derive(Parser)]
#[command(name = "specs", about = "Dump host machine specifications", version)]
struct Cli {
    /// Folder to save computer_specs.txt into
    #[arg(long, default_value = "results")]
    output_folder: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let report = genfill::specs::render(&genfill::specs::collect());
    print!("{report}");
    genfill::specs::save_to(&cli.output_folder, &report)?;
    Ok(())
}
