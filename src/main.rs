//! CLI entry point for wave function collapse generation

use clap::Parser;
use wavetile::io::cli::{Cli, run};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    run(cli)
}
