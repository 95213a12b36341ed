use clap::Parser;
use edgekit::cli::{run, Cli};
use edgekit::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    run(&cli)?;

    Ok(())
}
