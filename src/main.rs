use anyhow::Result;
use clap::Parser;
use net_tui::{cli::Args, run};

fn main() -> Result<()> {
    let args = Args::parse();
    run(args)
}
