mod app;
mod args;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = args::Cli::parse();

    // RUST_LOG, when set, overrides --log-level
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    app::run(cli)
}
