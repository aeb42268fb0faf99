use anyhow::Context;
use clap::Parser;
use tidecon_processor::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.name();
    run(cli)
        .await
        .with_context(|| format!("{} failed", command))
}
