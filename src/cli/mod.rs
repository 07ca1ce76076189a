mod ingest;
mod preview;

use anyhow::Result;
use clap::{Parser, Subcommand};

use self::{ingest::IngestArgs, preview::PreviewArgs};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log debug output
    #[clap(long, short, global = true)]
    pub(crate) verbose: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub(crate) enum Command {
    Ingest(IngestArgs),
    Preview(PreviewArgs),
}

pub(crate) async fn handle(args: Cli) -> Result<()> {
    match args.command {
        Command::Ingest(ingest_args) => ingest::handle(ingest_args).await?,
        Command::Preview(preview_args) => preview::handle(preview_args)?,
    };

    Ok(())
}
