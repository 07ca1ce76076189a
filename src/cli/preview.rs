use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;
use standingsync::{preview::Preview, read_entries};

#[derive(Debug, Args, Clone)]
pub struct PreviewArgs {
    /// Standings export to preview
    file: PathBuf,
}

/// Prints the rows an ingest would send, without touching the store.
pub(crate) fn handle(args: PreviewArgs) -> Result<()> {
    let entries = read_entries(&args.file)?;
    let preview = Preview::build(&entries);

    info!(
        "{} drivers, {} races, {} standings",
        preview.drivers.len(),
        preview.races.len(),
        preview.standings.len()
    );
    println!("{}", serde_json::to_string_pretty(&preview)?);

    Ok(())
}
