use anyhow::{bail, Result};
use clap::Args;
use clap_stdin::MaybeStdin;
use log::{error, info};
use std::path::PathBuf;
use standingsync::{config, sync_file, StoreConfig, SupabaseStore};

#[derive(Debug, Args, Clone)]
pub struct IngestArgs {
    /// Standings export to ingest
    file: PathBuf,

    #[clap(long, env = config::URL_ENV, help = "Base URL of the Supabase project")]
    url: String,

    #[clap(
        long,
        env = config::KEY_ENV,
        hide_env_values = true,
        help = "Supabase API key. Pass - to read it from stdin"
    )]
    key: MaybeStdin<String>,
}

pub(crate) async fn handle(args: IngestArgs) -> Result<()> {
    let config = StoreConfig::new(&args.url, &args.key.to_string())?;
    let store = SupabaseStore::new(config);

    info!("Ingesting {:?}", args.file);
    let report = sync_file(&args.file, &store).await?;

    for failure in report.failures() {
        error!("Not stored: {:?}", failure);
    }
    info!(
        "Stored {} of {} records ({} drivers, {} races, {} standings)",
        report.succeeded(),
        report.attempted(),
        report.drivers.len(),
        report.races.len(),
        report.standings.len()
    );

    if report.failed() > 0 {
        bail!("{} of {} records were not stored", report.failed(), report.attempted());
    }

    Ok(())
}
