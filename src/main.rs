mod account;
mod args;
mod client;
mod config;
mod enrich;
mod history;
mod job;
mod model;
mod payload;
mod publisher;
mod reference;
mod rivals;

use clap::Parser;

use crate::{args::Args, config::Config, job::SyncJob};

// one player per run; the scheduler invokes us again for the next update
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::try_from(args)?;
    let job = SyncJob::new(&config)?;

    if let Err(err) = job.run().await {
        log::error!("sync for {} failed: {:#}", config.username, err);
        return Err(err);
    }
    Ok(())
}
