mod scheduler;

use std::sync::Arc;

use anyhow::Result;
use common::Config;
use orchestrator::{build_sources, Pipeline};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::scheduler::DigestScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let sources = Arc::new(build_sources(&config)?);
    let pipeline = Arc::new(Pipeline::from_config(&config).await?);

    let mut scheduler = DigestScheduler::new().await?;
    scheduler
        .add_cron_job(&config.digest.cron, move || {
            let sources = sources.clone();
            let pipeline = pipeline.clone();
            async move {
                let tally = pipeline.run_all(&sources).await;
                if tally.failed > 0 {
                    anyhow::bail!("{} of {} sources failed", tally.failed, sources.len());
                }
                Ok(())
            }
        })
        .await?;

    scheduler.start().await?;
    info!("Digest scheduler running on '{}'. Press Ctrl+C to stop", config.digest.cron);

    tokio::signal::ctrl_c().await?;
    info!("Received interrupt signal, shutting down...");
    scheduler.shutdown().await?;

    Ok(())
}
