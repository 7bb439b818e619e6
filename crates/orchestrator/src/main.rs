use anyhow::Result;
use common::Config;
use orchestrator::{build_sources, Pipeline};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let sources = build_sources(&config)?;
    let pipeline = Pipeline::from_config(&config).await?;

    info!("Daily digest run starting");
    let tally = pipeline.run_all(&sources).await;

    if tally.failed > 0 {
        anyhow::bail!("{} of {} sources failed", tally.failed, sources.len());
    }

    Ok(())
}
