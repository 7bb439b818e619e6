use std::sync::Arc;

use anyhow::Result;
use time::OffsetDateTime;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

pub struct DigestScheduler {
    scheduler: JobScheduler,
}

impl DigestScheduler {
    pub async fn new() -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self { scheduler })
    }

    /// `cron` uses six fields, seconds first.
    pub async fn add_cron_job<F, Fut>(&mut self, cron: &str, job_fn: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        info!("Scheduling digest job with cron: {}", cron);

        let job_fn = Arc::new(job_fn);
        let job = Job::new_async(cron, move |_uuid, _l| {
            let job_fn = job_fn.clone();
            Box::pin(async move {
                info!("Executing scheduled digest run at {}", OffsetDateTime::now_utc());
                match job_fn().await {
                    Ok(()) => info!("Scheduled digest run completed"),
                    Err(e) => error!("Scheduled digest run failed: {}", e),
                }
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }

    pub async fn start(&self) -> Result<()> {
        info!("Starting scheduler...");
        self.scheduler.start().await?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down scheduler...");
        self.scheduler.shutdown().await?;
        Ok(())
    }
}
