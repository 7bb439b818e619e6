use std::time::Duration;
use reqwest::Client;

use crate::error::PipelineResult;

/// Timeout for platform APIs and the readability proxy.
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the text-generation backend.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_client(timeout: Duration) -> PipelineResult<Client> {
    let client = Client::builder()
        .user_agent(concat!("daily-digest/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}
