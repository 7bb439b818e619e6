use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Decoding failed: {0}")]
    Decode(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Post with pid {0} already exists")]
    DuplicatePost(String),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            PipelineError::Decode(e.to_string())
        } else {
            PipelineError::Fetch(e.to_string())
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
