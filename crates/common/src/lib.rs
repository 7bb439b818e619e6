pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod source;
pub mod story;

pub use config::Config;
pub use content::ContentFetcher;
pub use error::{PipelineError, PipelineResult};
pub use source::{DigestStore, StorySource};
pub use story::{Comment, Digest, SourceKind, Story};
