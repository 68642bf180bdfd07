//! Inference Client - HTTP backends for zero-shot classification and summarization
//!
//! Talks to any endpoint that speaks the Hugging Face Inference API task
//! format, hosted or self-hosted:
//! - `POST {base_url}/models/{classifier_model}` for zero-shot classification
//! - `POST {base_url}/models/{summarizer_model}` for summarization

pub mod config;
pub mod hosted;
pub mod response;

pub use config::InferenceConfig;
pub use hosted::{build_backends, HostedClassifier, HostedSummarizer};
