//! crates/video_summarizer_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the transcript provider and the LLM vendor.

use async_trait::async_trait;
use std::fmt;

use crate::domain::{CaptionFragment, Transcript, VideoId};

//=========================================================================================
// Port Error and Result Types
//=========================================================================================

/// Likely reasons a transcript could not be retrieved.
///
/// These are hints shown to the user, never a diagnosis: the transcript service
/// does not report which one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFailureHint {
    NoCaptions,
    NetworkBlocked,
    CloudHostingIp,
}

impl TranscriptFailureHint {
    pub const ALL: [TranscriptFailureHint; 3] = [
        TranscriptFailureHint::NoCaptions,
        TranscriptFailureHint::NetworkBlocked,
        TranscriptFailureHint::CloudHostingIp,
    ];

    pub fn description(self) -> &'static str {
        match self {
            TranscriptFailureHint::NoCaptions => {
                "The video has no captions or captions are disabled."
            }
            TranscriptFailureHint::NetworkBlocked => {
                "Your IP is being blocked by YouTube (common on cloud hosting)."
            }
            TranscriptFailureHint::CloudHostingIp => {
                "You are using a cloud provider IP (e.g., AWS, GCP, Azure)."
            }
        }
    }
}

/// Renders the hint list for the `TranscriptUnavailable` message.
struct HintList;

impl fmt::Display for HintList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hint in TranscriptFailureHint::ALL {
            writeln!(f, "- {}", hint.description())?;
        }
        Ok(())
    }
}

/// Errors produced at the boundary of an external service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// Any failure of the transcript service, with the underlying error text.
    #[error(
        "Could not retrieve transcript. This may be due to:\n{}\nTechnical error: {detail}",
        HintList
    )]
    TranscriptUnavailable { detail: String },

    /// Transport, auth or quota failure of the chat-completion service.
    #[error("LLM request failed: {0}")]
    LlmRequestFailed(String),
}

impl PortError {
    pub fn transcript_unavailable(detail: impl fmt::Display) -> Self {
        PortError::TranscriptUnavailable {
            detail: detail.to_string(),
        }
    }

    pub fn llm_request_failed(detail: impl fmt::Display) -> Self {
        PortError::LlmRequestFailed(detail.to_string())
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Request Types
//=========================================================================================

/// A single chat-completion call: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TranscriptService: Send + Sync {
    /// Fetches the caption fragments of a video, in the order the service returns them.
    async fn fetch_fragments(&self, video_id: &VideoId) -> PortResult<Vec<CaptionFragment>>;

    /// Fetches the captions and joins them into one transcript.
    async fn fetch_transcript(&self, video_id: &VideoId) -> PortResult<Transcript> {
        let fragments = self.fetch_fragments(video_id).await?;
        Ok(Transcript::from_fragments(&fragments))
    }
}

#[async_trait]
pub trait ChatCompletionService: Send + Sync {
    /// Runs one completion and returns the text of the first generated message.
    async fn complete(&self, request: &CompletionRequest) -> PortResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_unavailable_lists_every_hint_and_the_detail() {
        let message = PortError::transcript_unavailable("TranscriptsDisabled").to_string();

        assert!(message.starts_with("Could not retrieve transcript."));
        for hint in TranscriptFailureHint::ALL {
            assert!(message.contains(hint.description()), "missing hint: {hint:?}");
        }
        assert!(message.ends_with("Technical error: TranscriptsDisabled"));
    }

    #[test]
    fn llm_failure_keeps_message_verbatim() {
        let err = PortError::llm_request_failed("insufficient_quota");
        assert_eq!(err.to_string(), "LLM request failed: insufficient_quota");
    }
}
