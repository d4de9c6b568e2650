//! crates/video_summarizer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any external service or serialization format.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A canonical video identifier extracted from a user-supplied URL.
///
/// Always non-empty; see [`crate::video_id::extract_video_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Wraps a raw identifier. Returns `None` for an empty token.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timed snippet of transcribed speech returned by the transcript service.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionFragment {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

/// The full caption text of a video, fragments joined in service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    /// Joins fragment texts with a single space. No other normalization.
    pub fn from_fragments(fragments: &[CaptionFragment]) -> Self {
        let text = fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Transcript {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Represents a single question-and-answer exchange within a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl QaEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        }
    }
}
