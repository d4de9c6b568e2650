//! crates/video_summarizer_core/src/session.rs
//!
//! The per-session state: current summary, whether Q&A is active, and the
//! question/answer history. Mutations happen only through
//! [`crate::controller::InteractionController`].

use serde::Serialize;

use crate::domain::QaEntry;

/// Coarse view of where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No summary yet.
    Idle,
    /// A summary exists but Q&A was ended.
    Summarized,
    /// A summary exists and questions are accepted.
    QaActive,
}

/// The state for a single interactive session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    summary: Option<String>,
    qa_active: bool,
    history: Vec<QaEntry>,
    /// Model used for the current summary; follow-up questions reuse it.
    model: Option<String>,
}

impl SessionState {
    /// A fresh session: no summary, Q&A inactive, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn qa_active(&self) -> bool {
        self.qa_active
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// History in creation order.
    pub fn history(&self) -> &[QaEntry] {
        &self.history
    }

    /// History most recent first, the order the entries are usually displayed in.
    pub fn history_newest_first(&self) -> impl Iterator<Item = &QaEntry> {
        self.history.iter().rev()
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.summary.is_some(), self.qa_active) {
            (_, true) => SessionPhase::QaActive,
            (true, false) => SessionPhase::Summarized,
            (false, false) => SessionPhase::Idle,
        }
    }

    /// Whether a question may be answered right now.
    pub(crate) fn accepts_questions(&self) -> bool {
        self.qa_active && self.summary.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Overwrites the summary and activates Q&A. History is kept.
    pub(crate) fn apply_summary(&mut self, summary: String, model: String) {
        // an empty summary must not activate Q&A
        self.qa_active = !summary.is_empty();
        self.summary = Some(summary);
        self.model = Some(model);
    }

    pub(crate) fn record_answer(&mut self, entry: QaEntry) {
        debug_assert!(self.qa_active, "history only grows while Q&A is active");
        self.history.push(entry);
    }

    /// Deactivates Q&A and clears history. The summary stays.
    pub(crate) fn end_qa(&mut self) -> bool {
        if !self.qa_active {
            return false;
        }
        self.qa_active = false;
        self.history.clear();
        true
    }
}
