//! crates/video_summarizer_core/src/controller.rs
//!
//! Orchestrates the three user actions (generate a summary, ask a question,
//! end the Q&A session) against a [`SessionState`].
//!
//! Every action is all-or-nothing: external calls happen first and the state
//! is only touched once all of them have succeeded.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    domain::QaEntry,
    ports::{ChatCompletionService, PortError, TranscriptService},
    prompts::{build_answer_prompt, build_summary_prompt, CompletionParams, SummaryPersona},
    session::SessionState,
    video_id::extract_video_id,
};

//=========================================================================================
// Action Errors and Outcomes
//=========================================================================================

/// User input rejected before any external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("Please enter a YouTube video URL.")]
    EmptyUrl,
    #[error("Invalid YouTube URL format.")]
    MalformedUrl,
}

/// Why a user action failed. The session stays usable after any of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    Port(#[from] PortError),
}

/// The result of submitting a question.
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// The question was answered and appended to the history.
    Answered(QaEntry),
    /// The question was blank; nothing happened.
    IgnoredBlank,
    /// Q&A is not active for this session; nothing happened.
    Inactive,
}

//=========================================================================================
// The Controller
//=========================================================================================

/// Drives a session through its transitions using the injected service ports.
///
/// Holds no per-session data, so one controller can serve any number of
/// sessions, each with its own `SessionState`.
#[derive(Clone)]
pub struct InteractionController {
    transcripts: Arc<dyn TranscriptService>,
    llm: Arc<dyn ChatCompletionService>,
    persona: SummaryPersona,
}

impl InteractionController {
    pub fn new(
        transcripts: Arc<dyn TranscriptService>,
        llm: Arc<dyn ChatCompletionService>,
        persona: SummaryPersona,
    ) -> Self {
        Self {
            transcripts,
            llm,
            persona,
        }
    }

    pub fn persona(&self) -> SummaryPersona {
        self.persona
    }

    /// Fetches the transcript behind `url` and summarizes it with `model`.
    ///
    /// On success the summary replaces any previous one and Q&A becomes active.
    /// Existing history is left alone until the user ends the session.
    pub async fn generate_summary(
        &self,
        state: &mut SessionState,
        url: &str,
        instruction: &str,
        model: &str,
    ) -> Result<String, ActionError> {
        if url.trim().is_empty() {
            warn!("Summary requested without a URL.");
            return Err(InvalidInput::EmptyUrl.into());
        }

        let video_id = extract_video_id(url).ok_or_else(|| {
            warn!(url, "Could not extract a video id.");
            InvalidInput::MalformedUrl
        })?;
        info!(%video_id, model, "Fetching transcript and generating summary.");

        let transcript = self.transcripts.fetch_transcript(&video_id).await?;
        info!(%video_id, chars = transcript.as_str().len(), "Transcript fetched.");

        let request = build_summary_prompt(self.persona, instruction, &transcript)
            .into_request(model, CompletionParams::SUMMARY);
        let summary = self.llm.complete(&request).await?;

        state.apply_summary(summary.clone(), model.to_string());
        info!(%video_id, "Summary generated; Q&A is active.");

        Ok(summary)
    }

    /// Answers `question` from the stored summary.
    ///
    /// Uses `model` when given, otherwise the model that produced the summary.
    pub async fn ask_question(
        &self,
        state: &mut SessionState,
        question: &str,
        model: Option<&str>,
    ) -> Result<AskOutcome, ActionError> {
        if !state.accepts_questions() {
            warn!("Question submitted while Q&A is inactive; ignoring.");
            return Ok(AskOutcome::Inactive);
        }
        if question.trim().is_empty() {
            return Ok(AskOutcome::IgnoredBlank);
        }

        let (Some(summary), Some(model)) = (state.summary(), model.or(state.model())) else {
            return Ok(AskOutcome::Inactive);
        };

        let request =
            build_answer_prompt(summary, question).into_request(model, CompletionParams::ANSWER);
        let answer = self.llm.complete(&request).await?;

        let entry = QaEntry::new(question, answer);
        state.record_answer(entry.clone());
        info!(entries = state.history().len(), "Question answered.");

        Ok(AskOutcome::Answered(entry))
    }

    /// Ends Q&A: deactivates it and clears the history, keeping the summary.
    ///
    /// Returns `false` (and changes nothing) when Q&A was not active.
    pub fn end_session(&self, state: &mut SessionState) -> bool {
        let ended = state.end_qa();
        if ended {
            info!("Question & Answer session ended.");
        } else {
            warn!("End requested while Q&A is inactive; ignoring.");
        }
        ended
    }
}
