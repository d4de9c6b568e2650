//! crates/video_summarizer_core/src/prompts.rs
//!
//! Builders for the two chat payloads: summarizing a transcript and answering
//! a question about a stored summary.

use std::str::FromStr;

use crate::domain::Transcript;
use crate::ports::CompletionRequest;

const CONCISE_SUMMARY_PERSONA: &str =
    "You are a helpful assistant that summarizes video transcripts.";

const STRUCTURED_SUMMARY_PERSONA: &str = "Watch the following YouTube video. Based on its content, \
generate a structured summary for educational and knowledge purposes. Break it down into: \
Objective, Required Tools/Inputs (if any), Key Steps or Concepts, Sub-tasks or Techniques \
(if applicable), Dependencies or Prerequisites, Potential Pitfalls or Common Mistakes. \
Make the summary clear, concise, and easy to follow, ideal for someone trying to learn \
or apply the knowledge.";

const ANSWER_PERSONA: &str =
    "You are an assistant that answers questions based on video summaries.";

/// Instruction used when the user leaves the prompt field untouched.
pub const DEFAULT_INSTRUCTION: &str = "Summarize this video for a blog post.";

/// Sampling parameters fixed per call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionParams {
    pub const SUMMARY: CompletionParams = CompletionParams {
        temperature: 0.5,
        max_tokens: 800,
    };

    pub const ANSWER: CompletionParams = CompletionParams {
        temperature: 0.5,
        max_tokens: 400,
    };
}

/// The system persona used for summaries. Fixed once per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryPersona {
    /// A plain summarizing assistant.
    #[default]
    Concise,
    /// An outline of objective, inputs, key steps, sub-tasks, dependencies and pitfalls.
    Structured,
}

impl SummaryPersona {
    pub fn system_message(self) -> &'static str {
        match self {
            SummaryPersona::Concise => CONCISE_SUMMARY_PERSONA,
            SummaryPersona::Structured => STRUCTURED_SUMMARY_PERSONA,
        }
    }
}

impl FromStr for SummaryPersona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concise" => Ok(SummaryPersona::Concise),
            "structured" => Ok(SummaryPersona::Structured),
            other => Err(format!(
                "'{other}' is not a summary persona (expected 'concise' or 'structured')"
            )),
        }
    }
}

/// A system/user message pair ready to be sent to the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

impl ChatPrompt {
    /// Attaches a model and sampling parameters to produce a request.
    pub fn into_request(self, model: &str, params: CompletionParams) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            system: self.system,
            user: self.user,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

pub fn build_summary_prompt(
    persona: SummaryPersona,
    instruction: &str,
    transcript: &Transcript,
) -> ChatPrompt {
    let user = format!(
        "{instruction}\n\n\
         Here is the transcript of the video:\n{transcript}\n\n\
         Generate a compact, descriptive summary with key points.",
        transcript = transcript.as_str()
    );

    ChatPrompt {
        system: persona.system_message().to_string(),
        user,
    }
}

pub fn build_answer_prompt(summary: &str, question: &str) -> ChatPrompt {
    let user = format!(
        "Based on the following summary of a YouTube video, answer the question:\n\n\
         Summary: {summary}\n\n\
         Question: {question}\n\
         Answer clearly and concisely."
    );

    ChatPrompt {
        system: ANSWER_PERSONA.to_string(),
        user,
    }
}
