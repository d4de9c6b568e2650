pub mod controller;
pub mod domain;
pub mod ports;
pub mod prompts;
pub mod session;
pub mod video_id;

pub use controller::{ActionError, AskOutcome, InteractionController, InvalidInput};
pub use domain::{CaptionFragment, QaEntry, Transcript, VideoId};
pub use ports::{
    ChatCompletionService, CompletionRequest, PortError, PortResult, TranscriptFailureHint,
    TranscriptService,
};
pub use prompts::{CompletionParams, SummaryPersona, DEFAULT_INSTRUCTION};
pub use session::{SessionPhase, SessionState};
pub use video_id::extract_video_id;
