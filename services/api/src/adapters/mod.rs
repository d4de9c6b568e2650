pub mod chat_llm;
pub mod transcript;

pub use chat_llm::OpenAiChatAdapter;
pub use transcript::YtTranscriptAdapter;
