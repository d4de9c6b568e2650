pub mod chat;
pub mod transcript;
