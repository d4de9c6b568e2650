use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use video_summarizer_core::{ChatCompletionService, CompletionRequest, PortError, PortResult};

/// Replies with queued responses in order; an `Err` entry simulates a failed call.
#[derive(Clone, Default)]
pub struct MockChatService {
    pub replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    pub calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockChatService {
    pub fn new(replies: &[&str]) -> Self {
        let mock = Self::default();
        for reply in replies {
            mock.push_reply(reply);
        }
        mock
    }

    pub fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn push_failure(&self, msg: &str) {
        self.replies.lock().unwrap().push_back(Err(msg.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatCompletionService for MockChatService {
    async fn complete(&self, request: &CompletionRequest) -> PortResult<String> {
        self.calls.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(msg)) => Err(PortError::llm_request_failed(msg)),
            None => Err(PortError::llm_request_failed("no reply queued")),
        }
    }
}
