use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use video_summarizer_core::{
    CaptionFragment, ChatCompletionService, CompletionRequest, PortError, PortResult,
    TranscriptService, VideoId,
};

#[derive(Clone)]
pub struct MockTranscriptService {
    pub text: String,
    pub fail_with: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranscriptService {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail_with: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            text: String::new(),
            fail_with: Some(msg.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl TranscriptService for MockTranscriptService {
    async fn fetch_fragments(&self, video_id: &VideoId) -> PortResult<Vec<CaptionFragment>> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(PortError::transcript_unavailable(msg));
        }
        Ok(vec![CaptionFragment {
            text: self.text.clone(),
            start_seconds: 0.0,
            duration_seconds: 1.0,
        }])
    }
}

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
            mock.replies.lock().unwrap().push_back(Ok(reply.to_string()));
        }
        mock
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
