use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use video_summarizer_core::{CaptionFragment, PortError, PortResult, TranscriptService, VideoId};

#[derive(Clone)]
pub struct MockTranscriptService {
    pub fragments: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriptService {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fragments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
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
        Ok(self
            .fragments
            .iter()
            .enumerate()
            .map(|(i, text)| CaptionFragment {
                text: text.clone(),
                start_seconds: i as f64,
                duration_seconds: 1.0,
            })
            .collect())
    }
}
