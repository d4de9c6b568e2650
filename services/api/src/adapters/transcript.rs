//! services/api/src/adapters/transcript.rs
//!
//! This module contains the adapter for YouTube's caption service.
//! It implements the `TranscriptService` port from the `core` crate.

use async_trait::async_trait;
use tracing::{error, info};
use video_summarizer_core::{
    domain::{CaptionFragment, VideoId},
    ports::{PortError, PortResult, TranscriptService},
};
use yt_transcript_rs::{
    api::YouTubeTranscriptApi,
    proxies::{GenericProxyConfig, ProxyConfig},
};

use crate::{config::ProxySettings, error::ApiError};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TranscriptService` using `yt-transcript-rs`.
pub struct YtTranscriptAdapter {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YtTranscriptAdapter {
    /// Creates a new `YtTranscriptAdapter`, routed through `proxy` when one is configured.
    pub fn new(proxy: &ProxySettings, languages: Vec<String>) -> Result<Self, ApiError> {
        let proxy_config: Option<Box<dyn ProxyConfig + Send + Sync>> = if proxy.is_empty() {
            None
        } else {
            info!("Routing transcript requests through the configured proxy.");
            let config = GenericProxyConfig::new(proxy.http.clone(), proxy.https.clone())
                .map_err(|e| ApiError::Internal(format!("Invalid transcript proxy: {e}")))?;
            Some(Box::new(config))
        };

        let api = YouTubeTranscriptApi::new(None, proxy_config, None).map_err(|e| {
            ApiError::Internal(format!("Failed to build transcript client: {e}"))
        })?;

        Ok(Self { api, languages })
    }
}

//=========================================================================================
// `TranscriptService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TranscriptService for YtTranscriptAdapter {
    /// Fetches the caption snippets for a video in the first available preferred language.
    async fn fetch_fragments(&self, video_id: &VideoId) -> PortResult<Vec<CaptionFragment>> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        // Every failure is reported the same way; the cause is only ever a hint.
        let transcript = self
            .api
            .fetch_transcript(video_id.as_str(), &languages, false)
            .await
            .map_err(|e| {
                error!(%video_id, error = %e, "Failed to fetch transcript");
                PortError::transcript_unavailable(e)
            })?;

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| CaptionFragment {
                text: snippet.text,
                start_seconds: snippet.start,
                duration_seconds: snippet.duration,
            })
            .collect())
    }
}
