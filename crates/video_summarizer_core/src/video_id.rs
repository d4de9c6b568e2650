//! crates/video_summarizer_core/src/video_id.rs
//!
//! Extraction of a canonical video identifier from a user-supplied URL.

use url::Url;

use crate::domain::VideoId;

const SHORT_HOST: &str = "youtu.be";
const WATCH_HOSTS: [&str; 2] = ["youtube.com", "www.youtube.com"];

/// Extracts the video identifier from a YouTube URL.
///
/// Supports short links (`https://youtu.be/{id}`) and watch links
/// (`https://www.youtube.com/watch?v={id}`). Anything else, including input
/// that does not parse as an absolute URL, yields `None`.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;

    if host == SHORT_HOST {
        let path = parsed.path();
        let id = path.strip_prefix('/').unwrap_or(path);
        return VideoId::new(id);
    }

    if WATCH_HOSTS.contains(&host) {
        // blank values are skipped, matching form-decoding of the query string
        return parsed
            .query_pairs()
            .filter(|(key, value)| key == "v" && !value.is_empty())
            .find_map(|(_, value)| VideoId::new(value.into_owned()));
    }

    None
}
