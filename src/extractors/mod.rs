use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod captions;
pub mod youtube;

/// URL shapes a video identifier is recognized in, tried in order
static VIDEO_ID_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([\w-]{11})")
            .expect("watch URL pattern is valid"),
        Regex::new(r"(?:https?://)?(?:www\.)?youtube\.com/embed/([\w-]{11})")
            .expect("embed URL pattern is valid"),
    ]
});

/// Language every transcript is delivered in
pub const TARGET_LANGUAGE: &str = "en";

/// Eleven-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video identifier from a YouTube URL.
///
/// Returns `None` when no recognized URL shape is present; malformed input is
/// not an error.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|captures| captures.get(1))
        .map(|id| VideoId(id.as_str().to_string()))
}

/// Caption text of one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,

    /// Language code of the caption track the text came from
    pub language: String,

    /// Whether the text was machine-translated into English
    pub translated: bool,

    pub text: String,
}

impl Transcript {
    pub fn word_count(&self) -> usize {
        crate::utils::word_count(&self.text)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("No transcript available.")]
    NotAvailable,

    #[error("Error: {0}")]
    Fetch(String),
}

/// One caption track offered for a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub language: String,

    /// Speech-recognition track rather than uploaded subtitles
    pub generated: bool,

    /// URL of the track in json3 format
    pub url: String,
}

impl CaptionTrack {
    pub fn is_english(&self) -> bool {
        let lang = self.language.to_lowercase();
        lang == TARGET_LANGUAGE || lang.starts_with("en-")
    }
}

/// Which track to download and whether it must be translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackChoice<'a> {
    pub track: &'a CaptionTrack,
    pub translate: bool,
}

/// Prefer an English track; otherwise take the first one and translate it
pub fn select_track(tracks: &[CaptionTrack]) -> Option<TrackChoice<'_>> {
    if let Some(track) = tracks.iter().find(|t| t.is_english()) {
        return Some(TrackChoice { track, translate: false });
    }

    tracks.first().map(|track| TrackChoice { track, translate: true })
}

/// Source of caption transcripts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the transcript of a video, in English
    async fn fetch(&self, video_id: &VideoId) -> std::result::Result<Transcript, TranscriptError>;
}

#[cfg(test)]
pub(crate) fn test_video_id(id: &str) -> VideoId {
    VideoId(id.to_string())
}
