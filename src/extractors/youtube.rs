use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

use super::captions::{parse_json3, translated_url, tracks_from_video_info};
use super::{select_track, Transcript, TranscriptError, TranscriptFetcher, VideoId};
use crate::Result;

/// YouTube caption fetcher using yt-dlp for track discovery
pub struct YoutubeTranscriptFetcher {
    yt_dlp_path: String,
    client: Client,
}

impl YoutubeTranscriptFetcher {
    pub fn new(yt_dlp_path: impl Into<String>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
            client: Client::new(),
        }
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> bool {
        Command::new(&self.yt_dlp_path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Get video information, including caption tracks, using yt-dlp
    async fn get_video_info(&self, video_id: &VideoId) -> Result<Value> {
        tracing::debug!("Listing caption tracks for: {}", video_id);

        let watch_url = video_id.watch_url();
        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--dump-json",
                "--skip-download",
                "--no-playlist",
                watch_url.as_str(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yt-dlp failed: {}", error.trim());
        }

        let json_str = String::from_utf8(output.stdout)?;
        let info: Value = serde_json::from_str(&json_str)?;

        Ok(info)
    }

    async fn download_captions(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to download captions: HTTP {}", response.status());
        }

        let payload = response.text().await?;
        parse_json3(&payload)
    }

    async fn fetch_transcript(&self, video_id: &VideoId) -> std::result::Result<Transcript, TranscriptError> {
        if !self.check_availability().await {
            return Err(TranscriptError::Fetch(
                "yt-dlp is not available. Please install it: https://github.com/yt-dlp/yt-dlp".to_string(),
            ));
        }

        let info = self.get_video_info(video_id).await.map_err(fetch_error)?;
        let tracks = tracks_from_video_info(&info);
        tracing::debug!("Found {} caption tracks", tracks.len());

        let choice = select_track(&tracks).ok_or(TranscriptError::NotAvailable)?;

        let url = if choice.translate {
            tracing::info!("No English captions, translating '{}' track", choice.track.language);
            translated_url(&choice.track.url).map_err(fetch_error)?
        } else {
            choice.track.url.clone()
        };

        let text = self.download_captions(&url).await.map_err(fetch_error)?;
        if text.is_empty() {
            return Err(TranscriptError::NotAvailable);
        }

        Ok(Transcript {
            video_id: video_id.clone(),
            language: choice.track.language.clone(),
            translated: choice.translate,
            text,
        })
    }
}

fn fetch_error(err: anyhow::Error) -> TranscriptError {
    TranscriptError::Fetch(format!("{:#}", err))
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    async fn fetch(&self, video_id: &VideoId) -> std::result::Result<Transcript, TranscriptError> {
        tracing::info!("Fetching transcript for video: {}", video_id);
        self.fetch_transcript(video_id).await
    }
}

impl Default for YoutubeTranscriptFetcher {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}
