use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{CaptionTrack, TARGET_LANGUAGE};

/// yt-dlp marks the original-language speech recognition track with this suffix
const ORIGINAL_TRACK_SUFFIX: &str = "-orig";

/// YouTube json3 caption payload
#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Collect caption tracks from yt-dlp's `--dump-json` output.
///
/// Uploaded subtitles come first, followed by the original-language speech
/// recognition tracks. Tracks without a json3 rendition are skipped.
pub fn tracks_from_video_info(info: &Value) -> Vec<CaptionTrack> {
    let mut tracks = Vec::new();

    if let Some(subtitles) = info["subtitles"].as_object() {
        for (language, formats) in subtitles {
            if let Some(url) = json3_url(formats) {
                tracks.push(CaptionTrack {
                    language: language.clone(),
                    generated: false,
                    url,
                });
            }
        }
    }

    if let Some(automatic) = info["automatic_captions"].as_object() {
        for (language, formats) in automatic {
            let Some(language) = language.strip_suffix(ORIGINAL_TRACK_SUFFIX) else {
                continue;
            };
            if let Some(url) = json3_url(formats) {
                tracks.push(CaptionTrack {
                    language: language.to_string(),
                    generated: true,
                    url,
                });
            }
        }
    }

    tracks
}

fn json3_url(formats: &Value) -> Option<String> {
    formats
        .as_array()?
        .iter()
        .find(|format| format["ext"].as_str() == Some("json3"))
        .and_then(|format| format["url"].as_str())
        .map(|url| url.to_string())
}

/// Rewrite a caption URL so YouTube machine-translates it to English
pub fn translated_url(track_url: &str) -> Result<String> {
    let mut url = Url::parse(track_url)
        .with_context(|| format!("Invalid caption URL: {}", track_url))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "tlang")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("tlang", TARGET_LANGUAGE);

    Ok(url.to_string())
}

/// Join the text of a json3 caption payload into one block
pub fn parse_json3(payload: &str) -> Result<String> {
    let captions: Json3Captions = serde_json::from_str(payload)
        .context("Failed to parse caption payload")?;

    let fragments: Vec<String> = captions
        .events
        .iter()
        .map(|event| {
            event
                .segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
        })
        .map(|fragment| fragment.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|fragment| !fragment.is_empty())
        .collect();

    Ok(fragments.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tracks_from_video_info() {
        let info = json!({
            "subtitles": {
                "de": [
                    {"ext": "vtt", "url": "https://yt.test/de.vtt"},
                    {"ext": "json3", "url": "https://yt.test/de.json3"}
                ],
                "live_chat": [{"ext": "json", "url": "https://yt.test/chat"}]
            },
            "automatic_captions": {
                "en": [{"ext": "json3", "url": "https://yt.test/auto-en"}],
                "fr-orig": [{"ext": "json3", "url": "https://yt.test/fr-orig"}]
            }
        });

        let tracks = tracks_from_video_info(&info);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language, "de");
        assert!(!tracks[0].generated);
        assert_eq!(tracks[0].url, "https://yt.test/de.json3");
        assert_eq!(tracks[1].language, "fr");
        assert!(tracks[1].generated);
    }

    #[test]
    fn test_tracks_keep_listing_order() {
        let info: Value = serde_json::from_str(
            r#"{"subtitles": {
                "pt": [{"ext": "json3", "url": "https://yt.test/pt.json3"}],
                "de": [{"ext": "json3", "url": "https://yt.test/de.json3"}]
            }}"#,
        )
        .unwrap();

        let tracks = tracks_from_video_info(&info);
        let languages: Vec<&str> = tracks.iter().map(|t| t.language.as_str()).collect();
        assert_eq!(languages, vec!["pt", "de"]);

        let choice = crate::extractors::select_track(&tracks).unwrap();
        assert_eq!(choice.track.language, "pt");
        assert!(choice.translate);
    }

    #[test]
    fn test_tracks_from_video_without_captions() {
        assert!(tracks_from_video_info(&json!({"title": "silent"})).is_empty());
        assert!(tracks_from_video_info(&json!({"subtitles": {}, "automatic_captions": null})).is_empty());
    }

    #[test]
    fn test_translated_url_replaces_language() {
        let url = translated_url("https://www.youtube.com/api/timedtext?v=abc&lang=de&fmt=json3&tlang=fr").unwrap();
        assert!(url.contains("lang=de"));
        assert!(url.contains("tlang=en"));
        assert!(!url.contains("tlang=fr"));

        assert!(translated_url("not a url").is_err());
    }

    #[test]
    fn test_parse_json3_joins_fragments() {
        let payload = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "hello "}, {"utf8": "world"}]},
                {"tStartMs": 900, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 1000},
                {"tStartMs": 1200, "segs": [{"utf8": "second\nline"}]}
            ]
        }"#;

        assert_eq!(parse_json3(payload).unwrap(), "hello world second line");
    }

    #[test]
    fn test_parse_json3_rejects_garbage() {
        assert!(parse_json3("<transcript/>").is_err());
        assert_eq!(parse_json3("{}").unwrap(), "");
    }
}
