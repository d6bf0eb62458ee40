use url::Url;

use crate::domain::blocks::{VideoBlock, non_empty};

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Canonical embed URL for a YouTube video, when one can be determined.
pub(crate) fn youtube_embed_url(video: &VideoBlock) -> Option<String> {
    if !video.is_youtube() {
        return None;
    }

    let id = match non_empty(&video.embed_id) {
        // An explicit id is authoritative; a malformed one means no embed.
        Some(id) => Some(id.trim().to_string()).filter(|id| is_video_id(id))?,
        None => youtube_id_from_url(&video.url)?,
    };

    Some(format!("{YOUTUBE_EMBED_BASE}{id}"))
}

/// Recover a video id from the common YouTube URL shapes.
fn youtube_id_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => {
            let mut segments = url.path_segments()?;
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("embed") | Some("shorts") | Some("live") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        }
        _ => None,
    }?;

    is_video_id(&candidate).then_some(candidate)
}

fn is_video_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}
