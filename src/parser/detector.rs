use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use super::{errors::ParseError, models::VideoLocator};

lazy_static! {
    static ref VIDEO_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();
}

// 路径形如 /shorts/<id> 的前缀
const PATH_PREFIXES: &[&str] = &["shorts", "embed", "live", "v", "e"];

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

pub fn detect_video_locator(input: &str) -> Result<VideoLocator, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::InvalidUrl(input.to_string()));
    }

    // 优先处理URL解析
    if let Some(url) = parse_url(input) {
        return locator_from_url(&url, input);
    }
    detect_raw_id(input)
}

fn parse_url(input: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(input) {
        if matches!(url.scheme(), "http" | "https") {
            return Some(url);
        }
        return None;
    }
    // 没有协议头的链接，如 youtu.be/xxxx
    if input.contains('/') || input.contains('.') {
        return Url::parse(&format!("https://{}", input)).ok();
    }
    None
}

fn locator_from_url(url: &Url, raw: &str) -> Result<VideoLocator, ParseError> {
    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| ParseError::InvalidUrl(raw.to_string()))?;

    let segments = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();

    let candidate = if host == "youtu.be" || host == "www.youtu.be" {
        segments.first().map(|id| id.to_string())
    } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
        match segments.as_slice() {
            ["watch"] => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            [prefix, id, ..] if PATH_PREFIXES.contains(prefix) => Some(id.to_string()),
            _ => None,
        }
    } else {
        None
    };

    match candidate {
        Some(id) if VIDEO_ID.is_match(&id) => Ok(VideoLocator { video_id: id }),
        _ => Err(ParseError::InvalidUrl(raw.to_string())),
    }
}

fn detect_raw_id(id: &str) -> Result<VideoLocator, ParseError> {
    if VIDEO_ID.is_match(id) {
        Ok(VideoLocator {
            video_id: id.to_string(),
        })
    } else {
        Err(ParseError::InvalidVideoId(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn accepts_common_url_shapes() {
        let inputs = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42",
            "http://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://music.youtube.com/watch?v=dQw4w9WgXcQ&list=RD",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ?feature=share",
            "  dQw4w9WgXcQ  ",
        ];
        for input in inputs {
            let locator = detect_video_locator(input).unwrap();
            assert_eq!(locator.video_id, ID, "input: {input}");
        }
    }

    #[test]
    fn rejects_malformed_locators() {
        let inputs = [
            "",
            "not a url",
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/watch",
            "https://vimeo.com/123456789",
            "https://www.youtube.com/channel/UC1234567890",
            "ftp://youtube.com/watch?v=dQw4w9WgXcQ",
            "dQw4w9WgXc!",
        ];
        for input in inputs {
            assert!(detect_video_locator(input).is_err(), "input: {input}");
        }
    }

    #[test]
    fn canonical_watch_url() {
        let locator = detect_video_locator("youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(
            locator.watch_url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}
