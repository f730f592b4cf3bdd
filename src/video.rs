use std::sync::LazyLock;

use regex::Regex;

// One pattern covers every accepted link shape: standard watch URLs (with or
// without extra query params), youtu.be short links, shorts, live, embed,
// and mobile hosts. The capture is always the 11-character video id.
static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|m\.)?(?:youtu\.be/|youtube\.com/(?:embed/|v/|watch\?v=|watch\?.+&v=|shorts/|live/))([\w-]{11})(?:[?&].*)?$",
    )
    .expect("video url pattern compiles")
});

/// Extract the 11-character video id from a pasted link, or None if the
/// input is not a recognizable video URL.
pub fn video_id(url: &str) -> Option<String> {
    VIDEO_URL
        .captures(url.trim())
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_all_supported_shapes_yield_same_id() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc123",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
        ];
        for url in urls {
            assert_eq!(video_id(url).as_deref(), Some(ID), "failed for {url}");
        }
    }

    #[test]
    fn test_invalid_inputs_return_none() {
        let bad = [
            "",
            "not a url",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=tooshort",
            "https://www.youtube.com/playlist?list=PL12345",
        ];
        for url in bad {
            assert_eq!(video_id(url), None, "accepted {url}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(
            video_id("  https://youtu.be/dQw4w9WgXcQ \n").as_deref(),
            Some(ID)
        );
    }
}
