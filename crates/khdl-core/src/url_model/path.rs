//! Last-path-segment extraction for album identifiers and title fallbacks.

/// Returns the last non-empty `/`-separated path segment of `url`.
///
/// Query string and fragment are ignored, as are trailing slashes. Works on
/// strings that are not well-formed URLs (no scheme, stray spaces), since
/// album addresses are only gated by a marker substring.
pub fn last_path_segment(url: &str) -> Option<String> {
    if let Ok(parsed) = url::Url::parse(url) {
        if !parsed.cannot_be_a_base() {
            return parsed
                .path()
                .split('/')
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string);
        }
    }

    let without_fragment = url.split('#').next().unwrap_or("");
    let without_query = without_fragment.split('?').next().unwrap_or("");
    without_query
        .split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            last_path_segment("https://downloads.khinsider.com/game-soundtracks/album/foo")
                .as_deref(),
            Some("foo")
        );
        assert_eq!(
            last_path_segment("https://vgm.example.com/soundtracks/foo/01%20Intro.mp3").as_deref(),
            Some("01%20Intro.mp3")
        );
    }

    #[test]
    fn trailing_slash_and_query() {
        assert_eq!(
            last_path_segment("https://example.com/album/bar/?page=2#top").as_deref(),
            Some("bar")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(last_path_segment("https://example.com/"), None);
        assert_eq!(last_path_segment(""), None);
    }

    #[test]
    fn not_a_url() {
        assert_eq!(
            last_path_segment("//downloads.khinsider.com/game-soundtracks/album/baz qux").as_deref(),
            Some("baz qux")
        );
    }
}
