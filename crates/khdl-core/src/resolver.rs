//! Track resolver: track page markup to a direct audio URL and a raw display title.

use crate::crawler::TrackLink;
use crate::transport::{Transport, TransportError};
use crate::url_model::{encode_for_transport, last_path_segment};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;

static AUDIO: Lazy<Selector> =
    Lazy::new(|| Selector::parse("audio").expect("valid audio selector"));
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// A track page resolved to its audio stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub link: TrackLink,
    pub audio_url: String,
    pub raw_title: String,
}

/// What the track page markup yields before the title fallback is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPage {
    pub audio_src: String,
    /// Text of the first `<title>`, if the page has one (possibly empty).
    pub title: Option<String>,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Page has no `<audio>` element.
    #[error("no audio found")]
    MissingAudio,
    /// `<audio>` exists but its `src` is absent or empty.
    #[error("missing mp3 src")]
    MissingSource,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Fetches one track page and extracts its audio URL and title.
pub fn resolve(transport: &dyn Transport, link: &TrackLink) -> Result<ResolvedTrack, ResolveError> {
    let page = transport.fetch(&encode_for_transport(link.as_str()))?;
    let TrackPage { audio_src, title } = extract_track_page(&page.text())?;
    let audio_url = absolutize_source(&audio_src, link.as_str());
    let raw_title = title.unwrap_or_else(|| last_path_segment(&audio_url).unwrap_or_default());
    Ok(ResolvedTrack {
        link: link.clone(),
        audio_url,
        raw_title,
    })
}

/// Reads the first `<audio src>` and the first `<title>` text.
pub fn extract_track_page(html: &str) -> Result<TrackPage, ResolveError> {
    let document = Html::parse_document(html);
    let audio = document.select(&AUDIO).next().ok_or(ResolveError::MissingAudio)?;
    let audio_src = audio
        .value()
        .attr("src")
        .filter(|s| !s.is_empty())
        .ok_or(ResolveError::MissingSource)?
        .to_string();
    let title = document
        .select(&TITLE)
        .next()
        .map(|t| t.text().collect::<String>());
    Ok(TrackPage { audio_src, title })
}

/// The site embeds absolute stream URLs; relative ones are joined against the track page.
fn absolutize_source(src: &str, page_url: &str) -> String {
    if url::Url::parse(src).is_ok() {
        return src.to_string();
    }
    url::Url::parse(page_url)
        .and_then(|page| page.join(src))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| src.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_audio_source_and_title() {
        let page = extract_track_page(
            r#"<html><head><title>Main Theme MP3 - Foo OST</title></head>
               <body><audio id="audio" src="https://vgm.example.com/foo/01%20Main%20Theme.mp3" controls></audio></body></html>"#,
        )
        .unwrap();
        assert_eq!(page.audio_src, "https://vgm.example.com/foo/01%20Main%20Theme.mp3");
        assert_eq!(page.title.as_deref(), Some("Main Theme MP3 - Foo OST"));
    }

    #[test]
    fn missing_audio_element() {
        let err = extract_track_page("<html><title>x</title></html>").unwrap_err();
        assert!(matches!(err, ResolveError::MissingAudio));
    }

    #[test]
    fn audio_without_source() {
        let err = extract_track_page("<audio controls></audio>").unwrap_err();
        assert!(matches!(err, ResolveError::MissingSource));
        let err = extract_track_page(r#"<audio src=""></audio>"#).unwrap_err();
        assert!(matches!(err, ResolveError::MissingSource));
    }

    #[test]
    fn page_without_title() {
        let page = extract_track_page(r#"<audio src="https://cdn.example.com/a/07%20Boss.mp3"></audio>"#)
            .unwrap();
        assert_eq!(page.title, None);
    }

    #[test]
    fn relative_source_joined_to_page() {
        assert_eq!(
            absolutize_source("/media/1.mp3", "https://downloads.khinsider.com/game-soundtracks/album/x/1.mp3"),
            "https://downloads.khinsider.com/media/1.mp3"
        );
        assert_eq!(
            absolutize_source("https://cdn.example.com/1.mp3", "https://other.example.com/"),
            "https://cdn.example.com/1.mp3"
        );
    }
}
