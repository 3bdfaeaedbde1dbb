//! Album crawler: album page markup to an ordered, deduplicated list of track links.

use crate::config::SiteConfig;
use crate::transport::{Transport, TransportError};
use crate::url_model::AlbumAddress;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

static ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Absolute URL of a track detail page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackLink(String);

impl TrackLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("could not fetch album page: {0}")]
    Transport(#[from] TransportError),
    #[error("no track links found")]
    NoLinksFound,
}

/// Fetches the album page and returns its track links in first-seen order.
pub fn crawl(
    transport: &dyn Transport,
    album: &AlbumAddress,
    site: &SiteConfig,
) -> Result<Vec<TrackLink>, CrawlError> {
    let page = transport.fetch(&album.encoded)?;
    let links = extract_track_links(&page.text(), site);
    tracing::debug!(album = %album.id, count = links.len(), "extracted track links");
    if links.is_empty() {
        return Err(CrawlError::NoLinksFound);
    }
    Ok(links)
}

/// Every `<a href>` ending in the audio extension (any case) and containing the
/// album path, made absolute against the site origin and deduplicated by exact
/// URL (first occurrence wins).
pub fn extract_track_links(html: &str, site: &SiteConfig) -> Vec<TrackLink> {
    let document = Html::parse_document(html);
    let extension = site.audio_extension.to_ascii_lowercase();

    let mut links = Vec::new();
    let mut seen = HashSet::new();
    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.to_ascii_lowercase().ends_with(&extension) || !href.contains(&site.album_path) {
            continue;
        }
        let absolute = absolutize(href, &site.base_url);
        if seen.insert(absolute.clone()) {
            links.push(TrackLink(absolute));
        }
    }
    links
}

fn absolutize(href: &str, base_url: &str) -> String {
    if url::Url::parse(href).is_ok() {
        return href.to_string();
    }
    match url::Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!("{}{}", base_url.trim_end_matches('/'), href),
    }
}
