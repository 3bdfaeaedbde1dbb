//! Album address validation and name derivation.
//!
//! Validates raw input lines into album addresses, percent-encodes addresses
//! for the transport, and turns noisy page titles into safe file names.

mod encode;
mod path;
mod sanitize;
mod title;

pub use encode::encode_for_transport;
pub use path::last_path_segment;
pub use sanitize::{sanitize_for_filesystem, MAX_NAME_CHARS};
pub use title::clean_title;

use crate::config::SiteConfig;
use thiserror::Error;

/// Why an input line was not accepted as an album address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("empty")]
    Empty,
    #[error("not an album address")]
    NotAnAlbum,
    /// Marker present but nothing usable after it to name the output directory.
    #[error("missing album identifier")]
    MissingIdentifier,
}

/// A validated album page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumAddress {
    /// Trimmed input, as the user gave it.
    pub url: String,
    /// Transport-safe form of `url`.
    pub encoded: String,
    /// Last path segment after the album marker, sanitized; names both the album
    /// and its output directory.
    pub id: String,
}

/// Validates a raw input line.
///
/// The marker-substring check is the only structural gate: no scheme or host
/// parsing is done on the input.
pub fn validate(raw: &str, site: &SiteConfig) -> Result<AlbumAddress, Rejected> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(Rejected::Empty);
    }
    let Some((_, after_marker)) = url.split_once(site.album_marker.as_str()) else {
        return Err(Rejected::NotAnAlbum);
    };

    let id = last_path_segment(after_marker)
        .map(|s| sanitize_for_filesystem(&s))
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .ok_or(Rejected::MissingIdentifier)?;

    Ok(AlbumAddress {
        url: url.to_string(),
        encoded: encode_for_transport(url),
        id,
    })
}
