//! Per-album mutable state: track counter, audio dedup set and tallies.

use std::collections::HashSet;
use std::ops::AddAssign;

use crate::storage::AlbumDir;
use crate::url_model::AlbumAddress;

/// Per-album tallies, reported when the album finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlbumReport {
    pub downloaded: usize,
    pub skipped: usize,
    /// Tracks dropped because their page had no usable `<audio>`.
    pub warned: usize,
    /// Track pages pointing at an audio URL already seen in this album.
    pub duplicates: usize,
    pub failed: usize,
}

impl AddAssign for AlbumReport {
    fn add_assign(&mut self, other: Self) {
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.warned += other.warned;
        self.duplicates += other.duplicates;
        self.failed += other.failed;
    }
}

/// State owned by one album run. Nothing here outlives the album.
#[derive(Debug)]
pub struct AlbumSession {
    pub album: AlbumAddress,
    pub dir: AlbumDir,
    next_number: u32,
    seen_audio: HashSet<String>,
    pub report: AlbumReport,
}

impl AlbumSession {
    pub fn new(album: AlbumAddress, dir: AlbumDir) -> Self {
        Self {
            album,
            dir,
            next_number: 1,
            seen_audio: HashSet::new(),
            report: AlbumReport::default(),
        }
    }

    /// Records `audio_url`; false if an earlier track already claimed it.
    pub fn first_sighting(&mut self, audio_url: &str) -> bool {
        self.seen_audio.insert(audio_url.to_string())
    }

    /// Hands out the next track number. Called only once a track has survived
    /// dedup and is about to be named.
    pub fn take_number(&mut self) -> u32 {
        let n = self.next_number;
        self.next_number += 1;
        n
    }
}
