//! Album pipeline orchestrator.
//!
//! One input line at a time: validate → crawl → for each track link
//! (resolve → dedup by audio URL → name → decide → fetch or skip).
//! Strictly sequential; a failure on a line, album or track is reported and
//! the run moves on.

mod session;
mod track;


pub use session::{AlbumReport, AlbumSession};
pub use track::{TrackError, TrackOutcome};

use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::crawler::{self, CrawlError};
use crate::status::{StatusSink, StatusTag};
use crate::storage::AlbumDir;
use crate::transport::Transport;
use crate::url_model::{self, Rejected};

/// How one input line ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumOutcome {
    /// Line was blank or not an album address.
    Invalid(Rejected),
    /// Album page unreachable, had no tracks, or its directory could not be made.
    Skipped,
    Completed(AlbumReport),
}

/// Totals over all input lines of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub invalid_lines: usize,
    pub albums_skipped: usize,
    pub albums_completed: usize,
    pub tracks: AlbumReport,
}

impl RunSummary {
    fn record(&mut self, outcome: &AlbumOutcome) {
        match outcome {
            AlbumOutcome::Invalid(_) => self.invalid_lines += 1,
            AlbumOutcome::Skipped => self.albums_skipped += 1,
            AlbumOutcome::Completed(report) => {
                self.albums_completed += 1;
                self.tracks += *report;
            }
        }
    }
}

/// Runs albums against a transport, writing under `download_dir` and
/// reporting status lines to `sink`.
pub struct Pipeline<'a, S> {
    transport: &'a dyn Transport,
    site: SiteConfig,
    download_dir: PathBuf,
    sink: S,
}

impl<'a, S: StatusSink> Pipeline<'a, S> {
    pub fn new(
        transport: &'a dyn Transport,
        site: SiteConfig,
        download_dir: impl Into<PathBuf>,
        sink: S,
    ) -> Self {
        Self {
            transport,
            site,
            download_dir: download_dir.into(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self, tag: StatusTag, message: impl AsRef<str>) {
        self.sink.emit(tag, message.as_ref());
    }

    /// Processes every line in order.
    pub fn run_inputs<I, L>(&mut self, lines: I) -> RunSummary
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut summary = RunSummary::default();
        for line in lines {
            let outcome = self.run_album(line.as_ref());
            summary.record(&outcome);
        }
        tracing::info!(?summary, "run finished");
        summary
    }

    /// Processes one album from a raw input line.
    pub fn run_album(&mut self, raw: &str) -> AlbumOutcome {
        let album = match url_model::validate(raw, &self.site) {
            Ok(album) => album,
            Err(reason) => {
                let shown = match reason {
                    Rejected::Empty => "(empty line)".to_string(),
                    _ => raw.trim().to_string(),
                };
                tracing::debug!(%reason, input = raw.trim(), "rejected input line");
                self.emit(StatusTag::Error, format!("Invalid url: {shown}"));
                return AlbumOutcome::Invalid(reason);
            }
        };

        self.emit(StatusTag::Info, format!("Url found: {}", album.url));

        let dir = match AlbumDir::prepare(&self.download_dir, &album.id) {
            Ok(dir) => dir,
            Err(e) => {
                self.emit(StatusTag::Error, e.to_string());
                return AlbumOutcome::Skipped;
            }
        };

        self.emit(StatusTag::Info, "crawling for links...");
        let links = match crawler::crawl(self.transport, &album, &self.site) {
            Ok(links) => links,
            Err(CrawlError::NoLinksFound) => {
                self.emit(StatusTag::Error, "Could not find any songs on page.");
                return AlbumOutcome::Skipped;
            }
            Err(e) => {
                self.emit(
                    StatusTag::Error,
                    format!("Failed to crawl {}: {}", album.url, e),
                );
                return AlbumOutcome::Skipped;
            }
        };
        self.emit(StatusTag::Info, format!("{} links acquired", links.len()));

        let mut session = AlbumSession::new(album, dir);
        for link in &links {
            match self.process_track(&mut session, link) {
                Ok(outcome) => {
                    tracing::debug!(link = %link, ?outcome, "track finished");
                }
                Err(e) => {
                    session.report.failed += 1;
                    self.emit(
                        StatusTag::Error,
                        format!("Failed to download from {link}: {e}"),
                    );
                }
            }
        }

        let report = session.report;
        self.emit(
            StatusTag::Info,
            format!(
                "{}: {} downloaded, {} skipped, {} without audio, {} failed",
                session.album.id, report.downloaded, report.skipped, report.warned, report.failed
            ),
        );
        AlbumOutcome::Completed(report)
    }
}
