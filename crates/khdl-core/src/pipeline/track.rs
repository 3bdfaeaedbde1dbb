//! One track: resolve, dedup, name, decide, then fetch or skip.

use thiserror::Error;

use super::{AlbumSession, Pipeline};
use crate::crawler::TrackLink;
use crate::decision::{self, megabytes, DownloadDecision};
use crate::resolver::{self, ResolveError};
use crate::status::{StatusSink, StatusTag};
use crate::storage::{fallback_title, track_file_name, StorageError};
use crate::transport::{Response, TransportError};
use crate::url_model::{clean_title, encode_for_transport, sanitize_for_filesystem};

/// Track-level failure; reported and the album continues.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Downloaded { file_name: String, bytes: u64 },
    Skipped { file_name: String },
    /// Track page had no usable `<audio>`; a warning was emitted.
    Warned,
    /// Audio URL already claimed by an earlier track in this album.
    Duplicate,
}

impl<S: StatusSink> Pipeline<'_, S> {
    pub(super) fn process_track(
        &mut self,
        session: &mut AlbumSession,
        link: &TrackLink,
    ) -> Result<TrackOutcome, TrackError> {
        let track = match resolver::resolve(self.transport, link) {
            Ok(track) => track,
            Err(ResolveError::MissingAudio) => {
                session.report.warned += 1;
                self.emit(StatusTag::Warn, format!("No audio found for: {link}"));
                return Ok(TrackOutcome::Warned);
            }
            Err(ResolveError::MissingSource) => {
                session.report.warned += 1;
                self.emit(StatusTag::Warn, format!("Missing mp3 src for: {link}"));
                return Ok(TrackOutcome::Warned);
            }
            Err(ResolveError::Transport(e)) => return Err(e.into()),
        };

        if !session.first_sighting(&track.audio_url) {
            session.report.duplicates += 1;
            tracing::debug!(link = %link, audio = %track.audio_url, "duplicate audio url, dropped");
            return Ok(TrackOutcome::Duplicate);
        }

        let number = session.take_number();
        let mut title = sanitize_for_filesystem(&clean_title(&track.raw_title));
        if title.is_empty() {
            title = fallback_title(number);
        }
        let file_name = track_file_name(number, &title);

        let audio_url = encode_for_transport(&track.audio_url);
        let existing = session.dir.existing_len(&file_name)?;

        // Only an existing file needs the remote size up front; a HEAD keeps a
        // skip from pulling the body. The GET's declared length is the
        // authority when HEAD fails or declares nothing.
        let mut prefetched: Option<Response> = None;
        if let Some(existing_bytes) = existing {
            let declared = match self.transport.probe(&audio_url) {
                Ok(headers) => headers.content_length,
                Err(e) => {
                    tracing::debug!(url = %audio_url, "HEAD failed ({}), falling back to GET", e);
                    None
                }
            };
            let expected = match declared {
                Some(len) => len,
                None => {
                    let response = self.transport.fetch(&audio_url)?;
                    let len = response.headers.content_length.unwrap_or(0);
                    prefetched = Some(response);
                    len
                }
            };
            if decision::decide(expected, Some(existing_bytes)) == DownloadDecision::Skip {
                session.report.skipped += 1;
                self.emit(
                    StatusTag::Skipping,
                    format!("\"{file_name}\" already downloaded."),
                );
                return Ok(TrackOutcome::Skipped { file_name });
            }
        }

        let response = match prefetched {
            Some(response) => response,
            None => self.transport.fetch(&audio_url)?,
        };
        tracing::debug!(
            url = %audio_url,
            status = response.status,
            content_type = ?response.headers.content_type,
            "audio response"
        );
        let expected = response.headers.content_length.unwrap_or(0);
        self.emit(
            StatusTag::Downloading,
            format!("{file_name} [{:.2}MB]", megabytes(expected)),
        );
        session.dir.write_track(&file_name, &response.body)?;
        session.report.downloaded += 1;
        self.emit(StatusTag::Done, format!("\"{file_name}\""));

        Ok(TrackOutcome::Downloaded {
            file_name,
            bytes: response.body.len() as u64,
        })
    }
}
