//! Skip-or-fetch decision for one output file.
//!
//! Compares the remote declared size with the local file size in decimal
//! megabytes rounded to two places. This is a size heuristic, not an integrity
//! check: a stale file within rounding distance is kept, and a missing
//! `Content-Length` (expected 0) matches only an empty local file.

/// What to do with one output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadDecision {
    /// Local file already matches; leave it untouched.
    Skip,
    /// No local file, or its size differs; write the full body.
    Fetch,
}

const BYTES_PER_MB: f64 = 1_000_000.0;

/// Bytes as decimal megabytes.
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Size in hundredths of a megabyte, rounded half away from zero.
fn centi_megabytes(bytes: u64) -> u64 {
    (megabytes(bytes) * 100.0).round() as u64
}

/// Decides whether the file at the target path needs (re)writing.
pub fn decide(expected_bytes: u64, existing_bytes: Option<u64>) -> DownloadDecision {
    match existing_bytes {
        Some(existing) if centi_megabytes(existing) == centi_megabytes(expected_bytes) => {
            DownloadDecision::Skip
        }
        _ => DownloadDecision::Fetch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_local_file_fetches() {
        assert_eq!(decide(3_140_000, None), DownloadDecision::Fetch);
        assert_eq!(decide(0, None), DownloadDecision::Fetch);
    }

    #[test]
    fn equal_size_skips() {
        assert_eq!(decide(3_140_000, Some(3_140_000)), DownloadDecision::Skip);
    }

    #[test]
    fn different_size_fetches() {
        assert_eq!(decide(3_140_000, Some(3_100_000)), DownloadDecision::Fetch);
    }

    #[test]
    fn within_rounding_skips() {
        assert_eq!(decide(3_140_000, Some(3_142_000)), DownloadDecision::Skip);
        assert_eq!(decide(3_140_000, Some(3_146_000)), DownloadDecision::Fetch);
    }

    #[test]
    fn unknown_remote_length_only_matches_empty_file() {
        assert_eq!(decide(0, Some(0)), DownloadDecision::Skip);
        assert_eq!(decide(0, Some(2_000_000)), DownloadDecision::Fetch);
    }

    #[test]
    fn megabytes_are_decimal() {
        assert!((megabytes(1_500_000) - 1.5).abs() < 1e-9);
    }
}
