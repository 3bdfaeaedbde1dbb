//! Display-title cleanup for track pages.
//!
//! Track page titles look like `"<song> MP3 - <album> - Download <album> Soundtracks for FREE!"`.
//! Everything from the first noise token on is album/site boilerplate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-word, case-sensitive. The leftmost hit wins no matter which token it is.
static NOISE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:MP3|OST|Download)\b").expect("valid noise token regex"));

fn is_trailing_junk(c: char) -> bool {
    c == '-' || c == '–' || c.is_whitespace()
}

/// Cuts `raw` before the first noise token and strips trailing dashes and whitespace.
///
/// The result still needs [`super::sanitize_for_filesystem`] before it is used in a path.
pub fn clean_title(raw: &str) -> String {
    let head = match NOISE_TOKEN.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    };
    head.trim_end_matches(is_trailing_junk).trim_start().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_album_and_site_noise() {
        assert_eq!(
            clean_title(
                "Stephanie's Visit (Extended) MP3 - Kingdom Come Deliverance – OST Atmospheres &"
            ),
            "Stephanie's Visit (Extended)"
        );
    }

    #[test]
    fn leftmost_token_wins() {
        assert_eq!(clean_title("Intro OST - Theme MP3"), "Intro");
        assert_eq!(clean_title("Boss Download MP3 OST"), "Boss");
    }

    #[test]
    fn tokens_are_case_sensitive_whole_words() {
        assert_eq!(clean_title("Mp3 Player ost"), "Mp3 Player ost");
        assert_eq!(clean_title("MP3s and OSTs"), "MP3s and OSTs");
        assert_eq!(clean_title("Downloaded Memories"), "Downloaded Memories");
    }

    #[test]
    fn no_token_keeps_title_minus_trailing_dashes() {
        assert_eq!(clean_title("Field Theme"), "Field Theme");
        assert_eq!(clean_title("Field Theme --"), "Field Theme");
        assert_eq!(clean_title("Field Theme – - "), "Field Theme");
        assert_eq!(clean_title("Re-Union"), "Re-Union");
    }

    #[test]
    fn token_at_start_leaves_nothing() {
        assert_eq!(clean_title("MP3 - Some Album"), "");
    }
}
