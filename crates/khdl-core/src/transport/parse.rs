//! Parse HTTP response header lines into ResponseHeaders.

use super::ResponseHeaders;

/// Parse collected header lines into ResponseHeaders.
///
/// With redirects, libcurl hands over the header block of every hop; only the
/// block after the last status line describes the body we received.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let last_block = lines
        .iter()
        .rposition(|l| l.trim_start().starts_with("HTTP/"))
        .map(|i| &lines[i..])
        .unwrap_or(lines);

    let mut headers = ResponseHeaders::default();
    for line in last_block {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    headers.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("content-type") {
                headers.content_type = Some(value.to_string());
            }
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn content_length_and_type() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 3140000",
            "Content-Type: audio/mpeg",
        ]));
        assert_eq!(h.content_length, Some(3_140_000));
        assert_eq!(h.content_type.as_deref(), Some("audio/mpeg"));
    }

    #[test]
    fn missing_or_garbage_length() {
        let h = parse_headers(&lines(&["HTTP/1.1 200 OK", "Content-Length: lots"]));
        assert_eq!(h.content_length, None);
        let h = parse_headers(&lines(&["HTTP/1.1 200 OK"]));
        assert_eq!(h.content_length, None);
    }

    #[test]
    fn only_final_redirect_hop_counts() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 302 Found",
            "Location: https://cdn.example.com/a.mp3",
            "Content-Length: 0",
            "",
            "HTTP/2 200",
            "content-length: 42",
        ]));
        assert_eq!(h.content_length, Some(42));
    }
}
