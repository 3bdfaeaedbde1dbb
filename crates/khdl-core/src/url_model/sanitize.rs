//! Filesystem-safe name sanitization for track titles and album identifiers.

/// Longest name component we emit, in characters.
pub const MAX_NAME_CHARS: usize = 80;

fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\r' | '\n')
}

/// Sanitizes a candidate name for use as a file or directory name.
///
/// - Drops `< > : " / \ | ? *`, CR and LF
/// - Collapses whitespace runs to one space and trims both ends
/// - Truncates to 80 characters, then trims trailing whitespace again
///
/// An empty result is valid; callers pick a fallback name.
pub fn sanitize_for_filesystem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for c in name.chars().filter(|c| !is_forbidden(*c)) {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    match out.char_indices().nth(MAX_NAME_CHARS) {
        Some((cut, _)) => out[..cut].trim_end().to_string(),
        None => out,
    }
}
