//! Console status protocol.
//!
//! Every user-facing message is one line starting with a bracketed tag
//! (`[info]`, `[warn]`, `[error]`, `[skipping]`, `[downloading]`, `[done]`).
//! Scripts scrape these lines, so the tags and wording are stable.

use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTag {
    Info,
    Warn,
    Error,
    Skipping,
    Downloading,
    Done,
}

impl StatusTag {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusTag::Info => "info",
            StatusTag::Warn => "warn",
            StatusTag::Error => "error",
            StatusTag::Skipping => "skipping",
            StatusTag::Downloading => "downloading",
            StatusTag::Done => "done",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.as_str())
    }
}

/// Renders one status line, without the trailing newline.
pub fn format_line(tag: StatusTag, message: &str) -> String {
    format!("{tag} {message}")
}

/// Receives status lines from the pipeline.
pub trait StatusSink {
    fn emit(&mut self, tag: StatusTag, message: &str);
}

/// Prints status lines to stdout and mirrors them into the tracing log.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&mut self, tag: StatusTag, message: &str) {
        match tag {
            StatusTag::Error => tracing::error!("{}", message),
            StatusTag::Warn => tracing::warn!("{}", message),
            _ => tracing::info!(status = tag.as_str(), "{}", message),
        }
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", format_line(tag, message));
        let _ = out.flush();
    }
}

/// Collects status lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub lines: Vec<(StatusTag, String)>,
}

impl MemorySink {
    /// Lines rendered exactly as the console would print them.
    pub fn rendered(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|(tag, msg)| format_line(*tag, msg))
            .collect()
    }

    pub fn count(&self, tag: StatusTag) -> usize {
        self.lines.iter().filter(|(t, _)| *t == tag).count()
    }
}

impl StatusSink for MemorySink {
    fn emit(&mut self, tag: StatusTag, message: &str) {
        self.lines.push((tag, message.to_string()));
    }
}
