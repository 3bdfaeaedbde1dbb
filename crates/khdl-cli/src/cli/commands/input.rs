//! Where album URLs come from: command line, input file, or a one-shot prompt.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const EXAMPLE_URL: &str =
    "http://downloads.khinsider.com/game-soundtracks/album/disgaea-4-a-promise-unforgotten-soundtrack";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Args(Vec<String>),
    File(PathBuf),
    Prompt,
}

/// URLs on the command line win; then the input file if it exists; else prompt.
pub fn choose_source(urls: Vec<String>, input_file: &Path) -> InputSource {
    if !urls.is_empty() {
        InputSource::Args(urls)
    } else if input_file.is_file() {
        InputSource::File(input_file.to_path_buf())
    } else {
        InputSource::Prompt
    }
}

/// Every line of the file, blank ones included; the pipeline reports those itself.
pub fn read_input_file(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read input file {}", path.display()))?;
    Ok(data.lines().map(str::to_string).collect())
}

/// Asks for a single album URL on `output`, reading the answer from `input`.
pub fn prompt_for_url(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    writeln!(output, "Please input link to album on khinsider.")?;
    writeln!(output, "Example input:")?;
    writeln!(output, "  {EXAMPLE_URL}")?;
    write!(output, "Url: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("read URL from stdin")?;
    Ok(line)
}

pub fn prompt_stdin() -> Result<String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    prompt_for_url(&mut stdin.lock(), &mut stdout.lock())
}
