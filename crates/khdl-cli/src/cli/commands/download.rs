//! `khdl download` – gather album URLs and run the pipeline over them.

use anyhow::{Context, Result};
use khdl_core::config::KhdlConfig;
use khdl_core::pipeline::Pipeline;
use khdl_core::status::{ConsoleSink, StatusSink, StatusTag};
use khdl_core::transport::{CurlOptions, CurlTransport, RetryingTransport};

use super::input::{self, InputSource};
use crate::cli::DownloadArgs;

pub async fn run_download(cfg: &mut KhdlConfig, args: DownloadArgs) -> Result<()> {
    if let Some(output) = args.output {
        cfg.download_dir = output;
    }
    if let Some(input_file) = args.input {
        cfg.input_file = input_file;
    }
    let cfg = cfg.clone();
    let urls = args.urls;

    // Prompting, curl and disk writes all block; keep them off the runtime threads.
    let summary = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut sink = ConsoleSink;
        let lines = match input::choose_source(urls, &cfg.input_file) {
            InputSource::Args(urls) => urls,
            InputSource::File(path) => {
                sink.emit(StatusTag::Info, "Input file found. Parsing for links...");
                input::read_input_file(&path)?
            }
            InputSource::Prompt => vec![input::prompt_stdin()?],
        };

        let transport = RetryingTransport::new(
            CurlTransport::new(CurlOptions::from(&cfg)),
            cfg.retry_policy(),
        );
        let mut pipeline = Pipeline::new(&transport, cfg.site(), cfg.download_dir.clone(), sink);
        Ok(pipeline.run_inputs(lines))
    })
    .await
    .context("download task panicked")??;

    tracing::info!(
        "run completed: {} album(s), {} downloaded, {} skipped, {} failed",
        summary.albums_completed,
        summary.tracks.downloaded,
        summary.tracks.skipped,
        summary.tracks.failed
    );
    Ok(())
}
