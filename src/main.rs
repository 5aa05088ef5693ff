// src/main.rs

//! `ftinfo`: prints what FreeType knows about a font file, then dumps the
//! outline of one glyph.

use anyhow::{Context, Result};
use clap::Parser;
use freetype_rc::config::ReportConfig;
use freetype_rc::report;
use freetype_rc::Library;
use log::{error, info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ftinfo", version, about = "Summarize a font file with FreeType")]
struct Cli {
    /// Font file to open
    font: PathBuf,

    /// JSON file with report settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Character whose outline is dumped (overrides the config)
    #[arg(long = "char")]
    probe_char: Option<char>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if let Some(c) = cli.probe_char {
        config.probe_char = c;
    }

    let library = Library::init().context("Failed to initialize freetype")?;
    info!("FreeType {}", library.version());

    // The face holds a library reference; drop it before `done`.
    let report = {
        let face = library
            .new_face(&cli.font, config.face_index)
            .with_context(|| {
                format!("Freetype failed to read {} as a font file", cli.font.display())
            })?;
        report::collect(&face, &cli.font.display().to_string(), &config)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to write JSON report")?;
        writeln!(out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush()?;

    shut_down(library);
    Ok(())
}

/// A failed teardown does not change the outcome of the run.
fn shut_down(library: Library) {
    if let Err(err) = library.done() {
        warn!("Failed to shut down freetype: {}", err);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn shut_down_tolerates_a_shared_library() {
        let library = Library::init().unwrap();
        let other = library.clone();
        shut_down(library);
        assert_eq!(other.version().major, 2);
        shut_down(other);
    }

    #[test]
    fn missing_font_argument_is_a_usage_error() {
        let err = Cli::try_parse_from(["ftinfo"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
