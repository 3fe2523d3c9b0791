use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::form::{FormState, SubmissionSink};

use super::DocumentFormat;

/// Where a serialized submission is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    /// `-` means stdout, anything else is a file path.
    pub fn parse(spec: &str) -> Self {
        if spec == "-" {
            OutputDestination::Stdout
        } else {
            OutputDestination::file(spec)
        }
    }
}

/// Controls how a submission is serialized and where it goes.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn add_destination(mut self, destination: OutputDestination) -> Self {
        self.destinations.push(destination);
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize `state` and write it to every configured destination.
pub fn emit(state: &FormState, options: &OutputOptions) -> Result<()> {
    if options.destinations.is_empty() {
        return Ok(());
    }
    let payload = serialize(state, options)?;
    for destination in &options.destinations {
        write_payload(destination, &payload).with_context(|| match destination {
            OutputDestination::Stdout => "failed to write to stdout".to_string(),
            OutputDestination::File(path) => {
                format!("failed to write to file {}", path.display())
            }
        })?;
        debug!(?destination, format = %options.format, "submission written");
    }
    Ok(())
}

pub fn serialize<T: Serialize>(value: &T, options: &OutputOptions) -> Result<String> {
    match options.format {
        DocumentFormat::Json => {
            if options.pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if options.pretty {
                toml::to_string_pretty(value).context("failed to serialize TOML")
            } else {
                toml::to_string(value).context("failed to serialize TOML")
            }
        }
    }
}

fn write_payload(destination: &OutputDestination, payload: &str) -> Result<()> {
    let payload = payload.trim_end_matches('\n');
    match destination {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{payload}")?;
            stdout.flush()?;
            Ok(())
        }
        OutputDestination::File(path) => {
            let mut file = File::create(path)?;
            writeln!(file, "{payload}")?;
            file.flush()?;
            Ok(())
        }
    }
}

/// Sink that serializes every submission immediately.
///
/// The terminal UI draws on stderr, but a stdout destination still lands
/// behind the alternate screen. Point it at stdout only when stdout is
/// redirected.
#[derive(Debug, Clone)]
pub struct OutputSink {
    options: OutputOptions,
}

impl OutputSink {
    pub fn new(options: OutputOptions) -> Self {
        Self { options }
    }
}

impl SubmissionSink for OutputSink {
    fn deliver(&mut self, state: &FormState) -> Result<()> {
        emit(state, &self.options)
    }
}
