use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use interest_form::{
    DocumentFormat, FormState, InterestForm, KeymapStore, LogSink, OutputDestination,
    OutputOptions, OutputSink, SinkChain, SubmitOutcome, UiOptions, form::pin::PIN_ADVISORY,
    parse_assignment, submit,
};

#[derive(Debug, Parser)]
#[command(
    name = "interest-form",
    version,
    about = "Fill in the interest form from your terminal"
)]
struct Cli {
    /// Title shown at the top of the form
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Pre-fill a field, e.g. --set firstName=Josh --set pin=1234-5678-9012-3456
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", action = ArgAction::Append)]
    values: Vec<String>,

    /// Output destinations for the submitted form ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Output format: json, yaml or toml
    #[arg(long = "format", value_name = "FORMAT", default_value = "json")]
    format: String,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Start with the PIN shown in plain text
    #[arg(long = "show-pin")]
    show_pin: bool,

    /// Quit on the first Ctrl+Q even with unsubmitted edits
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,

    /// Event poll interval in milliseconds
    #[arg(long = "tick-rate-ms", value_name = "MS", default_value_t = 250)]
    tick_rate_ms: u64,

    /// Load key bindings from a JSON file shaped like the bundled keymap
    #[arg(long = "keymap", value_name = "PATH")]
    keymap: Option<PathBuf>,

    /// Hide the key-binding help line
    #[arg(long = "no-help")]
    no_help: bool,

    /// Append logs to this file (interactive mode logs nowhere otherwise)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Submit the --set values without opening the terminal UI
    #[arg(long = "batch")]
    batch: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut diagnostics = DiagnosticCollector::default();
    let seed = build_seed(&cli.values, &mut diagnostics);
    let keymap = load_keymap(cli.keymap.as_ref(), &mut diagnostics);
    let output = build_output_options(&cli, &mut diagnostics);
    diagnostics.into_result()?;

    if cli.batch {
        return run_batch(&seed, output);
    }

    let mut options = UiOptions::default()
        .with_help(!cli.no_help)
        .with_show_pin(cli.show_pin)
        .with_confirm_exit(!cli.no_confirm_exit)
        .with_tick_rate(Duration::from_millis(cli.tick_rate_ms.max(1)));
    if let Some(store) = keymap {
        options = options.with_keymap(store);
    }
    let mut form = InterestForm::new()
        .with_options(options)
        .with_initial_state(seed)
        .with_output(output);
    if let Some(title) = cli.title.as_ref() {
        form = form.with_title(title.clone());
    }

    let _ = form.run().map_err(Report::msg)?;
    Ok(())
}

/// Installs the tracing subscriber.
///
/// * Honours `RUST_LOG`, falling back to `info`.
/// * Interactive sessions own the terminal, so they log only to `--log-file`.
/// * Batch runs log to stderr, keeping stdout for the payload.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false);

    if let Some(path) = cli.log_file.as_ref() {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("cannot open log file '{}'", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if cli.batch {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

fn run_batch(seed: &FormState, output: OutputOptions) -> Result<()> {
    let mut sinks = SinkChain::new().with(LogSink).with(OutputSink::new(output));
    match submit(seed, &mut sinks) {
        SubmitOutcome::Delivered => {
            debug!("batch submission delivered");
            Ok(())
        }
        SubmitOutcome::Blocked { digits } => {
            Err(eyre!("{PIN_ADVISORY} (got {digits}); nothing submitted"))
        }
        SubmitOutcome::SinkFailed(reason) => Err(eyre!("submission failed: {reason}")),
    }
}

fn build_seed(values: &[String], diagnostics: &mut DiagnosticCollector) -> FormState {
    let mut state = FormState::new();
    for raw in values {
        match parse_assignment(raw) {
            Ok((field, value)) => state.set_field(field, value),
            Err(err) => diagnostics.push_input("--set", err.to_string()),
        }
    }
    state
}

fn load_keymap(
    path: Option<&PathBuf>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<KeymapStore> {
    let path = path?;
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            diagnostics.push_input(
                "--keymap",
                format!("cannot read {}: {err}", path.display()),
            );
            return None;
        }
    };
    match KeymapStore::from_json(&source) {
        Ok(store) => {
            debug!(path = %path.display(), "loaded custom keymap");
            Some(store)
        }
        Err(err) => {
            diagnostics.push_input("--keymap", format!("{err:#}"));
            None
        }
    }
}

fn build_output_options(cli: &Cli, diagnostics: &mut DiagnosticCollector) -> OutputOptions {
    let format = match cli.format.parse::<DocumentFormat>() {
        Ok(format) => format,
        Err(message) => {
            diagnostics.push_output(message);
            DocumentFormat::default()
        }
    };

    let mut options = OutputOptions::new(format)
        .with_pretty(!cli.no_pretty)
        .with_destinations(Vec::new());
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        let destination = OutputDestination::parse(raw);
        if let OutputDestination::File(path) = &destination
            && path.exists()
            && !cli.force
        {
            diagnostics.push_output(format!(
                "output file {} already exists (pass --force to overwrite)",
                path.display()
            ));
            continue;
        }
        options = options.add_destination(destination);
    }
    if cli.outputs.is_empty() {
        options = options.add_destination(OutputDestination::Stdout);
    }
    options
}

#[derive(Debug, Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
