use anyhow::{Result, anyhow};
use tracing::info;

use crate::{
    form::{FieldId, FormState, LogSink, SinkChain, SubmissionSink},
    io::{self, OutputOptions},
};

use super::{options::UiOptions, runtime::App};

/// Entry point for running the interest form in a terminal.
///
/// ```no_run
/// use interest_form::{FieldId, InterestForm};
///
/// let submitted = InterestForm::new()
///     .with_title("Air Fryer Interest Form")
///     .with_value(FieldId::FirstName, "Josh")
///     .run()?;
/// println!("{}", submitted.pin());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct InterestForm {
    options: UiOptions,
    initial: FormState,
    sinks: SinkChain,
    output: Option<OutputOptions>,
}

impl Default for InterestForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InterestForm {
    pub fn new() -> Self {
        Self {
            options: UiOptions::default(),
            initial: FormState::new(),
            sinks: SinkChain::new().with(LogSink),
            output: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Pre-fills a field. The value goes through the normal field update
    /// handler, so PIN seeds are sanitized.
    pub fn with_value(mut self, field: FieldId, raw: &str) -> Self {
        self.initial.set_field(field, raw);
        self
    }

    pub fn with_initial_state(mut self, state: FormState) -> Self {
        self.initial = state;
        self
    }

    /// Adds a sink that receives every accepted submission during the session.
    pub fn with_sink(mut self, sink: impl SubmissionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Writes the last accepted submission once the terminal is restored.
    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = Some(output);
        self
    }

    pub fn run(self) -> Result<FormState> {
        let (mut app, output) = self.into_app();
        let submitted = app
            .run()?
            .ok_or_else(|| anyhow!("form closed without a submission"))?;
        info!("interest form closed after submission");

        if let Some(output) = output {
            io::emit(&submitted, &output)?;
        }
        Ok(submitted)
    }

    fn into_app(self) -> (App<SinkChain>, Option<OutputOptions>) {
        let InterestForm {
            options,
            initial,
            sinks,
            output,
        } = self;
        (App::new(initial, options, sinks), output)
    }
}
