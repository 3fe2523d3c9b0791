use anyhow::Result;
use tracing::{info, warn};

use super::state::FormState;

/// Receiver of submitted forms.
///
/// Implementations decide what delivery means: logging, buffering, or
/// writing the payload somewhere. Failures are reported once and never
/// retried.
pub trait SubmissionSink {
    fn deliver(&mut self, state: &FormState) -> Result<()>;
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for Box<S> {
    fn deliver(&mut self, state: &FormState) -> Result<()> {
        (**self).deliver(state)
    }
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for &mut S {
    fn deliver(&mut self, state: &FormState) -> Result<()> {
        (**self).deliver(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    /// The gate was closed; the sink was not called.
    Blocked { digits: usize },
    SinkFailed(String),
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmitOutcome::Delivered)
    }
}

/// Hands `state` to `sink` if the PIN gate is open.
pub fn submit<S: SubmissionSink + ?Sized>(state: &FormState, sink: &mut S) -> SubmitOutcome {
    if !state.is_submittable() {
        let digits = state.pin().len();
        warn!(digits, "submission blocked: PIN incomplete");
        return SubmitOutcome::Blocked { digits };
    }
    match sink.deliver(state) {
        Ok(()) => SubmitOutcome::Delivered,
        Err(err) => {
            warn!(error = %err, "submission sink failed");
            SubmitOutcome::SinkFailed(format!("{err:#}"))
        }
    }
}

/// Writes each submission to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn deliver(&mut self, state: &FormState) -> Result<()> {
        info!(target: "interest_form::submit", form = ?state, "Form submitted.");
        Ok(())
    }
}

/// Keeps every delivered submission in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    delivered: Vec<FormState>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> &[FormState] {
        &self.delivered
    }

    pub fn last(&self) -> Option<&FormState> {
        self.delivered.last()
    }
}

impl SubmissionSink for MemorySink {
    fn deliver(&mut self, state: &FormState) -> Result<()> {
        self.delivered.push(state.clone());
        Ok(())
    }
}

/// Fans a submission out to several sinks, stopping at the first failure.
#[derive(Default)]
pub struct SinkChain {
    sinks: Vec<Box<dyn SubmissionSink>>,
}

impl SinkChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl SubmissionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn SubmissionSink>) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl SubmissionSink for SinkChain {
    fn deliver(&mut self, state: &FormState) -> Result<()> {
        for sink in &mut self.sinks {
            sink.deliver(state)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SinkChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkChain")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
