#![deny(rust_2018_idioms)]
//! A terminal interest form.
//!
//! The form collects contact details and a sixteen-digit PIN. PIN input is
//! sanitized as it is typed, shown in dashed groups of four, and gates the
//! submit control. Accepted submissions are handed to a [`SubmissionSink`].

mod app;
pub mod form;
pub mod io;
mod presentation;

pub use app::{DEFAULT_TITLE, Focus, InterestForm, KeyAction, KeymapContext, KeymapStore, UiOptions};
pub use form::{
    FieldId, FormCommand, FormState, InputMode, LogSink, MemorySink, SeedError, SinkChain,
    SubmissionSink, SubmitOutcome, TextEdit, UnknownFieldError, parse_assignment, submit,
};
pub use io::{DocumentFormat, OutputDestination, OutputOptions, OutputSink};

pub mod prelude {
    pub use super::{FieldId, FormState, InterestForm, SubmissionSink, UiOptions};
}
