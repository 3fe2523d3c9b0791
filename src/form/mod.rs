mod actions;
mod field;
pub mod pin;
mod reducers;
mod state;
mod submit;

pub use actions::{FormCommand, TextEdit};
pub use field::{FieldId, InputMode, SeedError, UnknownFieldError, parse_assignment};
pub use reducers::{apply_command, reduce, seeded};
pub use state::FormState;
pub use submit::{LogSink, MemorySink, SinkChain, SubmissionSink, SubmitOutcome, submit};
