use crate::form::pin::PIN_ADVISORY;

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Fill in the form and press Ctrl+S to submit.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn pin_visibility(&mut self, visible: bool) {
        self.message = if visible { "PIN shown" } else { "PIN hidden" }.to_string();
    }

    pub fn submitted(&mut self) {
        self.message = "Form submitted. Press Ctrl+Q to exit.".to_string();
    }

    pub fn blocked(&mut self, digits: usize) {
        self.message = format!("{PIN_ADVISORY} ({digits} entered)");
    }

    pub fn sink_failed(&mut self, reason: &str) {
        self.message = format!("Submission failed: {reason}");
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsubmitted changes. Press Ctrl+Q again to quit.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
