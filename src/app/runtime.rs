use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::{
    form::{self, FormCommand, FormState, SubmissionSink, SubmitOutcome, TextEdit},
    presentation::{self, UiContext},
};

use super::{
    focus::Focus,
    input::{CommandDispatch, InputRouter, KeyAction},
    keymap::KeymapContext,
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App<S: SubmissionSink> {
    form_state: FormState,
    focus: Focus,
    options: UiOptions,
    status: StatusLine,
    sink: S,
    dirty: bool,
    exit_armed: bool,
    should_quit: bool,
    last_submission: Option<FormState>,
    input_router: InputRouter,
}

impl<S: SubmissionSink> App<S> {
    pub fn new(mut form_state: FormState, options: UiOptions, sink: S) -> Self {
        form_state.set_pin_visible(options.show_pin);
        let input_router = InputRouter::new(options.keymap_store.clone());
        Self {
            form_state,
            focus: Focus::default(),
            options,
            status: StatusLine::new(),
            sink,
            dirty: false,
            exit_armed: false,
            should_quit: false,
            last_submission: None,
            input_router,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// Returns the last form that reached the sink, if any.
    pub fn run(&mut self) -> Result<Option<FormState>> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(text),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
            }
        }
        Ok(self.last_submission.take())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        presentation::draw(
            frame,
            UiContext {
                title: &self.options.title,
                form_state: &self.form_state,
                focus: self.focus,
                status_message: self.status.message(),
                dirty: self.dirty,
                help: help.as_deref(),
            },
        );
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        let context = match self.focus {
            Focus::Field(field) if field.is_pin() => KeymapContext::Pin,
            Focus::Field(_) => KeymapContext::Field,
            Focus::PinToggle | Focus::Submit => KeymapContext::Button,
        };
        self.options.keymap_store.help_text(context)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_router.dispatch(&key) {
            CommandDispatch::Action(action) => self.handle_action(action),
            CommandDispatch::Edit(TextEdit::Insert(' ')) if self.focus.is_button() => {
                self.handle_action(KeyAction::Activate)
            }
            CommandDispatch::Edit(edit) => self.handle_edit(edit),
            CommandDispatch::None => {}
        }
    }

    fn handle_paste(&mut self, text: String) {
        self.handle_edit(TextEdit::Paste(text));
    }

    fn handle_action(&mut self, action: KeyAction) {
        if !matches!(action, KeyAction::Quit) {
            self.exit_armed = false;
        }
        match action {
            KeyAction::Submit => self.on_submit(),
            KeyAction::Quit => self.on_exit(),
            KeyAction::ResetStatus => self.status.ready(),
            KeyAction::TogglePin => self.toggle_pin(),
            KeyAction::ClearField => self.handle_edit(TextEdit::Clear),
            KeyAction::FocusStep(delta) => self.focus = self.focus.step(delta),
            KeyAction::Activate => match self.focus {
                Focus::Field(_) => self.focus = self.focus.step(1),
                Focus::PinToggle => self.toggle_pin(),
                Focus::Submit => self.on_submit(),
            },
        }
    }

    fn handle_edit(&mut self, edit: TextEdit) {
        let Some(field) = self.focus.field() else {
            return;
        };
        form::apply_command(&mut self.form_state, FormCommand::Edit { field, edit });
        self.dirty = true;
        self.exit_armed = false;
        self.status.editing(field.label());
    }

    fn toggle_pin(&mut self) {
        form::apply_command(&mut self.form_state, FormCommand::TogglePinVisibility);
        self.status.pin_visibility(self.form_state.pin_visible());
    }

    fn on_submit(&mut self) {
        match form::submit(&self.form_state, &mut self.sink) {
            SubmitOutcome::Delivered => {
                self.last_submission = Some(self.form_state.clone());
                self.dirty = false;
                self.status.submitted();
            }
            SubmitOutcome::Blocked { digits } => self.status.blocked(digits),
            SubmitOutcome::SinkFailed(reason) => self.status.sink_failed(&reason),
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.dirty && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        debug!(submitted = self.last_submission.is_some(), "leaving form");
        self.should_quit = true;
    }
}

#[cfg(test)]
impl<S: SubmissionSink> App<S> {
    pub(crate) fn form_state(&self) -> &FormState {
        &self.form_state
    }

    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }

    pub(crate) fn handle_key_for_test(&mut self, key: KeyEvent) {
        self.handle_key(key)
    }

    pub(crate) fn handle_paste_for_test(&mut self, text: &str) {
        self.handle_paste(text.to_string())
    }
}
