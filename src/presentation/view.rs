use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::Focus, form::FormState};

use super::components::{render_fields, render_footer};

pub struct UiContext<'a> {
    pub title: &'a str,
    pub form_state: &'a FormState,
    pub focus: Focus,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ctx.title.to_string())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let cursor_enabled = ctx.focus.field().is_some();
    render_fields(frame, chunks[1], ctx.form_state, ctx.focus, cursor_enabled);
    render_footer(frame, chunks[2], &ctx);
}
