use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
};

use crate::form::{FormState, pin::PIN_DIGITS};

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let mut status = ctx.status_message.to_string();
    if ctx.dirty {
        status.push_str(" • unsubmitted changes");
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }

    let status_widget = Paragraph::new(ratatui::text::Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status),
        Span::raw(" "),
        gate_badge(ctx.form_state),
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}

fn gate_badge(form_state: &FormState) -> Span<'static> {
    if form_state.is_submittable() {
        return Span::styled("[ready]", Style::default().fg(Color::Green));
    }
    Span::styled(
        format!("[PIN {}/{PIN_DIGITS}]", form_state.pin().len()),
        Style::default().fg(Color::Red).bg(Color::Black),
    )
}
