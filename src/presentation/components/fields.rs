use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::Focus,
    form::{FieldId, FormState},
};

const VALUE_INDENT: &str = "  ";

pub fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    form_state: &FormState,
    focus: Focus,
    enable_cursor: bool,
) {
    let render = build_form_lines(form_state, focus);
    let inner_height = area.height.saturating_sub(2) as usize;
    // Keep the focused value row (or the button row) on screen.
    let anchor = render
        .cursor
        .as_ref()
        .map_or(render.focus_line, |cursor| cursor.line);
    let scroll = anchor.saturating_add(1).saturating_sub(inner_height);

    let paragraph = Paragraph::new(render.lines)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);

    if !enable_cursor {
        return;
    }
    if let Some(cursor) = render.cursor {
        let Some(visible_line) = cursor.line.checked_sub(scroll) else {
            return;
        };
        if visible_line >= inner_height {
            return;
        }
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(cursor.column)
            .min(area.right().saturating_sub(2));
        let y = area.y.saturating_add(1).saturating_add(visible_line as u16);
        frame.set_cursor_position((x, y));
    }
}

pub(crate) struct FormLines {
    pub lines: Vec<Line<'static>>,
    /// Line the focused element starts on.
    pub focus_line: usize,
    pub cursor: Option<CursorHint>,
}

pub(crate) struct CursorHint {
    pub line: usize,
    pub column: u16,
}

pub(crate) fn build_form_lines(form_state: &FormState, focus: Focus) -> FormLines {
    let mut lines = Vec::new();
    let mut focus_line = 0;
    let mut cursor = None;

    for field in FieldId::ALL {
        let is_focused = focus == Focus::Field(field);
        if is_focused {
            focus_line = lines.len();
        }
        lines.push(label_line(field, is_focused));
        if field.is_pin()
            && let Some(advisory) = form_state.pin_advisory()
        {
            lines.push(Line::from(Span::styled(
                format!("{VALUE_INDENT}{advisory}"),
                Style::default().fg(Color::Red),
            )));
        }
        let (value_line, width) = value_line(form_state, field);
        if is_focused {
            cursor = Some(CursorHint {
                line: lines.len(),
                column: (VALUE_INDENT.len() + width) as u16,
            });
        }
        lines.push(value_line);
        lines.push(Line::default());
    }

    if focus == Focus::PinToggle {
        focus_line = lines.len();
    }
    let toggle_label = if form_state.pin_visible() {
        "Hide PIN"
    } else {
        "Show PIN"
    };
    lines.push(button_line(
        toggle_label,
        focus == Focus::PinToggle,
        true,
    ));
    lines.push(Line::default());

    if focus == Focus::Submit {
        focus_line = lines.len();
    }
    lines.push(button_line(
        "Submit",
        focus == Focus::Submit,
        form_state.is_submittable(),
    ));

    FormLines {
        lines,
        focus_line,
        cursor,
    }
}

fn label_line(field: FieldId, is_focused: bool) -> Line<'static> {
    let label_style = if is_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    let marker = if is_focused { "» " } else { "  " };
    Line::from(vec![
        Span::styled(format!("{marker}{}", field.label()), label_style),
        Span::styled(
            format!("  [{}]", field.input_mode()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Value row for `field`, plus the display width the cursor sits after.
fn value_line(form_state: &FormState, field: FieldId) -> (Line<'static>, usize) {
    let text = if field.is_pin() {
        form_state.pin_rendered()
    } else {
        form_state.value(field).to_string()
    };
    if text.is_empty() {
        let placeholder = Span::styled(
            format!("{VALUE_INDENT}{}", field.placeholder()),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
        return (Line::from(placeholder), 0);
    }
    let width = UnicodeWidthStr::width(text.as_str());
    let style = if field.is_pin() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    (
        Line::from(Span::styled(format!("{VALUE_INDENT}{text}"), style)),
        width,
    )
}

fn button_line(label: &str, is_focused: bool, enabled: bool) -> Line<'static> {
    let mut style = if enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    if is_focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let marker = if is_focused { "» " } else { "  " };
    let mut spans = vec![
        Span::raw(marker),
        Span::styled(format!("[ {label} ]"), style),
    ];
    if !enabled {
        spans.push(Span::styled(
            " (disabled)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn all_text(render: &FormLines) -> Vec<String> {
        render.lines.iter().map(line_text).collect()
    }

    #[test]
    fn empty_form_shows_placeholders_and_disabled_submit() {
        let render = build_form_lines(&FormState::new(), Focus::default());
        let text = all_text(&render);
        assert!(text.iter().any(|l| l == "  Josh"));
        assert!(text.iter().any(|l| l == "  ####-####-####-####"));
        assert!(text.iter().any(|l| l == "  PIN must be exactly 16 digits"));
        assert!(text.iter().any(|l| l == "  [ Submit ] (disabled)"));
        assert!(text.iter().any(|l| l == "  [ Show PIN ]"));
    }

    #[test]
    fn complete_pin_enables_submit_and_hides_advisory() {
        let mut state = FormState::new().with_field(FieldId::Pin, "1234567890123456");
        state.set_pin_visible(true);
        let render = build_form_lines(&state, Focus::Submit);
        let text = all_text(&render);
        assert!(text.iter().any(|l| l == "  1234-5678-9012-3456"));
        assert!(!text.iter().any(|l| l.contains("must be exactly")));
        assert!(text.iter().any(|l| l == "» [ Submit ]"));
        assert!(text.iter().any(|l| l == "  [ Hide PIN ]"));
        assert_eq!(text[render.focus_line], "» [ Submit ]");
        assert!(render.cursor.is_none());
    }

    #[test]
    fn hidden_pin_is_masked_with_dashes() {
        let state = FormState::new().with_field(FieldId::Pin, "123456");
        let render = build_form_lines(&state, Focus::Field(FieldId::Pin));
        let text = all_text(&render);
        assert!(text.iter().any(|l| l == "  ••••-••"));
        let cursor = render.cursor.expect("cursor on focused pin");
        assert_eq!(text[cursor.line], "  ••••-••");
        assert_eq!(cursor.column, 2 + 7);
    }

    #[test]
    fn disabled_submit_is_dimmed() {
        let line = button_line("Submit", false, false);
        let style = line.spans[1].style;
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::DIM));
    }
}
