use super::*;
use strum::IntoEnumIterator;
use userdesk::Field;

pub fn render_form(frame: &mut Frame, app: &mut App, body: Rect) {
    let Some(session) = &app.form else {
        return;
    };
    let form = &session.form;

    let title = if form.is_new() {
        " Create User "
    } else {
        " Edit User "
    };

    let mut lines = Vec::new();
    if let Some(error) = form.submit_error() {
        lines.push(Line::from(Span::styled(
            error.message().to_string(),
            Style::default().fg(Color::White).bg(Color::Red),
        )));
    }
    lines.push(Line::from(""));

    for field in Field::iter() {
        if field == Field::Street {
            lines.push(Line::from(Span::styled(
                "Address",
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        let focused = field == session.focused;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if focused && !form.is_submitting() { "_" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", field.label()), label_style),
            Span::styled(format!("{}{}", form.draft().value(field), cursor), value_style),
        ]));
        if let Some(message) = form.errors().get(field) {
            lines.push(Line::from(Span::styled(
                format!("{:<10}{}", "", message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    let submit_label = match (form.is_submitting(), form.is_new()) {
        (true, _) => "Submitting...",
        (false, true) => "[Enter] Create User",
        (false, false) => "[Enter] Update User",
    };
    lines.push(Line::from(Span::styled(
        submit_label,
        Style::default().fg(Color::Cyan),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, body);
}
