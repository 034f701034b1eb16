use super::utils::format_timestamp;
use super::*;
use userdesk::Field;

pub fn render_details(frame: &mut Frame, app: &mut App, body: Rect) {
    let Some(record) = &app.details else {
        return;
    };

    let label_style = Style::default().fg(Color::DarkGray);
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    let mut lines = vec![Line::from("")];
    for field in [Field::Name, Field::Email, Field::Phone, Field::Company] {
        lines.push(row(field.label(), record.value(field).to_string()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Address",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for field in [Field::Street, Field::City, Field::Zip] {
        lines.push(row(field.label(), record.value(field).to_string()));
    }
    lines.push(Line::from(""));
    lines.push(row("Created", format_timestamp(record.created_at)));
    lines.push(row("Updated", format_timestamp(record.updated_at)));
    if let Some(id) = &record.id {
        lines.push(row("ID", id.to_string()));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", record.name))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, body);
}
