use super::utils::centered_rect;
use super::*;
use crate::app::DeleteOrigin;

pub fn render_delete_confirm_dialog(frame: &mut Frame, app: &mut App, body: Rect) {
    let Some(ctx) = app.delete_context.clone() else {
        return super::dashboard::render_dashboard(frame, app, body);
    };

    match ctx.origin {
        DeleteOrigin::Dashboard => super::dashboard::render_dashboard(frame, app, body),
        DeleteOrigin::Details => super::details::render_details(frame, app, body),
    }

    let popup = centered_rect(56, 8, frame.area());
    frame.render_widget(Clear, popup);

    let prompt = vec![
        Line::from(vec![
            Span::raw("Remove "),
            Span::styled(ctx.label, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" permanently?"),
        ]),
        Line::from(Span::styled(ctx.detail, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" keep"),
        ]),
    ];

    let dialog = Paragraph::new(prompt).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm delete ")
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(dialog, popup);
}
