use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod dashboard;
mod delete_dialog;
mod details;
mod form;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = root[1];
    match app.current_view {
        View::Dashboard => dashboard::render_dashboard(frame, app, body),
        View::Details => details::render_details(frame, app, body),
        View::Form => form::render_form(frame, app, body),
        View::ConfirmDelete => delete_dialog::render_delete_confirm_dialog(frame, app, body),
    }

    render_status_line(frame, root[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            " userdesk ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(app.source_label.clone(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn key_hints(view: View) -> &'static str {
    match view {
        View::Dashboard => "j/k: move  Enter: view  n: new  e: edit  d: delete  r: refresh  q: quit",
        View::Details => "e: edit  d: delete  Esc: back",
        View::Form => "Tab/Shift-Tab: field  Enter: save  Esc: cancel",
        View::ConfirmDelete => "y: delete  n: keep",
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            key_hints(app.current_view),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
