use super::*;

pub fn render_dashboard(frame: &mut Frame, app: &mut App, body: Rect) {
    // Only a failed refresh gets the banner; failed deletes and fetches are
    // reported on the status line by their own actions.
    let load_error = app
        .users
        .last_error()
        .filter(|_| app.users.refresh_failed());
    let banner_height = if load_error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
        .split(body);

    if let Some(error) = load_error {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Could not load users: {}", error),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  (r to retry)", Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[0]);
    }

    let title = if app.users.is_loading() {
        " Users (loading...) ".to_string()
    } else {
        format!(" Users ({}) ", app.users.users().len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));

    if app.users.users().is_empty() {
        let text = if app.users.is_loading() {
            "Loading users..."
        } else {
            "No users yet. Press n to create one."
        };
        let empty = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let deleting = app.users.deleting();
    let items: Vec<ListItem> = app
        .users
        .users()
        .iter()
        .map(|user| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<24}", user.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<32}", user.email),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(user.company.clone(), Style::default().fg(Color::DarkGray)),
            ];
            if deleting.is_some() && user.id.as_ref() == deleting {
                spans.push(Span::styled(
                    "  deleting...",
                    Style::default().fg(Color::Red),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
