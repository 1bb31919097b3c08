//! Home screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use libcoursedeck::RootState;

use crate::app::AppState;

pub fn render_home(frame: &mut Frame, area: Rect, state: &AppState, root: &RootState) {
    let block = Block::default()
        .title(format!(" {} ", state.route.title()))
        .borders(Borders::ALL);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Coursedeck",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Course management for teachers"),
        Line::from(""),
    ];

    if let Some(info) = &root.user.user_info {
        let name = if info.data.name.is_empty() {
            info.data.email.as_str()
        } else {
            info.data.name.as_str()
        };
        lines.push(Line::from(vec![
            Span::raw("Signed in as "),
            Span::styled(name.to_string(), Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from("d - Dashboard"));
    } else {
        lines.push(Line::from("l - Sign in"));
        lines.push(Line::from("r - Create account"));
        lines.push(Line::from("d - Dashboard"));
    }

    lines.push(Line::from("q - Quit"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "F1 for help",
        Style::default().fg(Color::Gray),
    )));

    let text = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(text, area);
}
