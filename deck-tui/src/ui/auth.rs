//! Sign-in and registration screens

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use libcoursedeck::RootState;

use crate::app::{AppState, LoginField, RegisterField};

use super::{centered_rect, error_line};

pub fn render_login(frame: &mut Frame, area: Rect, state: &AppState, root: &RootState) {
    let popup = centered_rect(50, 70, area);
    let block = Block::default()
        .title(" Sign in ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(inner);

    render_field(
        frame,
        chunks[0],
        " Email ",
        &state.login.email,
        state.login.focus == LoginField::Email,
    );

    let masked = "*".repeat(state.login.password.chars().count());
    render_field(
        frame,
        chunks[1],
        " Password ",
        &masked,
        state.login.focus == LoginField::Password,
    );

    render_user_status(frame, chunks[2], state, root, "Signing in...");

    let hints = Paragraph::new("Enter: submit | Tab: next field | Esc: back")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[3]);
}

pub fn render_register(frame: &mut Frame, area: Rect, state: &AppState, root: &RootState) {
    let popup = centered_rect(50, 80, area);
    let block = Block::default()
        .title(" Create account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(inner);

    render_field(
        frame,
        chunks[0],
        " Name ",
        &state.register.name,
        state.register.focus == RegisterField::Name,
    );
    render_field(
        frame,
        chunks[1],
        " Email ",
        &state.register.email,
        state.register.focus == RegisterField::Email,
    );

    let masked = "*".repeat(state.register.password.chars().count());
    render_field(
        frame,
        chunks[2],
        " Password ",
        &masked,
        state.register.focus == RegisterField::Password,
    );

    render_user_status(frame, chunks[3], state, root, "Creating account...");

    let hints = Paragraph::new("Enter: submit | Tab: next field | Esc: back")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[4]);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let shown = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };

    let field = Paragraph::new(shown).block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(field, area);
}

/// Status line under the fields, driven by the user slice.
fn render_user_status(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    root: &RootState,
    busy: &str,
) {
    let line = if root.user.loading {
        Line::from(Span::styled(
            busy.to_string(),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &root.user.error {
        Line::from(Span::styled(
            error_line(error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(success) = &root.user.success {
        Line::from(Span::styled(
            success.clone(),
            Style::default().fg(Color::Green),
        ))
    } else if let Some(status) = &state.status {
        Line::from(status.clone())
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
