//! UI rendering
//!
//! Pure rendering functions that transform shell state plus store state
//! into terminal frames. No side effects here.

pub mod auth;
pub mod dashboard;
pub mod home;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use libcoursedeck::{ApiError, RootState};

use crate::app::AppState;
use crate::router::Route;

/// Render the application UI
///
/// Main rendering entry point: picks the screen for the current route,
/// then stacks overlays on top.
pub fn render(frame: &mut Frame, state: &AppState, root: &RootState, textarea: &TextArea<'_>) {
    let area = frame.size();

    match state.route {
        Route::Home => home::render_home(frame, area, state, root),
        Route::Login => auth::render_login(frame, area, state, root),
        Route::Register => auth::render_register(frame, area, state, root),
        Route::Dashboard => dashboard::render_dashboard(frame, area, state, root, textarea),
    }

    if state.help_visible {
        render_help_overlay(frame, area, state);
    }
}

/// One line of text for an API error.
///
/// Backend failures carry the service's JSON payload verbatim; show its
/// `message` field when there is one, otherwise the whole payload.
pub fn error_line(error: &ApiError) -> String {
    match error {
        ApiError::Backend(payload) => payload
            .get("message")
            .and_then(|m| m.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| payload.to_string()),
        other => other.to_string(),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 70, area);

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Ctrl+C   - Quit"),
        Line::from(""),
    ];

    let screen_lines: &[&str] = match state.route {
        Route::Home => &[
            "Home:",
            "  l        - Sign in",
            "  r        - Create account",
            "  d        - Dashboard",
            "  q        - Quit",
        ],
        Route::Login | Route::Register => &[
            "Form:",
            "  Tab      - Next field",
            "  Enter    - Submit",
            "  Esc      - Back to home",
        ],
        Route::Dashboard => &[
            "Dashboard:",
            "  j/k      - Move between cards",
            "  /        - Filter by title",
            "  a        - Add module",
            "  e        - Edit module",
            "  d        - Delete module",
            "  Tab      - Switch course",
            "  r        - Refresh",
            "  L        - Sign out",
            "  q        - Quit",
            "",
            "Dialog:",
            "  Ctrl+S   - Save",
            "  Tab      - Title <-> content",
            "  Esc      - Cancel",
        ],
    };
    help_text.extend(screen_lines.iter().map(|s| Line::from(*s)));
    help_text.push(Line::from(""));
    help_text.push(Line::from("Press Esc or F1 to close"));

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area); // Clear background
    frame.render_widget(help, popup_area);
}

/// Helper to create centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_line_prefers_backend_message() {
        let error = ApiError::Backend(json!({"message": "Module not found", "status": "fail"}));
        assert_eq!(error_line(&error), "Module not found");
    }

    #[test]
    fn test_error_line_falls_back_to_payload() {
        let error = ApiError::Backend(json!({"status": "fail"}));
        assert!(error_line(&error).contains("fail"));
    }

    #[test]
    fn test_error_line_for_transport_errors() {
        let error = ApiError::fallback();
        assert_eq!(error_line(&error), "Something went wrong");
    }

    #[test]
    fn test_centered_rect_fits_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, parent);

        assert!(popup.x >= parent.x);
        assert!(popup.y >= parent.y);
        assert!(popup.right() <= parent.right());
        assert!(popup.bottom() <= parent.bottom());
    }
}
