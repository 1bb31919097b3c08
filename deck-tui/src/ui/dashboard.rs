//! Dashboard screen
//!
//! Header with the teacher's identity and selected course, a search
//! filter, and the module card section, plus the add/edit dialog.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use libcoursedeck::{Course, Module, RootState};

use crate::app::{AppState, FormField, FormMode};

use super::{centered_rect, error_line};

pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    root: &RootState,
    textarea: &TextArea<'_>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(3), // search filter
            Constraint::Min(3),    // card section
            Constraint::Length(4), // status bar
        ])
        .split(area);

    render_header(frame, chunks[0], root);
    render_search_filter(frame, chunks[1], state);
    render_card_section(frame, chunks[2], state, root);
    render_status_bar(frame, chunks[3], state, root);

    if state.form.is_some() {
        render_module_form(frame, area, state, textarea);
    }
}

/// Identity and course line at the top of the dashboard.
fn render_header(frame: &mut Frame, area: Rect, root: &RootState) {
    let identity = if let Some(profile) = &root.profile.profile {
        Line::from(vec![
            Span::styled(
                profile.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(profile.email.clone(), Style::default().fg(Color::Gray)),
        ])
    } else if root.profile.loading {
        Line::from(Span::styled(
            "Loading profile...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(info) = &root.user.user_info {
        let name = if info.data.name.is_empty() {
            info.data.email.clone()
        } else {
            info.data.name.clone()
        };
        Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD)))
    } else {
        Line::from(Span::styled(
            "Not signed in",
            Style::default().fg(Color::Red),
        ))
    };

    let course_line = if let Some(course) = root.courses.selected_course() {
        Line::from(vec![
            Span::raw("Course: "),
            Span::styled(course.title.clone(), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  ({} total)", root.courses.courses.len()),
                Style::default().fg(Color::Gray),
            ),
        ])
    } else if root.courses.loading {
        Line::from(Span::styled(
            "Loading courses...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &root.courses.error {
        Line::from(Span::styled(
            error_line(error),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            "No courses yet",
            Style::default().fg(Color::Gray),
        ))
    };

    let header = Paragraph::new(vec![identity, course_line])
        .block(Block::default().title(" Dashboard ").borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Search box that narrows the card section by title.
fn render_search_filter(frame: &mut Frame, area: Rect, state: &AppState) {
    let border = if state.search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let content = if state.search.is_empty() && !state.search_active {
        Line::from(Span::styled(
            "Press / to filter by title",
            Style::default().fg(Color::Gray),
        ))
    } else if state.search_active {
        Line::from(format!("{}_", state.search))
    } else {
        Line::from(state.search.clone())
    };

    let filter = Paragraph::new(content).block(
        Block::default()
            .title(" Filter ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(filter, area);
}

/// One card per module, filtered by the search box.
fn render_card_section(frame: &mut Frame, area: Rect, state: &AppState, root: &RootState) {
    let visible = filter_modules(&root.modules.modules, &state.search);
    let block = Block::default()
        .title(format!(" Modules ({}) ", visible.len()))
        .borders(Borders::ALL);

    if visible.is_empty() {
        let message = if root.modules.loading {
            "Loading modules..."
        } else if !state.search.is_empty() {
            "No modules match the filter"
        } else if root.courses.selected.is_none() {
            "Select a course to see its modules"
        } else {
            "No modules yet. Press a to add one."
        };
        let empty = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let cursor = clamped_cursor(visible.len(), state.cursor);
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, module)| card_item(module, i == cursor))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn card_item(module: &Module, selected: bool) -> ListItem<'static> {
    let marker = if selected { "> " } else { "  " };
    let title_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let preview = module
        .content
        .as_deref()
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("");
    let body = if preview.is_empty() {
        "(no content)".to_string()
    } else {
        truncate(preview, 80)
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::raw(marker.to_string()),
            Span::styled(module.title.clone(), title_style),
        ]),
        Line::from(Span::styled(
            format!("  {}", body),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ])
}

/// Modules slice status plus key hints.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, root: &RootState) {
    let status_line = if root.modules.loading {
        Line::from(Span::styled(
            "Working...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &root.modules.error {
        Line::from(Span::styled(
            error_line(error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(success) = &root.modules.success {
        Line::from(Span::styled(
            success.clone(),
            Style::default().fg(Color::Green),
        ))
    } else if let Some(status) = &state.status {
        Line::from(status.clone())
    } else {
        Line::from("")
    };

    let hints =
        "a: add | e: edit | d: delete | /: filter | Tab: course | r: refresh | L: sign out | q: quit";
    let bar = Paragraph::new(vec![
        status_line,
        Line::from(Span::styled(hints, Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

/// Add/edit dialog. The content textarea is owned by the event loop and
/// arrives already styled.
fn render_module_form(frame: &mut Frame, area: Rect, state: &AppState, textarea: &TextArea<'_>) {
    let Some(form) = &state.form else { return };
    let popup = centered_rect(70, 70, area);

    let title = match &form.mode {
        FormMode::Add => " Add module ",
        FormMode::Edit { .. } => " Edit module ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let focused = form.focus == FormField::Title;
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let shown = if focused {
        format!("{}_", form.title)
    } else {
        form.title.clone()
    };
    let title_field = Paragraph::new(shown).block(
        Block::default()
            .title(" Title ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(title_field, chunks[0]);

    frame.render_widget(textarea, chunks[1]);

    let hints = Paragraph::new("Ctrl+S: save | Tab: title <-> content | Esc: cancel")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

/// Case-insensitive title filter over the module list.
pub fn filter_modules<'a>(modules: &'a [Module], search: &str) -> Vec<&'a Module> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return modules.iter().collect();
    }
    modules
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

/// Keep the cursor inside the visible list.
pub fn clamped_cursor(len: usize, cursor: usize) -> usize {
    if len == 0 {
        0
    } else {
        cursor.min(len - 1)
    }
}

/// The module the cursor points at, after filtering.
pub fn module_at_cursor<'a>(
    modules: &'a [Module],
    search: &str,
    cursor: usize,
) -> Option<&'a Module> {
    let visible = filter_modules(modules, search);
    if visible.is_empty() {
        None
    } else {
        Some(visible[clamped_cursor(visible.len(), cursor)])
    }
}

/// The course after the selected one, wrapping around. With nothing
/// selected yet, the first course.
pub fn next_course_id(courses: &[Course], selected: Option<&str>) -> Option<String> {
    if courses.is_empty() {
        return None;
    }
    let next = match selected.and_then(|id| courses.iter().position(|c| c.id == id)) {
        Some(i) => (i + 1) % courses.len(),
        None => 0,
    };
    Some(courses[next].id.clone())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}
