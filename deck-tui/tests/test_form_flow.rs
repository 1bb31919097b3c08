//! Integration tests for the module dialog and card list
//!
//! Walks the add/edit dialog through its states and verifies the pure
//! helpers the dashboard uses for filtering and cursor movement.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deck_tui::app::{keymap, reduce, textarea_captures, Action, AppState, FormField, FormMode};
use deck_tui::router::Route;
use deck_tui::ui::dashboard::{clamped_cursor, filter_modules, module_at_cursor, next_course_id};
use libcoursedeck::{Course, Module};
use tui_textarea::TextArea;

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn module(id: &str, title: &str, content: Option<&str>) -> Module {
    Module {
        id: id.to_string(),
        course_id: "c1".to_string(),
        teacher_id: "t1".to_string(),
        title: title.to_string(),
        content: content.map(|c| c.to_string()),
        extra: Default::default(),
    }
}

fn course(id: &str, title: &str) -> Course {
    Course {
        id: id.to_string(),
        teacher_id: "t1".to_string(),
        title: title.to_string(),
        extra: Default::default(),
    }
}

#[test]
fn test_add_dialog_walkthrough() {
    let state = AppState::at_route(Route::Dashboard);

    // Open, type a title, hand focus to the content area.
    let state = reduce(
        state,
        Action::FormOpened {
            mode: FormMode::Add,
            title: String::new(),
        },
    );
    let state = reduce(state, Action::FormTitleInput('H'));
    let state = reduce(state, Action::FormTitleInput('i'));
    let state = reduce(state, Action::FormFocusContent);

    let form = state.form.as_ref().expect("dialog should be open");
    assert_eq!(form.title, "Hi");
    assert_eq!(form.focus, FormField::Content);

    // Content keys belong to the textarea now.
    let typed = key_event(KeyCode::Char('x'), KeyModifiers::NONE);
    assert!(textarea_captures(&state, &typed));

    // Ctrl+S still reaches the keymap as a submit.
    let submit = key_event(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert!(!textarea_captures(&state, &submit));
    assert_eq!(keymap(&state, submit), Action::SubmitForm);

    // Closing drops the dialog.
    let state = reduce(state, Action::FormClosed);
    assert!(state.form.is_none());
}

#[test]
fn test_edit_dialog_keeps_module_identity() {
    let state = AppState::at_route(Route::Dashboard);
    let state = reduce(
        state,
        Action::FormOpened {
            mode: FormMode::Edit {
                module_id: "m42".to_string(),
            },
            title: "Existing title".to_string(),
        },
    );

    let state = reduce(state, Action::FormTitleInput('!'));
    let form = state.form.as_ref().expect("dialog should be open");

    assert_eq!(form.title, "Existing title!");
    assert_eq!(
        form.mode,
        FormMode::Edit {
            module_id: "m42".to_string()
        }
    );
}

#[test]
fn test_textarea_round_trips_module_content() {
    let content = "First line\nSecond line";
    let textarea = TextArea::from(content.lines());

    assert_eq!(textarea.lines().len(), 2);
    assert_eq!(textarea.lines().join("\n"), content);
}

#[test]
fn test_textarea_edits_collect_into_content() {
    let mut textarea = TextArea::default();
    textarea.insert_str("Hello");
    textarea.insert_char('\n');
    textarea.insert_str("World");

    assert_eq!(textarea.lines().join("\n"), "Hello\nWorld");
}

#[test]
fn test_textarea_releases_dialog_keys() {
    let state = AppState::at_route(Route::Dashboard);
    let state = reduce(
        state,
        Action::FormOpened {
            mode: FormMode::Add,
            title: "T".to_string(),
        },
    );
    let state = reduce(state, Action::FormFocusContent);

    let esc = key_event(KeyCode::Esc, KeyModifiers::NONE);
    assert!(!textarea_captures(&state, &esc));
    assert_eq!(keymap(&state, esc), Action::FormClosed);

    let back = key_event(KeyCode::BackTab, KeyModifiers::SHIFT);
    assert!(!textarea_captures(&state, &back));
    assert_eq!(keymap(&state, back), Action::FormFocusTitle);
}

#[test]
fn test_filter_is_case_insensitive_on_titles() {
    let modules = vec![
        module("m1", "Intro to Rust", None),
        module("m2", "Advanced Rust", None),
        module("m3", "Databases", None),
    ];

    let hits = filter_modules(&modules, "rust");
    assert_eq!(hits.len(), 2);

    let hits = filter_modules(&modules, "  DATA  ");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "m3");

    // Blank filter keeps everything.
    let hits = filter_modules(&modules, "");
    assert_eq!(hits.len(), 3);
}

#[test]
fn test_cursor_follows_the_filtered_list() {
    let modules = vec![
        module("m1", "Intro to Rust", None),
        module("m2", "Advanced Rust", None),
        module("m3", "Databases", None),
    ];

    // Cursor positions index into the filtered list, not the full one.
    let hit = module_at_cursor(&modules, "rust", 1).expect("second match");
    assert_eq!(hit.id, "m2");

    // Out-of-range cursors clamp to the last entry.
    let hit = module_at_cursor(&modules, "rust", 9).expect("clamped match");
    assert_eq!(hit.id, "m2");
    assert_eq!(clamped_cursor(2, 9), 1);

    // Nothing matches, nothing selected.
    assert!(module_at_cursor(&modules, "zzz", 0).is_none());
    assert_eq!(clamped_cursor(0, 3), 0);
}

#[test]
fn test_course_cycling_wraps_around() {
    let courses = vec![course("c1", "Rust 101"), course("c2", "Rust 201")];

    assert_eq!(next_course_id(&courses, None).as_deref(), Some("c1"));
    assert_eq!(next_course_id(&courses, Some("c1")).as_deref(), Some("c2"));
    assert_eq!(next_course_id(&courses, Some("c2")).as_deref(), Some("c1"));

    // An id that no longer exists restarts from the first course.
    assert_eq!(next_course_id(&courses, Some("gone")).as_deref(), Some("c1"));

    assert_eq!(next_course_id(&[], None), None);
}
