//! Test keybinding translation to actions
//!
//! Verifies that keyboard input maps to the right action for the
//! route and focus the shell is currently in.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deck_tui::app::{keymap, reduce, Action, AppState, FormMode};
use deck_tui::router::Route;

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn test_ctrl_c_quits_from_any_route() {
    for route in [Route::Home, Route::Login, Route::Register, Route::Dashboard] {
        let state = AppState::at_route(route);
        let key = key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(keymap(&state, key), Action::Quit);
    }
}

#[test]
fn test_q_quits_from_home() {
    let state = AppState::new();
    let key = key_event(KeyCode::Char('q'), KeyModifiers::NONE);

    let action = keymap(&state, key);
    let new_state = reduce(state, action);

    assert!(new_state.should_quit);
}

#[test]
fn test_home_keys_navigate() {
    let state = AppState::new();

    let login = key_event(KeyCode::Char('l'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, login), Action::NavigateTo(Route::Login));

    let register = key_event(KeyCode::Char('r'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, register), Action::NavigateTo(Route::Register));

    let dashboard = key_event(KeyCode::Char('d'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, dashboard), Action::NavigateTo(Route::Dashboard));
}

#[test]
fn test_f1_opens_help_and_esc_closes_it() {
    let state = AppState::new();
    assert!(!state.help_visible);

    let key = key_event(KeyCode::F(1), KeyModifiers::NONE);
    let action = keymap(&state, key);
    let state = reduce(state, action);
    assert!(state.help_visible);

    let key = key_event(KeyCode::Esc, KeyModifiers::NONE);
    let action = keymap(&state, key);
    let state = reduce(state, action);
    assert!(!state.help_visible);
}

#[test]
fn test_help_swallows_other_keys() {
    let mut state = AppState::new();
    state.help_visible = true;

    // 'l' would normally navigate; with help open it must not.
    let key = key_event(KeyCode::Char('l'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, key), Action::Tick);
}

#[test]
fn test_login_enter_submits() {
    let state = AppState::at_route(Route::Login);
    let key = key_event(KeyCode::Enter, KeyModifiers::NONE);

    assert_eq!(keymap(&state, key), Action::SubmitLogin);
}

#[test]
fn test_register_enter_submits() {
    let state = AppState::at_route(Route::Register);
    let key = key_event(KeyCode::Enter, KeyModifiers::NONE);

    assert_eq!(keymap(&state, key), Action::SubmitRegister);
}

#[test]
fn test_auth_tab_moves_focus() {
    let state = AppState::at_route(Route::Login);

    let key = key_event(KeyCode::Tab, KeyModifiers::NONE);
    assert_eq!(keymap(&state, key), Action::FocusNext);

    let key = key_event(KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(keymap(&state, key), Action::FocusPrev);
}

#[test]
fn test_auth_chars_feed_the_focused_field() {
    let state = AppState::at_route(Route::Login);
    let key = key_event(KeyCode::Char('a'), KeyModifiers::NONE);

    assert_eq!(keymap(&state, key), Action::FieldInput('a'));
}

#[test]
fn test_auth_ignores_ctrl_chars() {
    let state = AppState::at_route(Route::Login);
    let key = key_event(KeyCode::Char('a'), KeyModifiers::CONTROL);

    // Unbound control chords fall through to a tick.
    assert_eq!(keymap(&state, key), Action::Tick);
}

#[test]
fn test_auth_esc_returns_home() {
    let state = AppState::at_route(Route::Register);
    let key = key_event(KeyCode::Esc, KeyModifiers::NONE);

    assert_eq!(keymap(&state, key), Action::NavigateTo(Route::Home));
}

#[test]
fn test_dashboard_action_keys() {
    let state = AppState::at_route(Route::Dashboard);

    let add = key_event(KeyCode::Char('a'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, add), Action::AddRequested);

    let edit = key_event(KeyCode::Char('e'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, edit), Action::EditRequested);

    let delete = key_event(KeyCode::Char('d'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, delete), Action::DeleteAtCursor);

    let refresh = key_event(KeyCode::Char('r'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, refresh), Action::RefreshRequested);

    let logout = key_event(KeyCode::Char('L'), KeyModifiers::SHIFT);
    assert_eq!(keymap(&state, logout), Action::LogoutRequested);
}

#[test]
fn test_dashboard_slash_opens_filter() {
    let state = AppState::at_route(Route::Dashboard);
    let key = key_event(KeyCode::Char('/'), KeyModifiers::NONE);

    assert_eq!(keymap(&state, key), Action::SearchOpened);
}

#[test]
fn test_filter_captures_chars_while_active() {
    let state = AppState::at_route(Route::Dashboard);
    let state = reduce(state, Action::SearchOpened);

    // 'a' would normally open the add dialog; while filtering it types.
    let key = key_event(KeyCode::Char('a'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, key), Action::SearchInput('a'));

    let key = key_event(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(keymap(&state, key), Action::SearchClosed);
}

#[test]
fn test_dashboard_cursor_keys() {
    let state = AppState::at_route(Route::Dashboard);

    let down = key_event(KeyCode::Char('j'), KeyModifiers::NONE);
    assert_eq!(keymap(&state, down), Action::CursorDown);

    let up = key_event(KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(keymap(&state, up), Action::CursorUp);

    let next_course = key_event(KeyCode::Tab, KeyModifiers::NONE);
    assert_eq!(keymap(&state, next_course), Action::SelectNextCourse);
}

#[test]
fn test_form_ctrl_s_submits() {
    let state = AppState::at_route(Route::Dashboard);
    let state = reduce(
        state,
        Action::FormOpened {
            mode: FormMode::Add,
            title: String::new(),
        },
    );

    let key = key_event(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(keymap(&state, key), Action::SubmitForm);
}

#[test]
fn test_form_esc_cancels() {
    let state = AppState::at_route(Route::Dashboard);
    let state = reduce(
        state,
        Action::FormOpened {
            mode: FormMode::Add,
            title: String::new(),
        },
    );

    let key = key_event(KeyCode::Esc, KeyModifiers::NONE);
    let action = keymap(&state, key);
    assert_eq!(action, Action::FormClosed);

    let new_state = reduce(state, action);
    assert!(new_state.form.is_none());
}

#[test]
fn test_form_title_chars_type_into_title() {
    let state = AppState::at_route(Route::Dashboard);
    let state = reduce(
        state,
        Action::FormOpened {
            mode: FormMode::Add,
            title: String::new(),
        },
    );

    let key = key_event(KeyCode::Char('T'), KeyModifiers::SHIFT);
    assert_eq!(keymap(&state, key), Action::FormTitleInput('T'));
}
