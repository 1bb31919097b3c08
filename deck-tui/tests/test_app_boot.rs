//! Test application initialization and boot sequence
//!
//! Verifies that the shell initializes with correct defaults based on
//! environment variables and the requested route.

use deck_tui::app::{AppState, LoginField, RegisterField};
use deck_tui::router::Route;
use serial_test::serial;

#[test]
fn test_app_initializes_to_home_route() {
    let state = AppState::new();

    assert_eq!(state.route, Route::Home);
    assert!(!state.should_quit);
}

#[test]
fn test_at_route_starts_on_requested_route() {
    let state = AppState::at_route(Route::Dashboard);

    assert_eq!(state.route, Route::Dashboard);
}

#[test]
fn test_help_hidden_by_default() {
    let state = AppState::new();

    assert!(!state.help_visible);
}

#[test]
fn test_no_status_on_boot() {
    let state = AppState::new();

    assert!(state.status.is_none());
}

#[test]
fn test_auth_forms_start_empty() {
    let state = AppState::new();

    assert_eq!(state.login.email, "");
    assert_eq!(state.login.password, "");
    assert_eq!(state.login.focus, LoginField::Email);

    assert_eq!(state.register.name, "");
    assert_eq!(state.register.email, "");
    assert_eq!(state.register.password, "");
    assert_eq!(state.register.focus, RegisterField::Name);
}

#[test]
fn test_dashboard_state_starts_clean() {
    let state = AppState::new();

    assert_eq!(state.search, "");
    assert!(!state.search_active);
    assert_eq!(state.cursor, 0);
    assert!(state.form.is_none());
}

#[test]
#[serial] // Serialize env var tests to avoid conflicts
fn test_colors_disabled_with_no_color_env() {
    std::env::set_var("NO_COLOR", "1");
    let state = AppState::new();
    std::env::remove_var("NO_COLOR");

    assert!(!state.config.colors_enabled);
}

#[test]
#[serial]
fn test_colors_disabled_with_deck_tui_no_color_env() {
    std::env::set_var("DECK_TUI_NO_COLOR", "1");
    let state = AppState::new();
    std::env::remove_var("DECK_TUI_NO_COLOR");

    assert!(!state.config.colors_enabled);
}

#[test]
#[serial]
fn test_tick_rate_from_env() {
    std::env::set_var("DECK_TUI_TICK_MS", "250");
    let state = AppState::new();
    std::env::remove_var("DECK_TUI_TICK_MS");

    assert_eq!(state.config.tick_rate_ms, 250);
}

#[test]
#[serial]
fn test_tick_rate_default_100ms() {
    std::env::remove_var("DECK_TUI_TICK_MS");
    let state = AppState::new();

    assert_eq!(state.config.tick_rate_ms, 100);
}

#[test]
fn test_route_parsing_for_startup_flag() {
    assert_eq!(Route::parse("/"), Some(Route::Home));
    assert_eq!(Route::parse("/login"), Some(Route::Login));
    assert_eq!(Route::parse("/register"), Some(Route::Register));
    assert_eq!(Route::parse("/dashboard"), Some(Route::Dashboard));
    assert_eq!(Route::parse("/nope"), None);

    // Unknown paths fall back to home rather than failing startup.
    assert_eq!(Route::parse_or_home("/nope"), Route::Home);
}
