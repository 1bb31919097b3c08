//! Pure reducer and keymap for the shell
//!
//! The reducer is a pure function `(State, Action) -> State` with no
//! side effects. Keyboard input is translated first by [`keymap`] into
//! a semantic [`Action`]; the event loop feeds that action to the
//! reducer and then matches on it for side effects, so a key press and
//! its effect can never disagree.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::Action;
use super::state::{AppState, FormField, LoginField, ModuleForm, RegisterField};
use crate::router::Route;

/// Pure reducer function
///
/// Takes current state and an action, returns new state. Marker
/// actions pass through unchanged; the event loop owns their effects.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Tick => state,
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Navigation ===
        // A route change drops everything transient on the old screen.
        Action::NavigateTo(route) => AppState {
            route,
            form: None,
            search: String::new(),
            search_active: false,
            cursor: 0,
            status: None,
            ..state
        },

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Auth Forms ===
        Action::FocusNext => focus_auth_field(state, true),
        Action::FocusPrev => focus_auth_field(state, false),

        Action::FieldInput(c) => edit_auth_field(state, Some(c)),
        Action::FieldBackspace => edit_auth_field(state, None),

        Action::SubmitLogin | Action::SubmitRegister => state,

        // === Dashboard ===
        Action::SearchOpened => AppState {
            search_active: true,
            ..state
        },

        Action::SearchClosed => AppState {
            search_active: false,
            ..state
        },

        Action::SearchInput(c) => {
            let mut search = state.search.clone();
            search.push(c);
            // The filter changed, so the old cursor points at nothing.
            AppState {
                search,
                cursor: 0,
                ..state
            }
        }

        Action::SearchBackspace => {
            let mut search = state.search.clone();
            search.pop();
            AppState {
                search,
                cursor: 0,
                ..state
            }
        }

        Action::CursorUp => AppState {
            cursor: state.cursor.saturating_sub(1),
            ..state
        },

        Action::CursorDown => AppState {
            cursor: state.cursor.saturating_add(1),
            ..state
        },

        Action::CursorReset => AppState { cursor: 0, ..state },

        Action::SelectNextCourse | Action::RefreshRequested | Action::LogoutRequested => state,

        // === Module Form ===
        Action::AddRequested | Action::EditRequested | Action::DeleteAtCursor => state,

        Action::FormOpened { mode, title } => AppState {
            form: Some(ModuleForm {
                mode,
                title,
                focus: FormField::Title,
            }),
            status: None,
            ..state
        },

        Action::FormTitleInput(c) => {
            let mut form = state.form.clone();
            if let Some(form) = form.as_mut() {
                form.title.push(c);
            }
            AppState { form, ..state }
        }

        Action::FormTitleBackspace => {
            let mut form = state.form.clone();
            if let Some(form) = form.as_mut() {
                form.title.pop();
            }
            AppState { form, ..state }
        }

        Action::FormFocusContent => focus_form_field(state, FormField::Content),
        Action::FormFocusTitle => focus_form_field(state, FormField::Title),

        Action::FormEdited => state,

        Action::SubmitForm => state,

        Action::FormClosed => AppState { form: None, ..state },

        // === Status Line ===
        Action::SetStatus(message) => AppState {
            status: Some(message),
            ..state
        },

        Action::ClearStatus => AppState {
            status: None,
            ..state
        },
    }
}

fn focus_auth_field(state: AppState, forward: bool) -> AppState {
    match state.route {
        Route::Login => {
            let mut login = state.login.clone();
            // Two fields, so next and previous are the same move.
            login.focus = match login.focus {
                LoginField::Email => LoginField::Password,
                LoginField::Password => LoginField::Email,
            };
            AppState { login, ..state }
        }
        Route::Register => {
            let mut register = state.register.clone();
            register.focus = match (register.focus, forward) {
                (RegisterField::Name, true) => RegisterField::Email,
                (RegisterField::Email, true) => RegisterField::Password,
                (RegisterField::Password, true) => RegisterField::Name,
                (RegisterField::Name, false) => RegisterField::Password,
                (RegisterField::Email, false) => RegisterField::Name,
                (RegisterField::Password, false) => RegisterField::Email,
            };
            AppState { register, ..state }
        }
        _ => state,
    }
}

/// Push a character into the focused auth field, or pop one when
/// `input` is `None`.
fn edit_auth_field(state: AppState, input: Option<char>) -> AppState {
    match state.route {
        Route::Login => {
            let mut login = state.login.clone();
            let field = match login.focus {
                LoginField::Email => &mut login.email,
                LoginField::Password => &mut login.password,
            };
            match input {
                Some(c) => field.push(c),
                None => {
                    field.pop();
                }
            }
            AppState { login, ..state }
        }
        Route::Register => {
            let mut register = state.register.clone();
            let field = match register.focus {
                RegisterField::Name => &mut register.name,
                RegisterField::Email => &mut register.email,
                RegisterField::Password => &mut register.password,
            };
            match input {
                Some(c) => field.push(c),
                None => {
                    field.pop();
                }
            }
            AppState { register, ..state }
        }
        _ => state,
    }
}

fn focus_form_field(state: AppState, focus: FormField) -> AppState {
    let mut form = state.form.clone();
    if let Some(form) = form.as_mut() {
        form.focus = focus;
    }
    AppState { form, ..state }
}

/// Map a key press to an action for the current state
///
/// This is where keybindings are defined. Keys that mean nothing in the
/// current context map to [`Action::Tick`].
pub fn keymap(state: &AppState, key: KeyEvent) -> Action {
    // Ctrl+C always quits.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if state.help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => Action::HideHelp,
            _ => Action::Tick,
        };
    }

    if key.code == KeyCode::F(1) {
        return Action::ShowHelp;
    }

    match state.route {
        Route::Home => home_key(key),
        Route::Login | Route::Register => auth_key(state, key),
        Route::Dashboard => dashboard_key(state, key),
    }
}

/// Should the textarea consume this key instead of the keymap?
///
/// True only while the module dialog's content area has focus, and
/// never for the keys that control the dialog itself.
pub fn textarea_captures(state: &AppState, key: &KeyEvent) -> bool {
    if state.help_visible {
        return false;
    }
    let Some(form) = &state.form else {
        return false;
    };
    if form.focus != FormField::Content {
        return false;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    !matches!(
        (key.code, ctrl),
        (KeyCode::Esc, _)
            | (KeyCode::BackTab, _)
            | (KeyCode::Char('s'), true)
            | (KeyCode::Char('c'), true)
    )
}

fn plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn home_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('l') => Action::NavigateTo(Route::Login),
        KeyCode::Char('r') => Action::NavigateTo(Route::Register),
        KeyCode::Char('d') => Action::NavigateTo(Route::Dashboard),
        _ => Action::Tick,
    }
}

fn auth_key(state: &AppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::NavigateTo(Route::Home),
        KeyCode::Tab | KeyCode::Down => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,
        KeyCode::Enter => {
            if state.route == Route::Login {
                Action::SubmitLogin
            } else {
                Action::SubmitRegister
            }
        }
        KeyCode::Backspace => Action::FieldBackspace,
        KeyCode::Char(c) if plain(&key) => Action::FieldInput(c),
        _ => Action::Tick,
    }
}

fn dashboard_key(state: &AppState, key: KeyEvent) -> Action {
    if let Some(form) = &state.form {
        // Ctrl+S submits from either field.
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::SubmitForm;
        }
        return match (form.focus, key.code) {
            (_, KeyCode::Esc) => Action::FormClosed,
            (FormField::Title, KeyCode::Tab | KeyCode::Enter | KeyCode::Down) => {
                Action::FormFocusContent
            }
            (FormField::Title, KeyCode::Backspace) => Action::FormTitleBackspace,
            (FormField::Title, KeyCode::Char(c)) if plain(&key) => Action::FormTitleInput(c),
            // Everything else for the content area went to the textarea.
            (FormField::Content, KeyCode::BackTab) => Action::FormFocusTitle,
            _ => Action::Tick,
        };
    }

    if state.search_active {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::SearchClosed,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char(c) if plain(&key) => Action::SearchInput(c),
            _ => Action::Tick,
        };
    }

    match key.code {
        KeyCode::Char('q') if plain(&key) => Action::Quit,
        KeyCode::Char('/') => Action::SearchOpened,
        KeyCode::Char('a') if plain(&key) => Action::AddRequested,
        KeyCode::Char('e') if plain(&key) => Action::EditRequested,
        KeyCode::Char('d') if plain(&key) => Action::DeleteAtCursor,
        KeyCode::Char('r') if plain(&key) => Action::RefreshRequested,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Tab => Action::SelectNextCourse,
        KeyCode::Char('L') => Action::LogoutRequested,
        KeyCode::Esc => Action::ClearStatus,
        _ => Action::Tick,
    }
}
