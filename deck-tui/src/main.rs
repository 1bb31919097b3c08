//! deck-tui - Terminal dashboard for Coursedeck
//!
//! Keyboard-driven interface for managing courses and their modules
//! against the course service. Server data flows through the
//! libcoursedeck store; the event loop drains it once per tick and
//! reacts to the actions it applied.

use std::path::PathBuf;

use clap::Parser;

use deck_tui::app::event::{EventHandler, TuiEvent};
use deck_tui::app::{keymap, reduce, textarea_captures, Action, AppState, FormField, FormMode};
use deck_tui::error::Result;
use deck_tui::router::Route;
use deck_tui::services::StoreHandle;
use deck_tui::terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui};
use deck_tui::ui;
use deck_tui::ui::dashboard::{module_at_cursor, next_course_id};

use libcoursedeck::store::courses::CoursesAction;
use libcoursedeck::store::user::UserAction;
use libcoursedeck::types::{Credentials, ModuleDraft, ModuleUpdate, Registration};
use libcoursedeck::{Config, Store};

#[derive(Parser, Debug)]
#[command(name = "deck-tui", version, about = "Terminal dashboard for Coursedeck")]
struct Cli {
    /// Route to open at startup (/, /login, /register, /dashboard)
    #[arg(long, default_value = "/")]
    route: String,

    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would corrupt the alternate screen, so logging stays
    // off unless explicitly requested.
    if std::env::var_os("COURSEDECK_LOG_LEVEL").is_some() {
        libcoursedeck::logging::init_from_env();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_default()?,
    };

    let initial_route = Route::parse_or_home(&cli.route);

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &config, initial_route);

    restore_terminal(terminal)?;
    result
}

fn run_app(terminal: &mut Tui, config: &Config, initial_route: Route) -> Result<()> {
    let mut store = Store::new();
    let handle = StoreHandle::new(store.dispatcher(), config)?;
    let events = handle.bridge_events(&store);

    let mut state = AppState::at_route(initial_route);

    // Pick up a cached identity before the first frame.
    if let Some(info) = handle.restore_session() {
        handle.dispatcher().dispatch(UserAction::Restored { info });
        store.drain();
        if state.route == Route::Dashboard {
            handle.fetch_courses();
            handle.fetch_profile();
        }
    }

    let mut textarea = tui_textarea::TextArea::default();
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        style_textarea(&mut textarea, &state);

        terminal.draw(|frame| {
            ui::render(frame, &state, store.state(), &textarea);
        })?;

        let tui_event = event_handler.next()?;

        let action = match tui_event {
            TuiEvent::Key(key) => {
                if textarea_captures(&state, &key) {
                    textarea.input(key);
                    Action::FormEdited
                } else {
                    keymap(&state, key)
                }
            }
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        };

        state = reduce(state, action.clone());

        // Apply operation outcomes, then react to everything the store
        // announced. Bridged actions can arrive a tick after they were
        // applied; polling both every tick keeps them flowing.
        store.drain();
        while let Ok(applied) = events.try_recv() {
            state = react(state, &applied, &handle, &store);
        }

        state = effect(state, action, &handle, &store, &mut textarea);

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Follow-ups for actions the store applied: navigation after auth,
/// auto-selecting the first course, fetching modules on selection.
fn react(
    state: AppState,
    applied: &libcoursedeck::Action,
    handle: &StoreHandle,
    store: &Store,
) -> AppState {
    match applied {
        libcoursedeck::Action::User(UserAction::LoginFulfilled { .. }) => {
            handle.fetch_courses();
            handle.fetch_profile();
            reduce(state, Action::NavigateTo(Route::Dashboard))
        }

        libcoursedeck::Action::User(UserAction::RegisterFulfilled { .. }) => {
            // The success banner rides on the user slice and shows on
            // the sign-in screen.
            reduce(state, Action::NavigateTo(Route::Login))
        }

        libcoursedeck::Action::User(UserAction::LoggedOut) => {
            let state = reduce(state, Action::NavigateTo(Route::Login));
            reduce(state, Action::SetStatus("Signed out".to_string()))
        }

        libcoursedeck::Action::Courses(CoursesAction::FetchFulfilled { courses, .. }) => {
            if store.state().courses.selected.is_none() {
                if let Some(first) = courses.first() {
                    handle.select_course(&first.id);
                }
            }
            state
        }

        libcoursedeck::Action::Courses(CoursesAction::CourseSelected { course_id }) => {
            handle.fetch_modules(course_id);
            reduce(state, Action::CursorReset)
        }

        _ => state,
    }
}

/// Side effects for marker actions out of the keymap.
fn effect(
    state: AppState,
    action: Action,
    handle: &StoreHandle,
    store: &Store,
    textarea: &mut tui_textarea::TextArea<'static>,
) -> AppState {
    match action {
        Action::SubmitLogin => {
            let email = state.login.email.trim().to_string();
            if email.is_empty() || state.login.password.is_empty() {
                return reduce(
                    state,
                    Action::SetStatus("Email and password are required".to_string()),
                );
            }
            handle.login(Credentials::new(&email, &state.login.password));
            state
        }

        Action::SubmitRegister => {
            let form = &state.register;
            if form.name.trim().is_empty()
                || form.email.trim().is_empty()
                || form.password.is_empty()
            {
                return reduce(state, Action::SetStatus("All fields are required".to_string()));
            }
            handle.register(Registration::new(
                form.name.trim(),
                form.email.trim(),
                &form.password,
            ));
            state
        }

        Action::LogoutRequested => {
            handle.logout();
            state
        }

        Action::RefreshRequested => {
            if let Some(course_id) = store.state().courses.selected.clone() {
                handle.fetch_modules(&course_id);
            }
            state
        }

        Action::SelectNextCourse => {
            let courses = &store.state().courses;
            if let Some(next) = next_course_id(&courses.courses, courses.selected.as_deref()) {
                handle.select_course(&next);
            }
            state
        }

        Action::AddRequested => {
            if store.state().courses.selected.is_none() {
                return reduce(state, Action::SetStatus("Select a course first".to_string()));
            }
            *textarea = tui_textarea::TextArea::default();
            reduce(
                state,
                Action::FormOpened {
                    mode: FormMode::Add,
                    title: String::new(),
                },
            )
        }

        Action::EditRequested => {
            let root = store.state();
            match module_at_cursor(&root.modules.modules, &state.search, state.cursor) {
                Some(module) => {
                    *textarea = match &module.content {
                        Some(content) => tui_textarea::TextArea::from(content.lines()),
                        None => tui_textarea::TextArea::default(),
                    };
                    let mode = FormMode::Edit {
                        module_id: module.id.clone(),
                    };
                    let title = module.title.clone();
                    reduce(state, Action::FormOpened { mode, title })
                }
                None => state,
            }
        }

        Action::DeleteAtCursor => {
            let root = store.state();
            if let Some(module) =
                module_at_cursor(&root.modules.modules, &state.search, state.cursor)
            {
                handle.delete_module(&module.id);
            }
            state
        }

        Action::SubmitForm => submit_form(state, handle, store, textarea),

        _ => state,
    }
}

fn submit_form(
    state: AppState,
    handle: &StoreHandle,
    store: &Store,
    textarea: &mut tui_textarea::TextArea<'static>,
) -> AppState {
    let Some(form) = state.form.clone() else {
        return state;
    };

    let title = form.title.trim().to_string();
    if title.is_empty() {
        return reduce(state, Action::SetStatus("Title is required".to_string()));
    }

    let root = store.state();
    let Some(course_id) = root.courses.selected.clone() else {
        return reduce(state, Action::SetStatus("Select a course first".to_string()));
    };
    let Some(teacher_id) = root.user.teacher_id().map(|s| s.to_string()) else {
        return reduce(state, Action::SetStatus("Sign in first".to_string()));
    };

    let content = textarea.lines().join("\n");

    match form.mode {
        FormMode::Add => {
            let mut draft = ModuleDraft::new(&course_id, &teacher_id, &title);
            if !content.trim().is_empty() {
                draft = draft.with_content(&content);
            }
            handle.add_module(draft);
        }
        FormMode::Edit { module_id } => {
            let mut update = ModuleUpdate::new(&course_id, &teacher_id);
            update.title = Some(title);
            update.content = Some(content);
            handle.update_module(&module_id, update);
        }
    }

    *textarea = tui_textarea::TextArea::default();
    reduce(state, Action::FormClosed)
}

/// The textarea carries its own border; restyle it to match the
/// dialog's focus before each frame.
fn style_textarea(textarea: &mut tui_textarea::TextArea<'static>, state: &AppState) {
    use ratatui::style::{Color, Style};
    use ratatui::widgets::{Block, Borders};

    let focused = state
        .form
        .as_ref()
        .map(|form| form.focus == FormField::Content)
        .unwrap_or(false);

    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    textarea.set_block(
        Block::default()
            .title(" Content ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    textarea.set_placeholder_text("Module content (optional)");
}
