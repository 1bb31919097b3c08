//! Actions for the reducer pattern
//!
//! All shell state transitions are triggered by actions. Keyboard input
//! is translated into these by the keymap (see `reducer.rs`), so the
//! event loop can match on the same action it feeds to the reducer when
//! an action needs a side effect.
//!
//! Variants marked "marker" leave the state untouched; the event loop
//! resolves them against the store and spawns the matching operation.

use super::state::FormMode;
use crate::router::Route;

/// Actions that trigger shell state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === UI Events ===
    /// Periodic tick; also used for keys that mean nothing right now
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Switch to a different route
    NavigateTo(Route),

    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    // === Auth Forms ===
    /// Move focus to the next field of the visible auth form
    FocusNext,

    /// Move focus to the previous field
    FocusPrev,

    /// Type a character into the focused field
    FieldInput(char),

    /// Delete the last character of the focused field
    FieldBackspace,

    /// Marker; the loop reads the login form and starts the request
    SubmitLogin,

    /// Marker; the loop reads the registration form and starts the request
    SubmitRegister,

    // === Dashboard ===
    /// Search box starts capturing keys
    SearchOpened,

    /// Search box stops capturing keys (the filter stays applied)
    SearchClosed,

    /// Type a character into the search box
    SearchInput(char),

    /// Delete the last character of the search box
    SearchBackspace,

    /// Move the card cursor up
    CursorUp,

    /// Move the card cursor down
    CursorDown,

    /// Reset the card cursor to the top
    CursorReset,

    /// Marker; cycle the selected course
    SelectNextCourse,

    /// Marker; refetch the selected course's modules
    RefreshRequested,

    /// Marker; clear the session and sign out
    LogoutRequested,

    // === Module Form ===
    /// Marker; open an empty add dialog
    AddRequested,

    /// Marker; open an edit dialog prefilled from the card under the cursor
    EditRequested,

    /// Marker; delete the module under the cursor
    DeleteAtCursor,

    /// Dialog opened with the given mode and title
    FormOpened { mode: FormMode, title: String },

    /// Type a character into the dialog title
    FormTitleInput(char),

    /// Delete the last character of the dialog title
    FormTitleBackspace,

    /// Move dialog focus to the content area
    FormFocusContent,

    /// Move dialog focus back to the title
    FormFocusTitle,

    /// The textarea consumed the key; nothing for the reducer to do
    FormEdited,

    /// Marker; the loop reads the dialog and starts the request
    SubmitForm,

    /// Close the dialog without submitting
    FormClosed,

    // === Status Line ===
    /// Update the status message
    SetStatus(String),

    /// Clear the status message
    ClearStatus,
}
