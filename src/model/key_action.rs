//! Domain-level keyboard actions.
//!
//! Keyboard events are translated to these actions through
//! [`crate::config::KeyBindings`]; the shell dispatches on the action, never
//! on raw key codes.

/// Actions the user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the cursor up one row.
    CursorUp,
    /// Move the cursor down one row.
    CursorDown,
    /// Jump the cursor to the first row.
    CursorTop,
    /// Jump the cursor to the last row.
    CursorBottom,
    /// Activate the row under the cursor: toggle a folder open/closed, or
    /// retry when the cursor is on an error row.
    Activate,
    /// Retry the failed fetch at the cursor (error row, or a folder whose
    /// last fetch failed).
    Retry,
    /// Discard all tree state and reload the root listing (remount).
    ReloadRoot,
    /// Toggle the help overlay.
    Help,
    /// Quit the application.
    Quit,
}
