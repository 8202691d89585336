//! Enumerations for TUI state management.

/// Which part of the screen receives key presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    /// The form; the form itself tracks name vs tag.
    Form,
    TaskList,
}
