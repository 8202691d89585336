//! The task form: two inputs and the submit rule.
//!
//! Submission trims both inputs and only creates a task when both are
//! non-empty. A rejected submission is silent and leaves the inputs as typed.

use crate::{error::StoreError, input::InputField, storage::KeyValueStore, store::TaskStore, task::Task};

/// Inputs of the form, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Tag,
}

/// Form state for creating tasks.
#[derive(Clone, Debug)]
pub struct TaskForm {
    pub name: InputField,
    pub tag: InputField,
    pub current_field: FormField,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    /// Create an empty form with the name input focused.
    pub fn new() -> Self {
        let mut form = TaskForm {
            name: InputField::new(),
            tag: InputField::new(),
            current_field: FormField::Name,
        };
        form.update_active_field();
        form
    }

    /// Focus the name input.
    pub fn focus_name(&mut self) {
        self.current_field = FormField::Name;
        self.update_active_field();
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            FormField::Name => FormField::Tag,
            FormField::Tag => FormField::Name,
        };
        self.update_active_field();
    }

    /// Move to the previous field in the form. With two fields this is the
    /// same as moving forward.
    pub fn prev_field(&mut self) {
        self.next_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.name.active = self.current_field == FormField::Name;
        self.tag.active = self.current_field == FormField::Tag;
    }

    fn current_mut(&mut self) -> &mut InputField {
        match self.current_field {
            FormField::Name => &mut self.name,
            FormField::Tag => &mut self.tag,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        self.current_mut().handle_char(c);
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        self.current_mut().handle_backspace();
    }

    /// Handle delete input for the currently active field.
    pub fn handle_delete(&mut self) {
        self.current_mut().handle_delete();
    }

    /// Handle left/right arrow keys for cursor movement.
    pub fn handle_left_right(&mut self, right: bool) {
        let field = self.current_mut();
        if right {
            field.move_cursor_right();
        } else {
            field.move_cursor_left();
        }
    }

    /// Submit the form against `store`.
    ///
    /// Returns the created task, or `None` when either input is blank after
    /// trimming. On success both inputs are cleared and the name input gets
    /// focus back.
    pub fn submit<S: KeyValueStore>(&mut self, store: &mut TaskStore<S>) -> Result<Option<Task>, StoreError> {
        let name = self.name.trimmed();
        let tag = self.tag.trimmed();
        if name.is_empty() || tag.is_empty() {
            return Ok(None);
        }

        let task = store.add(name, tag)?;
        self.name.clear();
        self.tag.clear();
        self.focus_name();
        Ok(Some(task))
    }
}
