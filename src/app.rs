//! Application state and start-up sequence.
//!
//! `App` owns the task store, the form and the latest rendered view. It is
//! created once per run by `App::bootstrap` and handed to whichever front end
//! is active.

use tracing::info;

use crate::{
    error::StoreError,
    form::TaskForm,
    input::InputField,
    render::{view, View},
    storage::KeyValueStore,
    store::TaskStore,
    task::Task,
};

/// Example tasks created on first run, in order. The last one starts completed.
pub const SEED_TASKS: [(&str, &str); 3] = [
    ("Implementar tela de listagem de tarefas", "frontend"),
    ("Criar endpoint para cadastro de tarefas", "backend"),
    ("Criar protótipo da listagem de tarefas", "ux"),
];

/// Running application state.
#[derive(Debug)]
pub struct App<S> {
    store: TaskStore<S>,
    pub form: TaskForm,
    view: View,
}

impl<S: KeyValueStore> App<S> {
    /// Load persisted tasks, seed examples when there are none, render, and
    /// focus the name input.
    pub fn bootstrap(storage: S) -> Result<Self, StoreError> {
        let mut store = TaskStore::new(storage);
        store.load()?;

        if store.tasks().is_empty() {
            seed(&mut store)?;
        }

        let view = view(store.tasks());
        let mut form = TaskForm::new();
        form.focus_name();

        Ok(App { store, form, view })
    }

    /// Submit the form. Re-renders only when a task was created.
    pub fn submit(&mut self) -> Result<Option<Task>, StoreError> {
        let created = self.form.submit(&mut self.store)?;
        if created.is_some() {
            self.refresh();
        }
        Ok(created)
    }

    /// Fill the form with `name` and `tag` and submit it.
    pub fn submit_values(&mut self, name: &str, tag: &str) -> Result<Option<Task>, StoreError> {
        self.form.name = InputField::with_value(name);
        self.form.tag = InputField::with_value(tag);
        self.form.update_active_field();
        self.submit()
    }

    /// Complete a task by id and re-render. Unknown ids change nothing.
    pub fn complete(&mut self, id: u64) -> Result<bool, StoreError> {
        let found = self.store.complete_by_id(id)?;
        self.refresh();
        Ok(found)
    }

    /// Rebuild the view from the current tasks.
    pub fn refresh(&mut self) {
        self.view = view(self.store.tasks());
    }

    /// Latest rendered view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Underlying task store.
    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Tear down, giving back the storage.
    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }
}

fn seed<S: KeyValueStore>(store: &mut TaskStore<S>) -> Result<(), StoreError> {
    let mut last = None;
    for (name, tag) in SEED_TASKS {
        last = Some(store.add(name, tag)?);
    }
    if let Some(task) = last {
        store.complete_by_id(task.id)?;
    }
    info!(count = SEED_TASKS.len(), "seeded example tasks");
    Ok(())
}
