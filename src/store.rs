//! The task store: in-memory collection, id counter, and persistence.
//!
//! Every mutating operation ends by rewriting both storage keys, so the
//! persisted state always matches memory once a call returns.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::storage::KeyValueStore;
use crate::task::{today, Task};

/// Storage key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "tasks";
/// Storage key holding the next id, as decimal text.
pub const COUNTER_KEY: &str = "taskIdCounter";

/// Ordered task collection persisted through a `KeyValueStore`.
#[derive(Debug)]
pub struct TaskStore<S> {
    storage: S,
    tasks: Vec<Task>,
    next_id: u64,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Create an empty store over `storage`. Nothing is read until `load`.
    pub fn new(storage: S) -> Self {
        TaskStore {
            storage,
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Restore tasks and counter from storage.
    ///
    /// Absent or malformed values leave the in-memory state untouched. A task
    /// list holding the largest possible id counts as malformed, since no id
    /// could follow it. The counter is then raised past the highest loaded id
    /// so a stale counter cannot hand out an id twice.
    pub fn load(&mut self) -> Result<(), StoreError> {
        if let Some(raw) = self.storage.get_item(TASKS_KEY)? {
            match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) if id_floor(&tasks).is_some() => self.tasks = tasks,
                Ok(_) => warn!("stored tasks use the largest possible id, ignoring them"),
                Err(e) => warn!(error = %e, "stored tasks are malformed, ignoring them"),
            }
        }

        if let Some(raw) = self.storage.get_item(COUNTER_KEY)? {
            match raw.trim().parse::<u64>() {
                Ok(n) if n >= 1 => self.next_id = n,
                _ => warn!(value = %raw, "stored task counter is malformed, ignoring it"),
            }
        }

        let floor = id_floor(&self.tasks).unwrap_or(u64::MAX);
        if self.next_id < floor {
            debug!(stored = self.next_id, derived = floor, "raising task counter past loaded ids");
            self.next_id = floor;
        }

        info!(tasks = self.tasks.len(), next_id = self.next_id, "loaded tasks");
        Ok(())
    }

    /// Persist the full collection and the counter.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let data = serde_json::to_string(&self.tasks).map_err(StoreError::Encode)?;
        self.storage.set_item(TASKS_KEY, &data)?;
        self.storage.set_item(COUNTER_KEY, &self.next_id.to_string())?;
        Ok(())
    }

    /// Append a new task dated today and persist.
    pub fn add(&mut self, name: &str, tag: &str) -> Result<Task, StoreError> {
        self.add_on(name, tag, today())
    }

    /// Append a new task with an explicit creation date and persist.
    ///
    /// If the write fails the task is dropped again and the counter restored,
    /// so memory never holds a task that storage does not.
    pub fn add_on(&mut self, name: &str, tag: &str, created: NaiveDate) -> Result<Task, StoreError> {
        let id = self.next_id;
        let next = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        let task = Task::new(id, name, tag, created);
        self.next_id = next;
        self.tasks.push(task.clone());
        if let Err(e) = self.save() {
            self.tasks.pop();
            self.next_id = id;
            return Err(e);
        }
        info!(id = task.id, tag = %task.tag, "added task");
        Ok(task)
    }

    /// Mark the task with `id` completed and persist.
    ///
    /// Returns whether a task matched. An unknown id changes nothing and
    /// writes nothing. A failed write leaves the task as it was.
    pub fn complete_by_id(&mut self, id: u64) -> Result<bool, StoreError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "complete requested for unknown task");
            return Ok(false);
        };
        let was_completed = std::mem::replace(&mut self.tasks[index].completed, true);
        if let Err(e) = self.save() {
            self.tasks[index].completed = was_completed;
            return Err(e);
        }
        info!(id, "completed task");
        Ok(true)
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Id the next created task will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Give back the storage, e.g. to reload it into a fresh store.
    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Smallest id not yet taken by `tasks`, or `None` when the id space is used up.
fn id_floor(tasks: &[Task]) -> Option<u64> {
    tasks.iter().map(|t| t.id).max().unwrap_or(0).checked_add(1)
}
