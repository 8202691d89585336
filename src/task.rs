//! Task data structure.
//!
//! A task is the only entity: a name, a free-form tag, the creation date and a
//! completion flag. The serialized field names are the persisted record layout.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub tag: String,
    /// Creation date as `DD/MM/YYYY`, fixed at creation.
    pub date: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Build an open task, trimming name and tag.
    pub fn new(id: u64, name: &str, tag: &str, created: NaiveDate) -> Self {
        Task {
            id,
            name: name.trim().to_string(),
            tag: tag.trim().to_string(),
            date: format_date(created),
            completed: false,
        }
    }
}

/// Format a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
