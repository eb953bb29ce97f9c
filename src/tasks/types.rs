//! Task record and request payload types.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::store::Record;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as Timestamp
}

/// A task record as stored and as served over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier (UUID v4 string).
    pub id: String,
    pub title: String,
    pub description: String,
    /// `None` until the task is completed.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Build a fresh, incomplete task.
    pub fn new(title: String, description: String, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and description.
    pub fn edit(&mut self, title: String, description: String, now: Timestamp) {
        self.title = title;
        self.description = description;
        self.touch(now);
    }

    /// Mark as completed. Repeated calls move `completed_at` forward.
    pub fn complete(&mut self, now: Timestamp) {
        self.completed_at = Some(now);
        self.touch(now);
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    // updated_at strictly increases, even within the same millisecond.
    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at.saturating_add(1));
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            _ => None,
        }
    }
}

/// Body of `POST /tasks` and `PUT /tasks/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TaskPayload {
    /// Both fields present and non-empty, or `None`.
    pub fn into_fields(self) -> Option<(String, String)> {
        match (self.title, self.description) {
            (Some(title), Some(description)) if !title.is_empty() && !description.is_empty() => {
                Some((title, description))
            }
            _ => None,
        }
    }
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
}

impl ListQuery {
    /// Build from decoded `key=value` pairs. A repeated `search` key
    /// resolves to its last occurrence; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let search = pairs
            .into_iter()
            .filter(|(key, _)| key == "search")
            .last()
            .map(|(_, value)| value);
        Self { search }
    }

    /// The search term, ignoring an empty value.
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}
