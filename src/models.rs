// Data model for the task tracker

use serde::{Deserialize, Serialize};

/// A live task. `name` is the identity key; lower `priority` is served
/// first. `dependencies` is inert data: stored and displayed, never
/// validated against live task names and never cleaned up on completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub priority: i64,
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(name: impl Into<String>, priority: i64, dependencies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            priority,
            dependencies,
        }
    }

    /// Ordering key: priority first, name as the tie-break so tasks of
    /// equal priority are still totally ordered.
    pub fn key(&self) -> (i64, &str) {
        (self.priority, self.name.as_str())
    }
}
