// Flat-file JSON persistence for the task list

use crate::error::{Result, TrackerError};
use crate::models::Task;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Read the full task list from `path`.
///
/// A missing file is not an error: it means a fresh store, so an empty list
/// is returned. A file that exists but is not a JSON array of complete task
/// records (every record needs `name`, `priority`, `dependencies`) fails
/// with `CorruptState`.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    if !path.exists() {
        debug!(file = ?path, "Task file does not exist, starting empty");
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let tasks: Vec<Task> = serde_json::from_reader(reader)
        .map_err(|e| TrackerError::corrupt(path, e.to_string()))?;

    info!(file = ?path, count = tasks.len(), "Loaded tasks from file");
    Ok(tasks)
}

/// Rewrite `path` with the full task list.
///
/// Full rewrite, not an append log: the file is truncated and the whole
/// list serialized as a pretty-printed JSON array. An exclusive advisory
/// lock is held while writing and the data is synced before returning.
/// There is no provision for a second instance sharing the file; a
/// concurrent external writer would race this rewrite.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    file.lock_exclusive()?;

    let json = serde_json::to_string_pretty(tasks)
        .map_err(|e| TrackerError::corrupt(path, e.to_string()))?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    debug!(file = ?path, count = tasks.len(), "Saved tasks to file");

    // Lock is released when file is dropped
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let tasks = load_tasks(&path).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let tasks = vec![
            Task::new("gather-data", 1, vec![]),
            Task::new("write-report", 3, vec!["gather-data".to_string()]),
        ];

        save_tasks(&path, &tasks).unwrap();
        let loaded = load_tasks(&path).unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        save_tasks(&path, &[Task::new("a", 1, vec![]), Task::new("b", 2, vec![])]).unwrap();
        save_tasks(&path, &[Task::new("a", 1, vec![])]).unwrap();

        let loaded = load_tasks(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "a");
    }

    #[test]
    fn test_load_malformed_json_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "{not valid json").unwrap();

        let err = load_tasks(&path).unwrap_err();
        assert!(matches!(err, TrackerError::CorruptState { .. }));
    }

    #[test]
    fn test_load_record_missing_field_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        // Record lacks the required dependencies field
        fs::write(&path, r#"[{"name":"a","priority":1}]"#).unwrap();

        let err = load_tasks(&path).unwrap_err();
        assert!(matches!(err, TrackerError::CorruptState { .. }));
    }

    #[test]
    fn test_load_wrong_top_level_shape_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, r#"{"name":"a","priority":1,"dependencies":[]}"#).unwrap();

        let err = load_tasks(&path).unwrap_err();
        assert!(matches!(err, TrackerError::CorruptState { .. }));
    }
}
