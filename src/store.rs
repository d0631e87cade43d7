// TaskStore: min-ordered task set with write-through file persistence

use crate::error::{Result, TrackerError};
use crate::models::Task;
use crate::persist;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Heap entry wrapping a task so the heap orders on `(priority, name)`
/// only, not on the dependency list.
#[derive(Debug, Clone)]
struct HeapEntry(Task);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.key() == other.0.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.key().cmp(&other.0.key())
    }
}

/// The live task set: a min-heap over `(priority, name)` for "what is
/// next", a name-keyed map for existence and uniqueness checks, and a file
/// path every mutation is written through to before it returns.
///
/// Both containers hold the same name set at all times; neither is exposed
/// directly, so callers never observe them out of step.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    tasks: HashMap<String, Task>,
}

impl TaskStore {
    /// Open a store backed by the given file, replaying its contents if it
    /// exists.
    ///
    /// The replay goes through the same insert path as `add` but skips the
    /// write-back. A file with a duplicate or empty name fails the replay
    /// and aborts the open with `CorruptState`: fail-fast rather than
    /// silently dropping records from a file the user may want to inspect.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut store = Self {
            path: path.clone(),
            heap: BinaryHeap::new(),
            tasks: HashMap::new(),
        };

        let records = persist::load_tasks(&store.path)?;
        let count = records.len();
        for task in records {
            store
                .insert(task)
                .map_err(|e| TrackerError::corrupt(&path, e.to_string()))?;
        }

        info!(file = ?path, count, "Opened task store");
        Ok(store)
    }

    /// The file this store writes through to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a new task and write the file through before returning.
    ///
    /// The name is trimmed before validation and stored trimmed, so two
    /// names differing only in surrounding whitespace collide. Success is
    /// silent.
    pub fn add(&mut self, name: &str, priority: i64, dependencies: Vec<String>) -> Result<()> {
        self.insert(Task::new(name.trim(), priority, dependencies))?;
        self.persist()
    }

    /// All live tasks sorted ascending by `(priority, name)`. Read-only.
    pub fn list(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| a.key().cmp(&b.key()));
        tasks
    }

    /// Remove a task permanently and write the file through.
    ///
    /// The heap is rebuilt from the retained entries: O(n) per completion,
    /// a deliberate limit for personal-sized lists rather than an
    /// addressable priority structure.
    pub fn complete(&mut self, name: &str) -> Result<()> {
        if self.tasks.remove(name).is_none() {
            return Err(TrackerError::not_found(name));
        }

        let retained = std::mem::take(&mut self.heap);
        self.heap = retained
            .into_iter()
            .filter(|Reverse(entry)| entry.0.name != name)
            .collect();

        debug!(name, remaining = self.tasks.len(), "Completed task");
        self.persist()
    }

    /// The task with the smallest `(priority, name)` key, without removing
    /// it. `None` when the store is empty.
    pub fn peek_next(&self) -> Option<&Task> {
        self.heap.peek().map(|Reverse(entry)| &entry.0)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Validate and insert into both containers. No write-back: `add` and
    /// the load-time replay share this path, and only `add` persists.
    fn insert(&mut self, task: Task) -> Result<()> {
        if task.name.trim().is_empty() {
            return Err(TrackerError::validation("Task name cannot be empty."));
        }
        if self.tasks.contains_key(&task.name) {
            return Err(TrackerError::validation(format!(
                "Task with this name already exists: '{}'",
                task.name
            )));
        }

        debug!(name = %task.name, priority = task.priority, "Adding task");
        self.heap.push(Reverse(HeapEntry(task.clone())));
        self.tasks.insert(task.name.clone(), task);
        Ok(())
    }

    /// Full write-through in heap-iteration order (arbitrary, not priority
    /// order; the persisted contract is on content only).
    fn persist(&self) -> Result<()> {
        let snapshot: Vec<Task> = self.heap.iter().map(|Reverse(entry)| entry.0.clone()).collect();
        persist::save_tasks(&self.path, &snapshot)
    }
}
