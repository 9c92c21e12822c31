//! Task list: the user's tasks and their JSON file.
//! Stores to: ./TaskManager.json (see `Config::tasks_file`)

use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::fs_ops::{read_optional, write_json_file};
use crate::task::{Task, DONE_MARKER};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskListError {
    #[error("Your task list is empty")]
    Empty,
    #[error("Invalid task number: {0}")]
    InvalidNumber(usize),
}

/// Result of [`TaskList::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A task with the same name exists; the task was not added
    Duplicate(Task),
}

/// Result of [`TaskList::mark_done`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked(String),
    AlreadyDone(String),
}

#[derive(Debug, Default, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t.task_name == name)
    }

    /// Append `task` unless one with the same name already exists
    pub fn add(&mut self, task: Task) -> AddOutcome {
        if self.contains_name(&task.task_name) {
            return AddOutcome::Duplicate(task);
        }
        self.tasks.push(task);
        AddOutcome::Added
    }

    /// Append without the duplicate check
    pub fn force_add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Rename task `num` (1-based), returning the old name
    pub fn edit(&mut self, num: usize, new_name: impl Into<String>) -> Result<String, TaskListError> {
        let task = self.get_mut(num)?;
        Ok(std::mem::replace(&mut task.task_name, new_name.into()))
    }

    /// Remove task `num` (1-based)
    pub fn remove(&mut self, num: usize) -> Result<Task, TaskListError> {
        if self.tasks.is_empty() {
            return Err(TaskListError::Empty);
        }
        self.index(num)?;
        Ok(self.tasks.remove(num - 1))
    }

    /// Append the done marker to task `num` (1-based)
    pub fn mark_done(&mut self, num: usize) -> Result<MarkOutcome, TaskListError> {
        let task = self.get_mut(num)?;
        if task.is_done() {
            return Ok(MarkOutcome::AlreadyDone(task.task_name.clone()));
        }
        let before = task.task_name.clone();
        task.task_name.push_str(DONE_MARKER);
        Ok(MarkOutcome::Marked(before))
    }

    /// Drop every done task, returning how many were removed
    pub fn clear_done(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.is_done());
        before - self.tasks.len()
    }

    /// Highest priority first, then latest `created_at`.
    ///
    /// `created_at` is compared as text, so ordering across days follows the
    /// day-first string rather than the calendar.
    pub fn sort(&mut self) {
        self.tasks.sort_by(|a, b| {
            (b.priority, &b.created_at).cmp(&(a.priority, &a.created_at))
        });
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_json_file(path, &self.tasks)?;
        info!(path = %path.display(), count = self.tasks.len(), "task list saved");
        Ok(())
    }

    /// Merge tasks from `path`, skipping names already present.
    /// A missing file loads nothing. Returns the number of tasks added.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let Some(bytes) = read_optional(path)? else {
            debug!(path = %path.display(), "no task list file");
            return Ok(0);
        };

        let loaded: Vec<Task> = serde_json::from_slice(&bytes)
            .context(format!("Failed to parse task list: {:?}", path))?;

        let mut added = 0;
        for task in loaded {
            if !self.contains_name(&task.task_name) {
                self.tasks.push(task);
                added += 1;
            }
        }

        info!(path = %path.display(), added, "task list loaded");
        Ok(added)
    }

    fn index(&self, num: usize) -> Result<usize, TaskListError> {
        if (1..=self.tasks.len()).contains(&num) {
            Ok(num - 1)
        } else {
            Err(TaskListError::InvalidNumber(num))
        }
    }

    fn get_mut(&mut self, num: usize) -> Result<&mut Task, TaskListError> {
        let idx = self.index(num)?;
        Ok(&mut self.tasks[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, priority: u8, created_at: &str) -> Task {
        Task {
            task_name: name.to_string(),
            priority,
            category: "General".to_string(),
            created_at: created_at.to_string(),
        }
    }

    fn sample() -> TaskList {
        let mut list = TaskList::new();
        list.add(task("a", 1, "01/01/2026 10:00"));
        list.add(task("b", 5, "01/01/2026 09:00"));
        list.add(task("c", 5, "01/01/2026 11:00"));
        list
    }

    fn names(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.task_name.as_str()).collect()
    }

    #[test]
    fn test_duplicate_add_is_reported() {
        let mut list = sample();
        let outcome = list.add(task("a", 3, "02/01/2026 10:00"));
        assert!(matches!(outcome, AddOutcome::Duplicate(ref t) if t.priority == 3));
        assert_eq!(list.len(), 3);

        if let AddOutcome::Duplicate(t) = outcome {
            list.force_add(t);
        }
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_edit() {
        let mut list = sample();
        assert_eq!(list.edit(2, "bee").unwrap(), "b");
        assert_eq!(names(&list), ["a", "bee", "c"]);
        assert_eq!(list.edit(0, "x"), Err(TaskListError::InvalidNumber(0)));
        assert_eq!(list.edit(4, "x"), Err(TaskListError::InvalidNumber(4)));
    }

    #[test]
    fn test_remove() {
        let mut list = sample();
        assert_eq!(list.remove(1).unwrap().task_name, "a");
        assert_eq!(list.remove(9), Err(TaskListError::InvalidNumber(9)));
        assert_eq!(TaskList::new().remove(1), Err(TaskListError::Empty));
    }

    #[test]
    fn test_mark_and_clear() {
        let mut list = sample();
        assert_eq!(list.mark_done(1).unwrap(), MarkOutcome::Marked("a".to_string()));
        assert_eq!(
            list.mark_done(1).unwrap(),
            MarkOutcome::AlreadyDone("a✅".to_string())
        );
        assert_eq!(list.mark_done(7), Err(TaskListError::InvalidNumber(7)));

        assert_eq!(list.clear_done(), 1);
        assert_eq!(names(&list), ["b", "c"]);
    }

    #[test]
    fn test_sort_priority_then_created_desc() {
        let mut list = sample();
        list.sort();
        assert_eq!(names(&list), ["c", "b", "a"]);
    }

    #[test]
    fn test_save_and_load_skips_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TaskManager.json");
        sample().save_to_file(&path).unwrap();

        let mut list = TaskList::new();
        list.add(task("b", 2, "03/03/2026 08:00"));
        assert_eq!(list.load_from_file(&path).unwrap(), 2);
        assert_eq!(names(&list), ["b", "a", "c"]);
        assert_eq!(list.tasks()[0].priority, 2);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = TaskList::new();
        assert_eq!(list.load_from_file(dir.path().join("none.json")).unwrap(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_saved_file_keeps_marker_and_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TaskManager.json");
        let mut list = sample();
        list.mark_done(1).unwrap();
        list.save_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"task_name\": \"a✅\""));
        assert!(text.contains("\"created_at\": \"01/01/2026 10:00\""));
    }
}
