//! Task records and the builder that classifies raw input into one.

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::category::analyze_category;
use crate::learning::update_learning_model;
use crate::learning_store::LearningStore;
use crate::priority::analyze_priority;

/// Format of `Task::created_at`
pub const CREATED_AT_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Appended to a task name once it is done
pub const DONE_MARKER: &str = "✅";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_name: String,
    /// 1 (least urgent) to 5, 0 when no priority word was found
    pub priority: u8,
    pub category: String,
    pub created_at: String,
}

impl Task {
    /// Create a task stamped with the current local time
    pub fn new(task_name: impl Into<String>, priority: u8, category: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            priority,
            category: category.into(),
            created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.task_name.contains(DONE_MARKER)
    }
}

/// Lowercase and split on whitespace
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Build a task from free text.
///
/// Priority and category keywords are detected on working copies of the
/// tokens; whatever is left over is fed to the learning model under the
/// detected category. The stored name keeps every original word.
pub fn classify_and_build(store: &dyn LearningStore, raw_text: &str) -> Result<Task> {
    let tokens = tokenize(raw_text);

    let mut working = tokens.clone();
    let priority = analyze_priority(&mut working);

    let (learned, _) = store.load()?;
    let (category, remaining) = analyze_category(&working, &learned);

    update_learning_model(store, &category, &remaining)?;

    let task = Task::new(tokens.join(" "), priority, category);
    info!(
        name = %task.task_name,
        priority = task.priority,
        category = %task.category,
        "task classified"
    );

    Ok(task)
}
