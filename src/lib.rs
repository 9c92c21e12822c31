//! task_core - task list manager with keyword classification
//!
//! Every task gets a priority (1-5, 0 for none) and a category from the words
//! in its name. Words left over after classification are counted per category;
//! once a word's count reaches the store threshold it classifies future tasks.
//!
//! Modules:
//! - learning_store: Persisted word counts and threshold (JSON, whole-file)
//! - priority: Priority keyword detection
//! - category: Category keyword table and detection
//! - learning: Feeds residual words back into the store
//! - task: Task record and `classify_and_build`
//! - task_list: Task list operations and its JSON file
//! - interactive: Line-oriented command loop
//! - config: YAML config and path overrides
//! - fs_ops: JSON file helpers

pub mod fs_ops;
pub mod learning_store;
pub mod priority;
pub mod category;
pub mod learning;
pub mod task;
pub mod task_list;
pub mod interactive;
pub mod config;

// Re-export key types for convenience
pub use learning_store::{
    FileLearningStore, LearningData, LearningSettings, LearningStore, LoadOutcome,
    MemoryLearningStore, SEED_CATEGORIES, DEFAULT_THRESHOLD,
};

pub use priority::{analyze_priority, PRIORITY_KEYWORDS, NO_PRIORITY};

pub use category::{
    analyze_category, classify_with_table, effective_table, KeywordTable, GENERAL_CATEGORY,
    SEED_TABLE, STOP_WORDS,
};

pub use learning::update_learning_model;

pub use task::{classify_and_build, tokenize, Task, DONE_MARKER};

pub use task_list::{AddOutcome, MarkOutcome, TaskList, TaskListError};

pub use config::Config;
