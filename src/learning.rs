//! Learning updater: feeds residual task words back into the store.

use anyhow::Result;
use tracing::debug;

use crate::learning_store::LearningStore;

/// Count one occurrence of every word in `remaining_words` under `category`
/// and persist the store. An empty word list does not touch the store.
///
/// Not idempotent: the same call twice counts twice.
pub fn update_learning_model<S: AsRef<str>>(
    store: &dyn LearningStore,
    category: &str,
    remaining_words: &[S],
) -> Result<()> {
    if remaining_words.is_empty() {
        return Ok(());
    }

    store.modify(&mut |data| data.record(category, remaining_words))?;
    debug!(category, words = remaining_words.len(), "learning model updated");

    Ok(())
}
