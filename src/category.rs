//! Category detection from task words.
//!
//! The keyword table is the fixed seed table plus every learned word whose
//! count has reached the store threshold. Categories, then keywords, are tried
//! in table order and the first keyword present wins. No scoring.

use indexmap::IndexMap;
use tracing::debug;

use crate::learning_store::LearningData;

/// Label used when nothing in the table matches
pub const GENERAL_CATEGORY: &str = "General";

/// Dropped before matching. Never classified, never learned.
pub const STOP_WORDS: [&str; 6] = ["no", "yes", "and", "if", "when", "why"];

pub const SEED_TABLE: [(&str, [&str; 10]); 5] = [
    (
        "Work",
        [
            "office", "boss", "mail", "meeting", "project", "report", "salary", "client", "work",
            "job",
        ],
    ),
    (
        "Study",
        [
            "python", "exam", "math", "learn", "book", "university", "course", "homework", "test",
            "science",
        ],
    ),
    (
        "Home",
        [
            "clean", "cook", "buy", "laundry", "dishes", "fix", "rent", "garden", "home", "family",
        ],
    ),
    (
        "Health",
        [
            "gym", "doctor", "workout", "sport", "medicine", "dentist", "run", "water", "sleep",
            "healthy",
        ],
    ),
    (
        "Fun",
        [
            "movie", "game", "party", "trip", "beer", "friends", "vacation", "music", "hobby",
            "rest",
        ],
    ),
];

/// category -> keywords, in match order
pub type KeywordTable = IndexMap<String, Vec<String>>;

/// Merge `seed` with learned words whose count is at least `threshold`.
///
/// Learned words are appended after the seed keywords of their category;
/// categories unknown to the seed are appended after the seed categories in
/// store order. A word already listed under its category is not repeated.
pub fn effective_table(
    seed: &[(&str, [&str; 10])],
    learned: &LearningData,
    threshold: u64,
) -> KeywordTable {
    let mut table: KeywordTable = seed
        .iter()
        .map(|(name, words)| {
            (
                name.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect();

    for (category, words) in &learned.learned_categories {
        for (word, &count) in words {
            if count < threshold {
                continue;
            }
            let keywords = table.entry(category.clone()).or_default();
            if !keywords.contains(word) {
                keywords.push(word.clone());
            }
        }
    }

    table
}

/// Remove stop-words, keeping order
pub fn strip_stop_words(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .cloned()
        .collect()
}

/// Classify against an already built table.
///
/// Returns the category and the stop-word-filtered tokens with the matched
/// keyword (first occurrence) removed. No match yields [`GENERAL_CATEGORY`]
/// and the filtered tokens.
pub fn classify_with_table(tokens: &[String], table: &KeywordTable) -> (String, Vec<String>) {
    let mut remaining = strip_stop_words(tokens);

    for (category, keywords) in table {
        for keyword in keywords {
            if let Some(pos) = remaining.iter().position(|t| t == keyword) {
                remaining.remove(pos);
                debug!(%category, %keyword, "category keyword matched");
                return (category.clone(), remaining);
            }
        }
    }

    (GENERAL_CATEGORY.to_string(), remaining)
}

/// Classify `tokens` using the seed table and the learned words in `learned`
pub fn analyze_category(tokens: &[String], learned: &LearningData) -> (String, Vec<String>) {
    let table = effective_table(&SEED_TABLE, learned, learned.threshold());
    classify_with_table(tokens, &table)
}
