//! Priority detection from task words.
//!
//! Five fixed keyword sets, most urgent first. The first set holding any of
//! the tokens wins; within a set keywords are tried in declared order. Exactly
//! one token is consumed on a match.

use tracing::debug;

/// Returned when no priority keyword is present
pub const NO_PRIORITY: u8 = 0;

/// (rank, keywords) in scan order
pub const PRIORITY_KEYWORDS: [(u8, [&str; 10]); 5] = [
    (
        5,
        [
            "crit", "urgent", "now", "asap", "immediate", "emergency", "deadly", "top", "burning",
            "instant",
        ],
    ),
    (
        4,
        [
            "please", "fast", "important", "soon", "priority", "quickly", "today", "must",
            "serious", "needed",
        ],
    ),
    (
        3,
        [
            "can", "normal", "regular", "standard", "maybe", "weekly", "routine", "usual", "next",
            "planning",
        ],
    ),
    (
        2,
        [
            "later", "someday", "slow", "whenever", "chill", "eventually", "backup", "secondary",
            "optional", "extra",
        ],
    ),
    (
        1,
        [
            "low", "future", "free", "spare", "ignore", "minor", "background", "trivial",
            "minimal", "easy",
        ],
    ),
];

/// Detect a priority rank (1-5, or [`NO_PRIORITY`]) and remove the matching
/// token from `tokens`. Only the first occurrence of the keyword is removed.
pub fn analyze_priority(tokens: &mut Vec<String>) -> u8 {
    for (rank, keywords) in PRIORITY_KEYWORDS.iter() {
        for keyword in keywords {
            if let Some(pos) = tokens.iter().position(|t| t == keyword) {
                tokens.remove(pos);
                debug!(keyword, rank, "priority keyword matched");
                return *rank;
            }
        }
    }
    NO_PRIORITY
}
