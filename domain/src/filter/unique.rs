//! Unique filter
//!
//! Collapses the language variants of one logical question into a single
//! representative for the active display language.

use crate::question::Question;
use std::collections::HashMap;

/// One entry per logical question
///
/// Groups by `uniqueId` (or `id` when missing). Picks the variant in
/// `language`, otherwise the first variant seen. Output follows the order
/// in which each group first appears.
pub fn unique_questions(questions: &[Question], language: &str) -> Vec<Question> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut chosen: Vec<&Question> = Vec::new();

    for q in questions {
        match slots.get(q.group_key()) {
            None => {
                slots.insert(q.group_key(), chosen.len());
                chosen.push(q);
            }
            Some(&slot) => {
                if chosen[slot].language() != language && q.language() == language {
                    chosen[slot] = q;
                }
            }
        }
    }

    chosen.into_iter().cloned().collect()
}
