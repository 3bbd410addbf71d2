//! Query analysis for smart search.

use crate::services::substitutions::SubstitutionTable;

/// Phrases that mark a message as a substitution question.
pub const SUBSTITUTION_KEYWORDS: &[&str] = &[
    "substitute",
    "replace",
    "instead of",
    "don't have",
    "out of",
    "alternative",
    "swap",
    "use instead",
    "without",
    "missing",
];

pub const FOOD_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "pasta", "pizza", "burger", "salad", "soup",
    "dessert", "cake", "cookies", "bread", "rice", "noodles", "vegetables", "healthy", "quick",
    "easy", "cheap", "budget", "kids", "spicy", "hot", "mild", "sweet", "sour", "chinese",
    "italian", "mexican", "indian", "thai", "breakfast", "lunch", "dinner", "snack", "appetizer",
    "main", "side", "comfort", "fried", "grilled", "baked", "steamed",
];

const STOP_WORDS: &[&str] = &[
    "what", "want", "need", "like", "have", "make", "cook", "something", "anything",
];

/// Words shorter than this are never search terms on their own.
const MIN_TERM_LEN: usize = 4;

/// Recipe lookups use at most this many terms.
pub const MAX_QUERY_TERMS: usize = 3;

pub const SMART_SEARCH_LIMIT: usize = 6;

pub fn is_substitution_query(message_lower: &str) -> bool {
    SUBSTITUTION_KEYWORDS
        .iter()
        .any(|keyword| message_lower.contains(keyword))
}

/// First table ingredient (in table order) mentioned in the message.
pub fn mentioned_ingredient<'a>(
    table: &'a SubstitutionTable,
    message_lower: &str,
) -> Option<&'a str> {
    table
        .ingredients()
        .find(|ingredient| message_lower.contains(ingredient))
}

/// Food keywords found anywhere in the message (keyword order), then the
/// message's own longer words, without duplicates.
pub fn extract_search_terms(message_lower: &str) -> Vec<String> {
    let keywords = FOOD_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| message_lower.contains(keyword));

    let words = message_lower
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TERM_LEN && !STOP_WORDS.contains(word));

    let mut terms: Vec<String> = Vec::new();
    for term in keywords.chain(words) {
        if !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}
