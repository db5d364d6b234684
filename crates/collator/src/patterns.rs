//! Punctuation heuristics used by the collator.
//!
//! Two patterns suppress false sentence splits:
//! - a numbered-list prefix (`1. ` / `12 `), where a period after digits is
//!   a list marker rather than a sentence end;
//! - a trailing currency amount (`$19.`), where the period may be a decimal
//!   point that more digits will follow.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Digits at the very start of the buffer followed by a space or period.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+[ .]").expect("list-item pattern is valid")
});

/// A dollar sign, digits, and exactly one more non-newline character at the
/// end of the buffer. A single trailing newline is tolerated after it.
static TRAILING_MONEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\d+.\n?$").expect("money pattern is valid")
});

/// Whether the buffer opens like a numbered list item.
pub fn is_possible_list_item(buffer: &str) -> bool {
    LIST_ITEM.is_match(buffer)
}

/// Whether the buffer ends inside what looks like a dollar amount.
pub fn ends_with_money(buffer: &str) -> bool {
    TRAILING_MONEY.is_match(buffer)
}

/// Whether `token` contains any of the given terminators.
pub fn contains_any(token: &str, endings: &[String]) -> bool {
    endings.iter().any(|ending| token.contains(ending.as_str()))
}

/// Split `buffer` just after the last occurrence of any terminator.
///
/// Returns `(complete, remainder)`, or `None` when no terminator occurs.
///
/// ```
/// use murmur_collator::split_at_last_punctuation;
///
/// let endings = vec![".".to_string(), "!".to_string()];
/// let split = split_at_last_punctuation("Hi there! How are you. I'm", &endings);
/// assert_eq!(split, Some(("Hi there! How are you.", " I'm")));
/// ```
pub fn split_at_last_punctuation<'a>(
    buffer: &'a str,
    endings: &[String],
) -> Option<(&'a str, &'a str)> {
    let end = endings
        .iter()
        .filter(|ending| !ending.is_empty())
        .filter_map(|ending| buffer.rfind(ending.as_str()).map(|idx| idx + ending.len()))
        .max()?;
    Some(buffer.split_at(end))
}
