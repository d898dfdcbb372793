//! Small text helpers shared by the segmenter, classifier and serializer.

use itertools::Itertools;

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Case-insensitive keyword search that only accepts matches on word
/// boundaries, so `"ai"` does not match inside `"email"`.
///
/// `haystack` must already be lower-cased; `keyword` is compared lower-cased.
pub fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    find_keyword(haystack, keyword).is_some()
}

/// Byte offset of the first word-bounded occurrence of `keyword`.
pub fn find_keyword(haystack: &str, keyword: &str) -> Option<usize> {
    let keyword = keyword.to_lowercase();
    if keyword.is_empty() {
        return None;
    }
    haystack.match_indices(keyword.as_str()).find_map(|(start, _)| {
        let end = start + keyword.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        (before_ok && after_ok).then_some(start)
    })
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces whitespace runs with `-` and lower-cases the result.
///
/// This is the naming rule used for downloaded workflow files.
pub fn file_slug(text: &str) -> String {
    text.split_whitespace().join("-").to_lowercase()
}

/// Lower-case, ASCII-alphanumeric slug with single dashes, for URL paths.
pub fn path_slug(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .join("-")
}
