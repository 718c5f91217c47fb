use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Same class as `char::is_alphanumeric`: Alphabetic plus any Numeric category.
    static ref RE: Regex = Regex::new(r"[\p{Alphabetic}\p{N}]+").expect("valid regex");
}

/// Tokenize text into lowercase alphanumeric words.
///
/// Every non-alphanumeric character is a separator and is dropped. The index of a
/// token in the returned vector is its position for postings and proximity.
pub fn tokenize(text: &str) -> Vec<String> {
    RE.find_iter(text).filter_map(|m| fold(m.as_str())).collect()
}

/// Lowercase one run. Lowercasing can expand a char into a combining mark
/// (`İ` -> `i` + U+0307); those marks are not alphanumeric and are dropped.
fn fold(run: &str) -> Option<String> {
    let token: String = run.chars().flat_map(char::to_lowercase).filter(|c| c.is_alphanumeric()).collect();
    (!token.is_empty()).then_some(token)
}
