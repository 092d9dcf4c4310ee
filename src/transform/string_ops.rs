use std::borrow::Cow;

use regex::{NoExpand, Regex, RegexBuilder};

/// Trims leading/trailing whitespace while borrowing the original when unchanged.
pub fn trim(input: &str) -> Cow<'_, str> {
    let trimmed = input.trim();
    if trimmed.len() == input.len() {
        Cow::Borrowed(input)
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Builds a pattern that matches `needle` literally, optionally ignoring case.
pub fn literal_pattern(needle: &str, match_case: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(!match_case)
        .build()
}

/// Replaces every match with `replacement` taken verbatim (no `$` group expansion),
/// borrowing the input when nothing matches.
pub fn replace_literal<'a>(value: &'a str, pattern: &Regex, replacement: &str) -> Cow<'a, str> {
    pattern.replace_all(value, NoExpand(replacement))
}
