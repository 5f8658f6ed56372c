//! Markdown escaping for literal text runs and code delimiters.

/// Escape underscores in a literal text run.
///
/// Every raw `_` becomes `\_`. An underscore that is already preceded by a
/// backslash is left alone, so escaping is idempotent.
///
/// ```
/// use mdscribe_core::escape::escape_underscores;
///
/// assert_eq!(escape_underscores("snake_case_name"), "snake\\_case\\_name");
/// assert_eq!(escape_underscores("already \\_ escaped"), "already \\_ escaped");
/// assert_eq!(escape_underscores(""), "");
/// ```
pub fn escape_underscores(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 16);
    let mut prev = None;

    for c in text.chars() {
        if c == '_' && prev != Some('\\') {
            result.push('\\');
        }
        result.push(c);
        prev = Some(c);
    }

    result
}

/// Length of the longest run of backticks in `text`.
fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;

    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    longest
}

/// Wrap `code` as an inline code span.
///
/// Uses one backtick unless the content itself contains backticks, in which
/// case the delimiter is one longer than the longest run and padded with
/// spaces.
pub fn code_span(code: &str) -> String {
    let run = longest_backtick_run(code);
    if run == 0 {
        return format!("`{}`", code);
    }

    let ticks = "`".repeat(run + 1);
    format!("{ticks} {code} {ticks}")
}

/// Backtick fence able to enclose `code`, at least three long.
pub fn fence_for(code: &str) -> String {
    "`".repeat((longest_backtick_run(code) + 1).max(3))
}
