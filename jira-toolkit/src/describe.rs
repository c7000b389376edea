//! Plain-text rendering of an issue's description.

use crate::client::Issue;
use std::fmt::Write;

/// Column width used for wrapping descriptions.
pub const WRAP_WIDTH: usize = 80;

/// Renders the ticket key, summary and wrapped description.
#[must_use]
pub fn render_description(issue: &Issue) -> String {
    let rule = "-".repeat(WRAP_WIDTH);
    let description = issue
        .fields
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map_or_else(
            || "No description available.".to_string(),
            |d| wrap_text(d, WRAP_WIDTH),
        );

    let mut out = String::new();
    let _ = writeln!(out, "Ticket: {}", issue.key);
    let _ = writeln!(out, "Summary: {}", issue.fields.summary);
    let _ = writeln!(out, "\nDescription:");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{description}");
    let _ = write!(out, "{rule}");
    out
}

/// Greedy word wrap.
///
/// All runs of whitespace, newlines included, collapse to a single space
/// before wrapping. Words longer than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        loop {
            let line_len = line.chars().count();
            let needed = if line.is_empty() { word.len() } else { line_len + 1 + word.len() };

            if needed <= width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.extend(word.iter());
                break;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                continue;
            }

            // Word alone is wider than the line.
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(description: serde_json::Value) -> Issue {
        serde_json::from_value(json!({
            "key": "EXMP-152",
            "fields": { "summary": "Fix login bug", "description": description }
        }))
        .unwrap()
    }

    #[test]
    fn wraps_at_width() {
        let wrapped = wrap_text("aaa bbb ccc ddd", 7);
        assert_eq!(wrapped, "aaa bbb\nccc ddd");
    }

    #[test]
    fn collapses_whitespace_and_newlines() {
        assert_eq!(wrap_text("one\n\n  two\tthree", 80), "one two three");
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), "abcd\nefgh\nij\nxy");
    }

    #[test]
    fn no_line_exceeds_width() {
        let text = "Users cannot log in on mobile when the session cookie expires during a \
                    redirect to the identity provider, which leaves them on a blank page.";
        for line in wrap_text(text, WRAP_WIDTH).lines() {
            assert!(line.chars().count() <= WRAP_WIDTH);
        }
    }

    #[test]
    fn renders_placeholder_for_missing_description() {
        let rendered = render_description(&issue(serde_json::Value::Null));
        assert!(rendered.starts_with("Ticket: EXMP-152\nSummary: Fix login bug\n"));
        assert!(rendered.contains("No description available."));
    }

    #[test]
    fn renders_description_between_rules() {
        let rendered = render_description(&issue(json!("Users cannot log in on mobile")));
        let rule = "-".repeat(WRAP_WIDTH);
        assert!(rendered.contains(&format!("{rule}\nUsers cannot log in on mobile\n{rule}")));
    }
}
