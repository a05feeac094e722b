//! Bounded truncation of retrieved file content.
//!
//! ```rust
//! use rtooling::{TRUNCATION_MARKER, truncate};
//!
//! let content = "first line\nsecond line\nthird line\n".repeat(10);
//! let truncated = truncate(&content, 64);
//!
//! assert!(truncated.len() <= 64);
//! assert!(truncated.ends_with(TRUNCATION_MARKER));
//! assert_eq!(truncate(&truncated, 64), truncated);
//! ```

pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 10_000;
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Bounds `content` to at most `max_length` bytes.
///
/// Prefers cutting at the last line break that still leaves room for the
/// marker, unless that break sits in the first half of the budget, in which
/// case the cut happens exactly at the budget. Never splits a UTF-8 code point.
pub fn truncate(content: &str, max_length: usize) -> String {
    if content.len() <= max_length {
        return content.to_string();
    }

    if max_length <= TRUNCATION_MARKER.len() {
        return content[..floor_char_boundary(content, max_length)].to_string();
    }

    let target = floor_char_boundary(content, max_length - TRUNCATION_MARKER.len());
    let line_break = content.as_bytes()[..=target]
        .iter()
        .rposition(|byte| *byte == b'\n');

    let cut = match line_break {
        Some(index) if index >= target / 2 => index,
        _ => target,
    };

    let mut truncated = String::with_capacity(cut + TRUNCATION_MARKER.len());
    truncated.push_str(&content[..cut]);
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

fn floor_char_boundary(content: &str, index: usize) -> usize {
    if index >= content.len() {
        return content.len();
    }

    (0..=index)
        .rev()
        .find(|candidate| content.is_char_boundary(*candidate))
        .unwrap_or(0)
}
