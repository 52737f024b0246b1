//! Discord command implementations organized by view.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard command
pub mod dashboard;

/// General utility commands
pub mod general;

/// Inventory commands: list, add, and remove spools
pub mod inventory;

/// Usage commands: log prints and show history
pub mod usage;

/// Discord's limit on an embed field name
pub const EMBED_FIELD_NAME_LIMIT: usize = 256;
/// Discord's limit on an embed field value
pub const EMBED_FIELD_VALUE_LIMIT: usize = 1024;
/// Discord's limit on an embed description
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
/// Discord's limit on all text in one embed combined
pub const EMBED_TOTAL_LIMIT: usize = 6000;

/// Cuts `text` to at most `limit` characters, ending in `…` when shortened.
#[must_use]
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Joins `lines` with newlines, stopping before the text would pass `limit`.
///
/// A single line longer than `limit` is truncated rather than dropped.
#[must_use]
pub fn join_lines_within<I>(lines: I, limit: usize) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut joined = String::new();
    let mut used = 0;
    for line in lines {
        let separator = usize::from(!joined.is_empty());
        let length = line.chars().count();
        if used + separator + length > limit {
            if joined.is_empty() {
                joined = truncate_text(&line, limit);
            }
            break;
        }
        if separator == 1 {
            joined.push('\n');
        }
        joined.push_str(&line);
        used += separator + length;
    }
    joined
}

// Export commands
pub use dashboard::*;
pub use general::*;
pub use inventory::*;
pub use usage::*;
