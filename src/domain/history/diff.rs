// src/domain/history/diff.rs
use similar::TextDiff;

/// Render a unified diff between two content snapshots. The output is a
/// display-only audit artifact; it is never parsed back or applied as a
/// patch.
pub fn render_unified_diff(before: &str, after: &str) -> String {
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header("before", "after")
        .to_string()
}
