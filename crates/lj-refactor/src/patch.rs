use similar::TextDiff;

/// Renders a unified diff between the pre- and post-refactor source
/// text, the transaction's externally-visible result alongside the
/// rewritten tree (§4.F "Patch rendering", §6 "the transaction returns
/// ... a unified diff for display/review").
pub fn unified_diff(before: &str, after: &str, path: &str) -> String {
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header(path, path)
        .to_string()
}
