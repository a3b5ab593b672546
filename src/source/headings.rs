use std::path::Path;

use anyhow::Context;

/// Reads raw headings from a text file, one per line. Blank lines are skipped.
pub fn read_headings(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read headings from {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
