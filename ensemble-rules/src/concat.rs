//! Deterministic rule concatenation.

use std::path::Path;

use crate::fragment::RuleFragment;

/// Join rule fragments into one document.
///
/// Each fragment contributes a block: a separator line, a `Source:` line
/// naming the fragment's path relative to `base_dir`, another separator,
/// then the content with surrounding whitespace trimmed. Blocks are joined
/// with a single newline, leaving one blank line between them.
///
/// Pure and byte-stable: identical inputs always produce identical output.
pub fn concatenate(fragments: &[RuleFragment], base_dir: &Path) -> String {
    let blocks: Vec<String> = fragments
        .iter()
        .map(|fragment| {
            let relative = fragment
                .path
                .strip_prefix(base_dir)
                .unwrap_or(&fragment.path);
            format!(
                "---\nSource: {}\n---\n{}\n",
                relative.display(),
                fragment.content.trim()
            )
        })
        .collect();
    blocks.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
