//! Rule fragment discovery.

use std::path::{Path, PathBuf};

use crate::error::{io_err, RulesError};

/// One source file contributing instruction text to the merged output.
///
/// Ordering among fragments is significant: discovery order (sorted path
/// order) is preserved all the way into the concatenated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFragment {
    pub path: PathBuf,
    pub content: String,
}

/// Discover and read every `.md` fragment under `dir`, recursively.
///
/// Returns an empty vec when the directory does not exist. Paths are
/// sorted so repeated runs always produce the same fragment order.
pub fn load_fragments(dir: &Path) -> Result<Vec<RuleFragment>, RulesError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_rule_files(dir, &mut files)?;
    files.sort();

    let mut fragments = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        fragments.push(RuleFragment { path, content });
    }
    Ok(fragments)
}

fn collect_rule_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RulesError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_rule_files(&path, out)?;
        } else if meta.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            out.push(path);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_yields_no_fragments() {
        let tmp = TempDir::new().unwrap();
        let fragments = load_fragments(&tmp.path().join("nope")).expect("load");
        assert!(fragments.is_empty());
    }

    #[test]
    fn fragments_are_sorted_by_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.md"), "B").unwrap();
        std::fs::write(tmp.path().join("a.md"), "A").unwrap();
        std::fs::write(tmp.path().join("c.md"), "C").unwrap();

        let fragments = load_fragments(tmp.path()).expect("load");
        let names: Vec<_> = fragments
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn discovery_recurses_into_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("backend");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(tmp.path().join("general.md"), "top").unwrap();
        std::fs::write(sub.join("api.md"), "nested").unwrap();

        let fragments = load_fragments(tmp.path()).expect("load");
        assert_eq!(fragments.len(), 2);
        assert!(fragments.iter().any(|f| f.path.ends_with("backend/api.md")));
    }

    #[test]
    fn non_markdown_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("rules.md"), "yes").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "no").unwrap();
        std::fs::write(tmp.path().join(".gitignore"), "no").unwrap();

        let fragments = load_fragments(tmp.path()).expect("load");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].content, "yes");
    }
}
