use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::fs::FileSystem;

/// Source of release notes for one version.
pub trait Changelog {
    /// Load the notes, leaving the previous body untouched on failure.
    fn read_changes(&mut self, fs: &dyn FileSystem) -> Result<()>;

    fn body(&self) -> &str;
}

/// Release notes for a single version of a markdown changelog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    pub file: PathBuf,
    /// Unprefixed version, e.g. `1.0.0`
    pub version: String,
    pub body: String,
}

impl Changes {
    pub fn new(file: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            version: version.into(),
            body: String::new(),
        }
    }

    pub fn set_file(&mut self, file: impl Into<PathBuf>) {
        self.file = file.into();
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl Changelog for Changes {
    fn read_changes(&mut self, fs: &dyn FileSystem) -> Result<()> {
        let content = fs.read_to_string(&self.file)?;
        let body = extract(&content, &self.version).ok_or(ReleaseError::EmptyChangelog)?;

        tracing::debug!(
            "Read {} bytes of changes for {} from {}",
            body.len(),
            self.version,
            self.file.display()
        );
        self.body = body;
        Ok(())
    }

    fn body(&self) -> &str {
        &self.body
    }
}

/// Extract the section whose heading names `version`.
///
/// The section runs until the next heading of the same or a shallower level,
/// so deeper headings (`### Added` under `## 1.0.1`) stay in the body. Blank
/// lines around the section are trimmed and link reference definitions are
/// dropped. Returns `None` when no heading matches or the section is empty.
/// With duplicate headings the first one wins.
pub fn extract(document: &str, version: &str) -> Option<String> {
    if version.is_empty() {
        return None;
    }

    let mut section: Option<(usize, Vec<&str>)> = None;
    let mut fence: Option<&str> = None;

    for line in document.lines() {
        let marker = fence_marker(line);
        let heading = match (fence, marker) {
            (None, None) => parse_heading(line),
            _ => None,
        };

        match section.as_mut() {
            None => {
                if let Some((level, title)) = heading {
                    if names_version(title, version) {
                        section = Some((level, Vec::new()));
                    }
                }
            }
            Some((level, lines)) => {
                if matches!(heading, Some((next, _)) if next <= *level) {
                    break;
                }
                if fence.is_some() || !is_link_definition(line) {
                    lines.push(line);
                }
            }
        }

        fence = match (fence, marker) {
            (None, Some(open)) => Some(open),
            (Some(open), Some(close)) if open == close => None,
            (current, _) => current,
        };
    }

    let (_, lines) = section?;
    let start = lines.iter().position(|l| !l.trim().is_empty())?;
    let end = lines.iter().rposition(|l| !l.trim().is_empty())?;

    Some(lines[start..=end].join("\n"))
}

/// ATX heading level and title, e.g. `## [1.0.0]` is `(2, "[1.0.0]")`.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let rest = line.trim_start_matches(' ');
    if line.len() - rest.len() > 3 {
        return None;
    }

    let level = rest.len() - rest.trim_start_matches('#').len();
    if level == 0 || level > 6 {
        return None;
    }

    let title = &rest[level..];
    if !title.is_empty() && !title.starts_with([' ', '\t']) {
        return None;
    }

    Some((level, title.trim().trim_end_matches('#').trim_end()))
}

fn names_version(title: &str, version: &str) -> bool {
    title
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '_')))
        .map(|token| token.trim_matches(|c| c == '.' || c == '-'))
        .any(|token| token == version)
}

fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// `[1.0.0]: https://github.com/owner/repo/compare/v0.9.0...v1.0.0`
fn is_link_definition(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('[')
        && trimmed
            .find("]:")
            .is_some_and(|idx| idx > 1 && !trimmed[1..idx].contains(']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;

    const CHANGELOG: &str = r#"# Changelog
All notable changes to this project will be documented in this file.

## [Unreleased]

## [1.0.1] - 2019-12-23
### Added
- New feature.

### Fixed
- Fixed env.var bug.

## [1.0.0] - 2019-12-20
- First stable release.

[Unreleased]: https://github.com/owner/repo/compare/v1.0.1...HEAD
[1.0.1]: https://github.com/owner/repo/compare/v1.0.0...v1.0.1
"#;

    struct MemoryFs(HashMap<PathBuf, String>);

    impl FileSystem for MemoryFs {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file does not exist"))
        }
    }

    fn memory_fs() -> MemoryFs {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("./CHANGELOG.md"), CHANGELOG.to_string());
        MemoryFs(files)
    }

    #[test]
    fn test_extract_flat_section() {
        assert_eq!(
            extract(CHANGELOG, "1.0.0").as_deref(),
            Some("- First stable release.")
        );
    }

    #[test]
    fn test_extract_keeps_nested_headings() {
        let expected = "### Added\n- New feature.\n\n### Fixed\n- Fixed env.var bug.";
        assert_eq!(extract(CHANGELOG, "1.0.1").as_deref(), Some(expected));
    }

    #[test]
    fn test_extract_missing_version() {
        assert_eq!(extract(CHANGELOG, "99.0.0"), None);
        assert_eq!(extract(CHANGELOG, ""), None);
    }

    #[test]
    fn test_extract_empty_section() {
        assert_eq!(extract(CHANGELOG, "Unreleased"), None);
    }

    #[test]
    fn test_version_must_be_whole_token() {
        let doc = "## 1.0.10\n- ten\n\n## 1.0.1\n- one\n";
        assert_eq!(extract(doc, "1.0.1").as_deref(), Some("- one"));
        assert_eq!(extract(doc, "1.0").as_deref(), None);
    }

    #[test]
    fn test_prefixed_heading_is_not_a_match() {
        let doc = "## v1.0.0\n- prefixed\n";
        assert_eq!(extract(doc, "1.0.0"), None);
        assert_eq!(extract(doc, "v1.0.0").as_deref(), Some("- prefixed"));
    }

    #[test]
    fn test_shallower_heading_ends_section() {
        let doc = "# Project\n### 2.0.0\n- deep\n## Older\n- other\n";
        assert_eq!(extract(doc, "2.0.0").as_deref(), Some("- deep"));
    }

    #[test]
    fn test_duplicate_headings_first_wins() {
        let doc = "## 1.0.0\n- first\n## 1.0.0\n- second\n";
        assert_eq!(extract(doc, "1.0.0").as_deref(), Some("- first"));
    }

    #[test]
    fn test_fenced_hash_lines_are_body() {
        let doc = "## 1.2.0\n```sh\n# not a heading\n## nor this\n```\n## 1.1.0\n- old\n";
        assert_eq!(
            extract(doc, "1.2.0").as_deref(),
            Some("```sh\n# not a heading\n## nor this\n```")
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = "## 1.0.0\r\n- windows\r\n\r\n## 0.9.0\r\n- older\r\n";
        assert_eq!(extract(doc, "1.0.0").as_deref(), Some("- windows"));
    }

    #[test]
    fn test_parse_heading() {
        assert_eq!(parse_heading("## [1.0.0]"), Some((2, "[1.0.0]")));
        assert_eq!(parse_heading("   # Title #"), Some((1, "Title")));
        assert_eq!(parse_heading("#hashtag"), None);
        assert_eq!(parse_heading("    ## indented code"), None);
        assert_eq!(parse_heading("####### seven"), None);
    }

    #[test]
    fn test_read_changes() {
        let fs = memory_fs();

        let mut changes = Changes::new("./CHANGELOG.md", "1.0.0");
        changes.read_changes(&fs).unwrap();
        assert_eq!(changes.body(), "- First stable release.");
    }

    #[test]
    fn test_read_changes_failure_keeps_body() {
        let fs = memory_fs();

        let mut changes = Changes::new("./CHANGELOG.md", "99.0.0");
        changes.body = "previous".to_string();
        let err = changes.read_changes(&fs).unwrap_err();

        assert_eq!(err.to_string(), "empty changelog for requested version");
        assert_eq!(changes.body, "previous");
    }

    #[test]
    fn test_read_changes_missing_file() {
        let fs = memory_fs();

        let mut changes = Changes::new("./NOPE.md", "1.0.0");
        let err = changes.read_changes(&fs).unwrap_err();

        assert!(matches!(err, ReleaseError::Io(_)));
        assert_eq!(changes.body, "");
    }

    #[test]
    fn test_set_and_get_file() {
        let mut changes = Changes::default();
        changes.set_file("/home/user/file");
        assert_eq!(changes.file(), Path::new("/home/user/file"));
    }
}
