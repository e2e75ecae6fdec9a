use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::release::Asset;

/// Expand asset arguments into the list of files to attach.
///
/// Each argument is a path or glob pattern relative to `workspace`. Matches
/// of one pattern are sorted, argument order is kept and repeated files are
/// attached once. Two different files with the same file name are rejected,
/// since a release holds one asset per name.
pub fn resolve_assets(workspace: &Path, patterns: &[String]) -> Result<Vec<Asset>> {
    let mut seen = HashSet::new();
    let mut names: HashMap<String, PathBuf> = HashMap::new();
    let mut assets = Vec::new();

    for pattern in patterns {
        for path in expand(workspace, pattern)? {
            if !seen.insert(path.clone()) {
                continue;
            }
            let asset = Asset::from_path(&path).ok_or_else(|| {
                ReleaseError::Asset(format!("invalid asset path: {}", path.display()))
            })?;
            if let Some(first) = names.get(&asset.name) {
                return Err(ReleaseError::Asset(format!(
                    "duplicate asset name '{}': {} and {}",
                    asset.name,
                    first.display(),
                    path.display()
                )));
            }
            names.insert(asset.name.clone(), path.clone());
            tracing::debug!("Asset {} -> {}", pattern, path.display());
            assets.push(asset);
        }
    }

    Ok(assets)
}

fn expand(workspace: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let root = workspace.to_str().ok_or_else(|| {
        ReleaseError::Asset(format!("non UTF-8 workspace: {}", workspace.display()))
    })?;
    let full = Path::new(&glob::Pattern::escape(root)).join(pattern);
    let full = full
        .to_str()
        .ok_or_else(|| ReleaseError::Asset(format!("non UTF-8 asset path: {pattern}")))?;

    let paths = glob::glob(full)
        .map_err(|e| ReleaseError::Asset(format!("invalid pattern '{pattern}': {e}")))?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| ReleaseError::Asset(e.to_string()))?;
        if path.is_dir() {
            return Err(ReleaseError::Asset(format!(
                "'{}' is a directory",
                path.display()
            )));
        }
        files.push(path);
    }

    if files.is_empty() {
        return Err(ReleaseError::Asset(format!("no files match '{pattern}'")));
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(assets: &[Asset]) -> Vec<&str> {
        assets.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_no_arguments() {
        let dir = tempdir().unwrap();
        assert!(resolve_assets(dir.path(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_plain_paths_keep_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();

        let assets =
            resolve_assets(dir.path(), &["b.txt".to_string(), "a.txt".to_string()]).unwrap();

        assert_eq!(names(&assets), ["b.txt", "a.txt"]);
        assert_eq!(assets[0].path, dir.path().join("b.txt"));
    }

    #[test]
    fn test_glob_sorted_and_deduplicated() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();
        for name in ["z.tar.gz", "a.tar.gz", "SHA256SUMS"] {
            fs::write(dir.path().join("dist").join(name), b"x").unwrap();
        }

        let assets = resolve_assets(
            dir.path(),
            &["dist/SHA256SUMS".to_string(), "dist/*".to_string()],
        )
        .unwrap();

        assert_eq!(names(&assets), ["SHA256SUMS", "a.tar.gz", "z.tar.gz"]);
    }

    #[test]
    fn test_unmatched_pattern() {
        let dir = tempdir().unwrap();
        let err = resolve_assets(dir.path(), &["missing-*.zip".to_string()]).unwrap_err();
        assert!(err.to_string().contains("no files match 'missing-*.zip'"));
    }

    #[test]
    fn test_same_name_in_two_directories() {
        let dir = tempdir().unwrap();
        for platform in ["linux", "macos"] {
            fs::create_dir(dir.path().join(platform)).unwrap();
            fs::write(dir.path().join(platform).join("app.tar.gz"), b"x").unwrap();
        }

        let err = resolve_assets(dir.path(), &["*/app.tar.gz".to_string()]).unwrap_err();

        assert!(matches!(err, ReleaseError::Asset(_)));
        assert!(err.to_string().contains("duplicate asset name 'app.tar.gz'"));

        let assets = resolve_assets(
            dir.path(),
            &["linux/app.tar.gz".to_string(), "linux/*".to_string()],
        )
        .unwrap();
        assert_eq!(names(&assets), ["app.tar.gz"]);
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();
        let err = resolve_assets(dir.path(), &["dist".to_string()]).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }
}
