use serde::Serialize;
use std::path::{Path, PathBuf};

/// A release being assembled for publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Release {
    /// `owner/name` slug of the GitHub repository
    pub project_name: String,
    pub commit_hash: String,
    pub tag: Option<String>,
    /// Display name shown on the release page
    pub name: String,
    pub draft: bool,
    pub pre_release: bool,
    pub body: String,
    /// Attached in order
    pub assets: Vec<Asset>,
}

impl Release {
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Tag of the release, or an error if it was never hydrated.
    pub fn tag(&self) -> crate::error::Result<&str> {
        self.tag
            .as_deref()
            .ok_or(crate::error::ReleaseError::MissingTag)
    }
}

/// A local file to attach to the release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub name: String,
    pub path: PathBuf,
}

impl Asset {
    /// Build an asset named after the file name of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self { name, path })
    }

    pub fn content_type(&self) -> &'static str {
        content_type(&self.path)
    }
}

/// Determine content type for an asset
pub fn content_type(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "gz" | "tgz" => "application/gzip",
        "zip" => "application/zip",
        "xz" => "application/x-xz",
        "bz2" => "application/x-bzip2",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}
