use crate::env::Environment;
use crate::error::{ReleaseError, Result};

pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const GITHUB_SHA: &str = "GITHUB_SHA";
pub const GITHUB_REF: &str = "GITHUB_REF";

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Facts about the repository a release is cut from.
pub trait Repository {
    /// `owner/name` slug.
    fn read_project_name(&mut self) -> Result<String>;

    fn read_commit_hash(&mut self) -> Result<String>;

    /// Read the release tag and reconcile it with `version`.
    ///
    /// An empty `version` is filled with the tag's version. A non-empty one
    /// must equal the tag, or the tag without its prefix when `allow_prefix`
    /// is set.
    fn read_tag(&mut self, version: &mut String, allow_prefix: bool) -> Result<()>;

    /// Tag recorded by the last successful `read_tag`.
    fn tag(&self) -> Option<String>;
}

/// Repository facts taken from the GitHub Actions runner environment.
#[derive(Debug, Clone)]
pub struct ActionsRepository<E> {
    env: E,
    tag: Option<String>,
}

impl<E: Environment> ActionsRepository<E> {
    pub fn new(env: E) -> Self {
        Self { env, tag: None }
    }

    fn required(&self, key: &str) -> Result<String> {
        self.env
            .var(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ReleaseError::Repository(format!("env.var '{key}' not defined")))
    }
}

impl<E: Environment> Repository for ActionsRepository<E> {
    fn read_project_name(&mut self) -> Result<String> {
        let slug = self.required(GITHUB_REPOSITORY)?;
        parse_slug(&slug)?;
        Ok(slug)
    }

    fn read_commit_hash(&mut self) -> Result<String> {
        self.required(GITHUB_SHA)
    }

    fn read_tag(&mut self, version: &mut String, allow_prefix: bool) -> Result<()> {
        let git_ref = self.required(GITHUB_REF)?;
        let tag = git_ref
            .strip_prefix(TAG_REF_PREFIX)
            .filter(|tag| !tag.is_empty())
            .ok_or_else(|| {
                ReleaseError::Repository(format!(
                    "malformed env.var '{GITHUB_REF}': expected a tag reference, got '{git_ref}'"
                ))
            })?;

        let (prefix, bare) = split_prefix(tag);
        if tag != version.as_str() {
            if !prefix.is_empty() && !allow_prefix {
                return Err(ReleaseError::Repository(format!(
                    "malformed env.var '{GITHUB_REF}' (control tag prefix via env.var 'ALLOW_TAG_PREFIX')"
                )));
            }
            if bare.is_empty() {
                return Err(ReleaseError::Repository(format!(
                    "tag '{tag}' does not contain a version"
                )));
            }
            if version.is_empty() {
                *version = bare.to_string();
            } else if bare != version.as_str() {
                return Err(ReleaseError::Repository(format!(
                    "tag '{tag}' does not match requested version '{version}'"
                )));
            }
        }

        tracing::debug!("Resolved tag {} for version {}", tag, version);
        self.tag = Some(tag.to_string());
        Ok(())
    }

    fn tag(&self) -> Option<String> {
        self.tag.clone()
    }
}

/// Split `owner/name` into its parts.
pub fn parse_slug(slug: &str) -> Result<(&str, &str)> {
    match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(ReleaseError::InvalidRepo(format!(
            "'{slug}', expected owner/repo"
        ))),
    }
}

/// Split a tag into its non-numeric prefix and the version that follows.
fn split_prefix(tag: &str) -> (&str, &str) {
    let idx = tag.find(|c: char| c.is_ascii_digit()).unwrap_or(tag.len());
    tag.split_at(idx)
}
