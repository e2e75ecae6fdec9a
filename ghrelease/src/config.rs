use std::path::{Path, PathBuf};

use crate::changelog::Changes;
use crate::env::Environment;
use crate::error::{ReleaseError, Result};
use crate::release::Release;

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITHUB_WORKSPACE: &str = "GITHUB_WORKSPACE";
pub const CHANGELOG_FILE: &str = "CHANGELOG_FILE";
pub const ALLOW_EMPTY_CHANGELOG: &str = "ALLOW_EMPTY_CHANGELOG";
pub const ALLOW_TAG_PREFIX: &str = "ALLOW_TAG_PREFIX";
pub const RELEASE_NAME: &str = "RELEASE_NAME";
pub const RELEASE_NAME_PREFIX: &str = "RELEASE_NAME_PREFIX";
pub const RELEASE_NAME_POSTFIX: &str = "RELEASE_NAME_POSTFIX";
pub const DRAFT_RELEASE: &str = "DRAFT_RELEASE";
pub const PRE_RELEASE: &str = "PRE_RELEASE";

pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";

/// Run configuration resolved from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub allow_empty_changelog: bool,
    pub allow_tag_prefix: bool,
    pub release_name: String,
    pub release_name_prefix: String,
    pub release_name_postfix: String,
}

impl Configuration {
    /// Resolve configuration and the GitHub token from `env`.
    ///
    /// Also writes the draft/pre-release flags into `release`, resets its
    /// asset list, and points `changes` at the changelog inside the workspace.
    pub fn resolve<E: Environment + ?Sized>(
        env: &E,
        release: &mut Release,
        changes: &mut Changes,
    ) -> Result<(Self, String)> {
        let token = env
            .var(GITHUB_TOKEN)
            .filter(|token| !token.is_empty())
            .ok_or(ReleaseError::MissingToken)?;

        let config = Self {
            allow_empty_changelog: env.flag(ALLOW_EMPTY_CHANGELOG),
            allow_tag_prefix: env.flag(ALLOW_TAG_PREFIX),
            release_name: env.string(RELEASE_NAME),
            release_name_prefix: env.string(RELEASE_NAME_PREFIX),
            release_name_postfix: env.string(RELEASE_NAME_POSTFIX),
        };

        release.draft = env.flag(DRAFT_RELEASE);
        release.pre_release = env.flag(PRE_RELEASE);
        release.assets = Vec::new();

        changes.set_file(changelog_path(&workspace(env), env.var(CHANGELOG_FILE)));

        tracing::debug!("Resolved configuration: {:?}", config);
        Ok((config, token))
    }

    /// Display name for a release of `tag`.
    ///
    /// A non-empty `RELEASE_NAME` wins; otherwise the tag is wrapped in the
    /// configured prefix and postfix.
    pub fn release_name(&self, tag: &str) -> String {
        if !self.release_name.is_empty() {
            return self.release_name.clone();
        }
        format!(
            "{}{}{}",
            self.release_name_prefix, tag, self.release_name_postfix
        )
    }
}

/// Workspace root, `.` unless `GITHUB_WORKSPACE` is set.
pub fn workspace<E: Environment + ?Sized>(env: &E) -> PathBuf {
    env.var(GITHUB_WORKSPACE)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn changelog_path(workspace: &Path, file: Option<String>) -> PathBuf {
    let file = file
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_CHANGELOG.to_string());
    workspace.join(file)
}
