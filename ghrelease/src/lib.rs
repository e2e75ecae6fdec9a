//! # ghrelease
//!
//! Publish a GitHub release from a CI job, using the matching section of
//! `CHANGELOG.md` as the release notes.
//!
//! ## Overview
//!
//! `ghrelease` reads its settings from the environment of a GitHub Actions
//! run, works out the project, commit and tag being released, extracts the
//! notes for that version from the changelog and publishes the release,
//! attaching any files given on the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Publish the release for the tag in GITHUB_REF
//! ghrelease
//!
//! # Attach build artifacts
//! ghrelease 'dist/*.tar.gz' dist/SHA256SUMS
//!
//! # Print the assembled release without publishing
//! ghrelease --dry-run
//! ```
//!
//! ## Configuration
//!
//! | Variable | Meaning |
//! |---|---|
//! | `GITHUB_TOKEN` | API token (required) |
//! | `ALLOW_EMPTY_CHANGELOG` | publish even when the changelog section is empty |
//! | `ALLOW_TAG_PREFIX` | accept tags such as `v1.0.0` for version `1.0.0` |
//! | `RELEASE_NAME` | fixed release name |
//! | `RELEASE_NAME_PREFIX` / `RELEASE_NAME_POSTFIX` | wrap the tag to build the name |
//! | `DRAFT_RELEASE` / `PRE_RELEASE` | release flags |
//! | `CHANGELOG_FILE` | changelog path inside the workspace |
//!
//! Boolean variables are enabled only by the value `true`.

/// Expansion of asset arguments into files
pub mod assets;

/// Markdown changelog parsing
pub mod changelog;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration resolved from the environment
pub mod config;

/// Environment variable access
pub mod env;

/// Error types and error handling utilities
pub mod error;

/// Filesystem access for the changelog
pub mod fs;

/// GitHub API client for creating releases and uploading assets
pub mod github;

/// Hosting service abstraction
pub mod hosting;

/// Hydration, validation and publishing stages
pub mod pipeline;

/// Release and asset records
pub mod release;

/// Top-level run sequencing
pub mod releaser;

/// Repository facts from the CI environment
pub mod repository;
