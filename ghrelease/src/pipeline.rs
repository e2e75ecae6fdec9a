use tracing::{debug, info, warn};

use crate::changelog::Changelog;
use crate::config::Configuration;
use crate::error::{ReleaseError, Result};
use crate::fs::FileSystem;
use crate::hosting::{HostingService, RemoteRelease};
use crate::release::Release;
use crate::repository::Repository;

impl Configuration {
    /// Fill the identity of `release` from `repository`.
    ///
    /// Reads the project name, commit hash and tag in that order and returns
    /// the first failure untouched. `version` is the requested version; it is
    /// filled from the tag when empty.
    pub fn hydrate<R: Repository + ?Sized>(
        &self,
        repository: &mut R,
        version: &mut String,
        release: &mut Release,
    ) -> Result<()> {
        let project_name = repository.read_project_name()?;
        let commit_hash = repository.read_commit_hash()?;
        repository.read_tag(version, self.allow_tag_prefix)?;
        let tag = repository.tag().ok_or(ReleaseError::MissingTag)?;

        release.name = self.release_name(&tag);
        release.project_name = project_name;
        release.commit_hash = commit_hash;
        release.tag = Some(tag);

        info!(
            "Releasing {} at {} as '{}'",
            release.project_name, release.commit_hash, release.name
        );
        Ok(())
    }

    /// Read the changelog into the body of `release`.
    ///
    /// Errors from the changelog are returned as-is. An empty body is rejected
    /// unless `ALLOW_EMPTY_CHANGELOG` is set.
    pub fn release_body<C: Changelog + ?Sized>(
        &self,
        changelog: &mut C,
        fs: &dyn FileSystem,
        release: &mut Release,
    ) -> Result<()> {
        changelog.read_changes(fs)?;

        let body = changelog.body();
        if body.is_empty() {
            if !self.allow_empty_changelog {
                return Err(ReleaseError::NoChanges);
            }
            warn!("Changelog is empty, publishing release without notes");
        }

        debug!("Release body: {} bytes", body.len());
        release.body = body.to_string();
        Ok(())
    }

    /// Create the release on `service`, then attach its assets in order.
    ///
    /// Asset failures abort the remaining uploads and come back as
    /// [`ReleaseError::AssetAttach`], since the remote release already exists.
    pub async fn publish<S: HostingService + ?Sized>(
        &self,
        release: &Release,
        service: &S,
    ) -> Result<RemoteRelease> {
        let tag = release.tag()?;
        if release.body.is_empty() && !self.allow_empty_changelog {
            return Err(ReleaseError::NoChanges);
        }

        info!("Publishing release {}", tag);
        let remote = service.create_release(release).await?;

        for asset in release.assets() {
            service
                .upload_asset(&remote, asset)
                .await
                .map_err(|source| ReleaseError::AssetAttach {
                    asset: asset.name.clone(),
                    tag: tag.to_string(),
                    source: Box::new(source),
                })?;
        }

        info!(
            "Published {} with {} asset(s): {}",
            tag,
            release.assets.len(),
            remote.html_url
        );
        Ok(remote)
    }
}
