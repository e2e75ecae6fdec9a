use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;

use crate::error::{ReleaseError, Result};
use crate::hosting::{HostingService, RemoteRelease};
use crate::release::{Asset, Release};
use crate::repository::parse_slug;

const UPLOADS_URL: &str = "https://uploads.github.com";
const API_URL: &str = "https://api.github.com";

pub struct GitHubClient {
    octocrab: Octocrab,
    http_client: Client,
    token: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        let octocrab = Octocrab::builder().personal_token(token.clone()).build()?;

        let http_client = Client::builder()
            .user_agent("ghrelease")
            .timeout(std::time::Duration::from_secs(300))
            .build()?;

        Ok(Self {
            octocrab,
            http_client,
            token,
        })
    }

    /// Delete an existing asset from a release
    async fn delete_asset(&self, owner: &str, repo: &str, asset_id: u64) -> Result<()> {
        let url = format!("{API_URL}/repos/{owner}/{repo}/releases/assets/{asset_id}");

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReleaseError::Asset(format!(
                "Failed to delete asset {asset_id}: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// HTTP status of an error response from the GitHub API.
fn api_status(err: &octocrab::Error) -> Option<u16> {
    match err {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

fn target_commitish(release: &Release) -> Option<&str> {
    Some(release.commit_hash.as_str()).filter(|commit| !commit.is_empty())
}

#[async_trait]
impl HostingService for GitHubClient {
    async fn create_release(&self, release: &Release) -> Result<RemoteRelease> {
        let (owner, repo) = parse_slug(&release.project_name)?;
        let tag = release.tag()?;

        let repos = self.octocrab.repos(owner, repo);
        let releases = repos.releases();

        let existing = match releases.get_by_tag(tag).await {
            Ok(existing) => Some(existing),
            Err(e) if api_status(&e) == Some(404) => None,
            Err(e) => return Err(e.into()),
        };

        let published = match existing {
            Some(existing) => {
                tracing::info!("Release {} already exists, will update it", tag);

                let mut update_builder = releases
                    .update(existing.id.0)
                    .name(&release.name)
                    .body(&release.body)
                    .draft(release.draft)
                    .prerelease(release.pre_release);

                if let Some(commit) = target_commitish(release) {
                    update_builder = update_builder.target_commitish(commit);
                }

                update_builder
                    .send()
                    .await
                    .map_err(|e| ReleaseError::ReleaseCreation(e.to_string()))?
            }
            None => {
                tracing::info!("Creating new release: {}", tag);

                let mut release_builder = releases
                    .create(tag)
                    .name(&release.name)
                    .body(&release.body)
                    .draft(release.draft)
                    .prerelease(release.pre_release);

                if let Some(commit) = target_commitish(release) {
                    release_builder = release_builder.target_commitish(commit);
                }

                release_builder
                    .send()
                    .await
                    .map_err(|e| ReleaseError::ReleaseCreation(e.to_string()))?
            }
        };

        Ok(RemoteRelease {
            owner: owner.to_string(),
            repo: repo.to_string(),
            id: published.id.0,
            tag: tag.to_string(),
            html_url: published.html_url.to_string(),
            existing_assets: published
                .assets
                .iter()
                .map(|asset| (asset.name.clone(), asset.id.0))
                .collect(),
        })
    }

    async fn upload_asset(&self, remote: &RemoteRelease, asset: &Asset) -> Result<()> {
        if let Some(asset_id) = remote.existing_asset(&asset.name) {
            tracing::info!("Deleting existing asset: {}", asset.name);
            self.delete_asset(&remote.owner, &remote.repo, asset_id).await?;
        }

        tracing::info!("Uploading asset: {}", asset.name);

        let file_content = tokio::fs::read(&asset.path).await?;

        let url = format!(
            "{UPLOADS_URL}/repos/{}/{}/releases/{}/assets",
            remote.owner, remote.repo, remote.id
        );

        let response = self
            .http_client
            .post(&url)
            .query(&[("name", asset.name.as_str())])
            .header("Content-Type", asset.content_type())
            .bearer_auth(&self.token)
            .body(file_content)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReleaseError::Asset(format!(
                "Failed to upload asset: {status} - {error_text}"
            )));
        }

        tracing::info!("Successfully uploaded: {}", asset.name);
        Ok(())
    }
}
