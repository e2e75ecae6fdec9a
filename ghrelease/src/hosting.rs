use async_trait::async_trait;

use crate::error::Result;
use crate::release::{Asset, Release};

/// A release that exists on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    pub owner: String,
    pub repo: String,
    pub id: u64,
    pub tag: String,
    pub html_url: String,
    /// Assets already on the release, as `(name, id)`
    pub existing_assets: Vec<(String, u64)>,
}

impl RemoteRelease {
    pub fn existing_asset(&self, name: &str) -> Option<u64> {
        self.existing_assets
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, id)| *id)
    }
}

/// Where releases are published.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Create the release, or edit the existing one for the same tag.
    async fn create_release(&self, release: &Release) -> Result<RemoteRelease>;

    async fn upload_asset(&self, remote: &RemoteRelease, asset: &Asset) -> Result<()>;
}
