use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("'GITHUB_TOKEN' is not defined")]
    MissingToken,

    #[error("empty changelog for requested version")]
    EmptyChangelog,

    #[error("changelog does not contain changes for requested project version")]
    NoChanges,

    #[error("{0}")]
    Repository(String),

    #[error("release tag is not set")]
    MissingTag,

    #[error("Invalid repository format: {0}")]
    InvalidRepo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(Box<octocrab::Error>),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Release creation failed: {0}")]
    ReleaseCreation(String),

    #[error("Asset upload failed for '{asset}' on release {tag}: {source}")]
    AssetAttach {
        asset: String,
        tag: String,
        #[source]
        source: Box<ReleaseError>,
    },
}

impl ReleaseError {
    /// True when the remote release already exists and only asset attachment
    /// failed, so the fix is to edit the release rather than re-run from scratch.
    pub fn is_partial_publish(&self) -> bool {
        matches!(self, ReleaseError::AssetAttach { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;

impl From<octocrab::Error> for ReleaseError {
    fn from(err: octocrab::Error) -> Self {
        ReleaseError::GitHubApi(Box::new(err))
    }
}
