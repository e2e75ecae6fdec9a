use anyhow::Result;

use crate::assets::resolve_assets;
use crate::changelog::Changes;
use crate::cli::Args;
use crate::config::{self, Configuration};
use crate::env::Environment;
use crate::error::Result as ReleaseResult;
use crate::fs::LocalFs;
use crate::github::GitHubClient;
use crate::release::Release;
use crate::repository::ActionsRepository;

/// A release that passed every check and is ready to publish.
#[derive(Debug)]
pub struct Prepared {
    pub config: Configuration,
    pub token: String,
    pub release: Release,
}

pub struct Releaser<E> {
    args: Args,
    env: E,
}

impl<E: Environment> Releaser<E> {
    pub fn new(args: Args, env: E) -> Self {
        Self { args, env }
    }

    /// Resolve configuration, assets, identity and body, in that order.
    pub fn prepare(&self) -> ReleaseResult<Prepared> {
        let mut release = Release::default();
        let mut changes = Changes::default();

        let (config, token) = Configuration::resolve(&self.env, &mut release, &mut changes)?;

        let workspace = config::workspace(&self.env);
        release.assets = resolve_assets(&workspace, &self.args.assets)?;
        tracing::info!("Attaching {} asset(s)", release.assets.len());

        let mut repository = ActionsRepository::new(&self.env);
        config.hydrate(&mut repository, &mut changes.version, &mut release)?;

        tracing::info!(
            "Reading changes for {} from {}",
            changes.version,
            changes.file().display()
        );
        config.release_body(&mut changes, &LocalFs, &mut release)?;

        Ok(Prepared {
            config,
            token,
            release,
        })
    }

    pub async fn run(&self) -> Result<()> {
        let Prepared {
            config,
            token,
            release,
        } = self.prepare()?;

        if self.args.dry_run {
            tracing::info!("Dry run, not publishing");
            println!("{}", serde_json::to_string_pretty(&release)?);
            return Ok(());
        }

        let github_client = GitHubClient::new(token)?;
        let remote = config.publish(&release, &github_client).await?;

        tracing::info!("Release URL: {}", remote.html_url);
        Ok(())
    }
}
