use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghrelease::cli::Args;
use ghrelease::env::ProcessEnv;
use ghrelease::error::ReleaseError;
use ghrelease::releaser::Releaser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .init();

    let releaser = Releaser::new(args, ProcessEnv);
    if let Err(err) = releaser.run().await {
        // The release exists remotely; re-running edits it in place.
        if err
            .downcast_ref::<ReleaseError>()
            .is_some_and(ReleaseError::is_partial_publish)
        {
            tracing::error!("{}", err);
            tracing::error!("Release was created but not all assets were attached");
            std::process::exit(2);
        }
        return Err(err);
    }

    Ok(())
}
