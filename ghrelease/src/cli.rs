use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "ghrelease",
    version,
    about = "Publish a GitHub release with notes from CHANGELOG.md",
    long_about = None
)]
pub struct Args {
    /// Files to attach to the release
    /// Paths or glob patterns relative to GITHUB_WORKSPACE, e.g. dist/*.tar.gz
    #[clap(value_name = "ASSETS")]
    pub assets: Vec<String>,

    /// Assemble the release and print it as JSON instead of publishing it
    #[clap(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
