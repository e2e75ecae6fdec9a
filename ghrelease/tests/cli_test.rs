use clap::Parser;
use ghrelease::cli::Args;

#[test]
fn test_no_arguments() {
    let args = Args::try_parse_from(["ghrelease"]).unwrap();

    assert!(args.assets.is_empty());
    assert!(!args.dry_run);
    assert!(!args.verbose);
    assert_eq!(args.log_level(), "info");
}

#[test]
fn test_assets_keep_order() {
    let args =
        Args::try_parse_from(["ghrelease", "dist/*.tar.gz", "dist/SHA256SUMS", "README.md"])
            .unwrap();

    assert_eq!(
        args.assets,
        vec!["dist/*.tar.gz", "dist/SHA256SUMS", "README.md"]
    );
}

#[test]
fn test_flags() {
    let args = Args::try_parse_from(["ghrelease", "--dry-run", "--verbose", "app.zip"]).unwrap();

    assert!(args.dry_run);
    assert!(args.verbose);
    assert_eq!(args.log_level(), "debug");
    assert_eq!(args.assets, vec!["app.zip"]);
}

#[test]
fn test_unknown_flag() {
    assert!(Args::try_parse_from(["ghrelease", "--tag", "v1.0.0"]).is_err());
}
