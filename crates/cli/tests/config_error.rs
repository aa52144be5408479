use clap::Parser;
use cli::args::Cli;

#[test]
fn test_config_failure_still_initializes_logging() {
    assert!(!tracing::dispatcher::has_been_set());

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let cli = Cli::try_parse_from(["diabetes-risk", "--config", missing.to_str().unwrap()]).unwrap();
    let err = cli::run(cli).unwrap_err();

    assert!(format!("{:#}", err).contains("loading configuration"));
    assert!(tracing::dispatcher::has_been_set());
}
