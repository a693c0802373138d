
use predicates::str::contains;
use setup::DEFAULT_TIMEOUT;

use crate::setup::make_cli;

#[test]
fn test_missing_google_config_fails() {
    let mut cmd = make_cli();

    let assert = cmd
        .env_remove("GOOGLE_CLIENT_ID")
        .env_remove("GOOGLE_CLIENT_EMAIL")
        .env_remove("GOOGLE_PRIVATE_KEY")
        .env_remove("SHEET_ID")
        .assert();

    assert
        .failure()
        .stderr(contains("required arguments were not provided"))
        .stderr(contains("--client-email"));
}

#[test]
fn test_server_binds_and_listens() {
    let mut cmd = make_cli();

    let assert = cmd
        .timeout(DEFAULT_TIMEOUT)
        .env("GOOGLE_CLIENT_ID", "client-1")
        .env("GOOGLE_CLIENT_EMAIL", "svc@example.iam.gserviceaccount.com")
        .env("GOOGLE_PRIVATE_KEY", "dummy")
        .env("SHEET_ID", "test-sheet")
        .arg("--bind")
        .arg("127.0.0.1:0")
        .assert();

    assert.interrupted(/* We expect a timeout here */).stdout(contains("listening"));
}

#[test]
fn test_version_flag() {
    let mut cmd = make_cli();

    let assert = cmd.arg("--version").assert();

    assert.success().stdout(contains("sheetsrv"));
}
