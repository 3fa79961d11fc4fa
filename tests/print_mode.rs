//! `--print` runs of the cartline binary

use serde_json::json;
use std::io::Write;
use std::process::{Command, Output};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_file(base_url: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[default]\nbase_url = {base_url}").unwrap();
    file
}

fn run_print(profile: &tempfile::NamedTempFile, entity: &'static str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cartline"))
        .args(["--print", "--entity", entity])
        .env("CARTLINE_PROFILE_PATH", profile.path())
        .env("CARTLINE_LOG", "off")
        .output()
        .unwrap()
}

#[tokio::test]
async fn print_should_list_the_table_and_succeed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/aisles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aisles": [{"id": "1", "aisle_id": 3, "aisle": "bakery"}]
        })))
        .mount(&server)
        .await;

    let profile = profile_file(&server.uri());
    // The mock server needs the runtime while the child process runs
    let output = tokio::task::spawn_blocking(move || run_print(&profile, "aisles"))
        .await
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("bakery"));
}

#[test]
fn print_should_exit_non_zero_when_the_load_fails() {
    let profile = profile_file("http://127.0.0.1:9");
    let output = run_print(&profile, "aisles");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load aisles"));
}
