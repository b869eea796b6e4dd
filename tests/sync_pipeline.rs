//! End-to-end tests for the sync pipeline
//!
//! These tests drive `sync::run` with a fake terraform binary (a shell
//! script that records its invocations) and wiremock-backed AWS endpoints,
//! verifying the init gate, the local-config gate, and batch continuation
//! past import failures.

use serde_json::json;
use std::path::{Path, PathBuf};
use tfsync::aws::client::AwsClient;
use tfsync::sync::{self, SyncOptions};
use tfsync::terraform::TerraformRunner;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Write an executable fake terraform script into `dir`
fn write_fake_terraform(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("terraform");
    std::fs::write(&script, body).unwrap();
    let mut perms = std::fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script, perms).unwrap();
    script
}

fn test_client(server: &MockServer) -> AwsClient {
    AwsClient::with_static_credentials("us-east-1", &server.uri(), "AKIDEXAMPLE", "secret")
        .expect("client should build")
}

/// Failed init skips every descriptor: zero API calls, zero imports
#[tokio::test]
async fn failed_init_makes_no_api_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let bin_dir = tempfile::tempdir().unwrap();
    let script = write_fake_terraform(bin_dir.path(), "#!/bin/sh\nexit 1\n");

    let work_dir = tempfile::tempdir().unwrap();
    std::fs::write(work_dir.path().join("sfn_pipeline.tf"), "").unwrap();

    let runner = TerraformRunner::new(script, false);
    let opts = SyncOptions {
        path: work_dir.path().to_path_buf(),
        backend_config: None,
    };

    // Init failure is not a process failure
    sync::run(&opts, &runner, &test_client(&server)).await.unwrap();
}

/// A kind with no matching local config file is never enumerated
#[tokio::test]
async fn unmatched_kind_prefix_makes_no_api_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let bin_dir = tempfile::tempdir().unwrap();
    let script = write_fake_terraform(bin_dir.path(), "#!/bin/sh\nexit 0\n");

    // main.tf matches no descriptor's kind prefix
    let work_dir = tempfile::tempdir().unwrap();
    std::fs::write(work_dir.path().join("main.tf"), "").unwrap();

    let runner = TerraformRunner::new(script, false);
    let opts = SyncOptions {
        path: work_dir.path().to_path_buf(),
        backend_config: None,
    };

    sync::run(&opts, &runner, &test_client(&server)).await.unwrap();
}

/// Import failures are logged and the batch continues to later items
#[tokio::test]
async fn import_failure_does_not_stop_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("x-amz-target", "AWSStepFunctions.ListStateMachines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stateMachines": [
                {"name": "sm1", "stateMachineArn": "arn:aws:states:us-east-1:123456789012:stateMachine:sm1"},
                {"name": "sm2", "stateMachineArn": "arn:aws:states:us-east-1:123456789012:stateMachine:sm2"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bin_dir = tempfile::tempdir().unwrap();
    let cmd_log = bin_dir.path().join("commands.log");
    // init succeeds, every import fails; all invocations are recorded
    let script = write_fake_terraform(
        bin_dir.path(),
        &format!(
            "#!/bin/sh\necho \"$@\" >> {}\nif [ \"$1\" = \"import\" ]; then exit 1; fi\nexit 0\n",
            cmd_log.display()
        ),
    );

    let work_dir = tempfile::tempdir().unwrap();
    std::fs::write(work_dir.path().join("sfn_pipeline.tf"), "").unwrap();

    let runner = TerraformRunner::new(script, false);
    let opts = SyncOptions {
        path: work_dir.path().to_path_buf(),
        backend_config: None,
    };

    sync::run(&opts, &runner, &test_client(&server)).await.unwrap();

    let recorded = std::fs::read_to_string(&cmd_log).unwrap();
    let lines: Vec<&str> = recorded.lines().collect();
    assert_eq!(
        lines,
        vec![
            "init",
            "import aws_sfn_state_machine.sm1 arn:aws:states:us-east-1:123456789012:stateMachine:sm1",
            "import aws_sfn_state_machine.sm2 arn:aws:states:us-east-1:123456789012:stateMachine:sm2",
        ]
    );
}

/// Happy path: the crawler scenario produces the documented address and ID
#[tokio::test]
async fn crawler_import_uses_name_for_address_and_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("x-amz-target", "AWSGlue.GetCrawlers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Crawlers": [{"Name": "my-crawler"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bin_dir = tempfile::tempdir().unwrap();
    let cmd_log = bin_dir.path().join("commands.log");
    let script = write_fake_terraform(
        bin_dir.path(),
        &format!("#!/bin/sh\necho \"$@\" >> {}\nexit 0\n", cmd_log.display()),
    );

    let work_dir = tempfile::tempdir().unwrap();
    std::fs::write(work_dir.path().join("crawler_raw.tf"), "").unwrap();

    let runner = TerraformRunner::new(script, false);
    let opts = SyncOptions {
        path: work_dir.path().to_path_buf(),
        backend_config: None,
    };

    sync::run(&opts, &runner, &test_client(&server)).await.unwrap();

    let recorded = std::fs::read_to_string(&cmd_log).unwrap();
    assert!(recorded
        .lines()
        .any(|l| l == "import aws_glue_crawler.my-crawler my-crawler"));
}

/// The backend config flag is forwarded to terraform init
#[tokio::test]
async fn backend_config_flag_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let bin_dir = tempfile::tempdir().unwrap();
    let cmd_log = bin_dir.path().join("commands.log");
    // Record init and fail it so the run stops there
    let script = write_fake_terraform(
        bin_dir.path(),
        &format!("#!/bin/sh\necho \"$@\" >> {}\nexit 1\n", cmd_log.display()),
    );

    let work_dir = tempfile::tempdir().unwrap();
    std::fs::write(work_dir.path().join("sfn_pipeline.tf"), "").unwrap();

    let runner = TerraformRunner::new(script, true);
    let opts = SyncOptions {
        path: work_dir.path().to_path_buf(),
        backend_config: Some(PathBuf::from("backend.hcl")),
    };

    sync::run(&opts, &runner, &test_client(&server)).await.unwrap();

    let recorded = std::fs::read_to_string(&cmd_log).unwrap();
    assert_eq!(
        recorded.trim(),
        "init -no-color -backend-config=backend.hcl"
    );
}
