//! End-to-end tests for the `gospur` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::thread;
use tempfile::TempDir;

fn gospur() -> Command {
    let mut cmd = Command::cargo_bin("gospur").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package_version() {
    gospur()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("|_|"))
        .stdout(predicate::str::contains("Version:"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_rejects_parent_traversal() {
    let dir = TempDir::new().unwrap();

    gospur()
        .current_dir(dir.path())
        .args(["init", "../outside", "--framework", "echo"])
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("../outside").exists());
}

#[test]
fn init_rejects_unknown_framework() {
    let dir = TempDir::new().unwrap();

    gospur()
        .current_dir(dir.path())
        .args([
            "init",
            "app",
            "--framework",
            "gin",
            "--module",
            "github.com/me/app",
        ])
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("app").exists());
}

#[test]
fn init_with_flags_is_non_interactive() {
    let dir = TempDir::new().unwrap();

    gospur()
        .current_dir(dir.path())
        .args([
            "init",
            "my-app",
            "--framework",
            "chi",
            "--styling",
            "vanilla",
            "--render",
            "templates",
            "--extra",
            "htmx,dockerfile",
            "--module",
            "github.com/me/my-app",
            "--skip-mod-init",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("cd my-app"))
        .stdout(predicate::str::contains("go mod tidy"));

    let project = dir.path().join("my-app");
    let main_go = std::fs::read_to_string(project.join("main.go")).unwrap();
    assert!(main_go.contains("github.com/me/my-app"));
    assert!(project.join("Dockerfile").is_file());
    assert!(project.join("web/layouts/Root.html").is_file());
    assert!(project.join("public/gopher.png").is_file());
    assert!(!project.join("tailwind.config.js").exists());
    assert!(!project.join("go.mod").exists());
}

#[test]
fn init_refuses_non_empty_directory() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("taken");
    std::fs::create_dir(&project).unwrap();
    std::fs::write(project.join("keep.txt"), "mine").unwrap();

    gospur()
        .current_dir(dir.path())
        .args([
            "init",
            "taken",
            "--framework",
            "fiber",
            "--styling",
            "vanilla",
            "--render",
            "templates",
            "--module",
            "github.com/me/taken",
            "--skip-mod-init",
        ])
        .assert()
        .failure()
        .code(1);

    assert_eq!(
        std::fs::read_to_string(project.join("keep.txt")).unwrap(),
        "mine"
    );
    assert!(!project.join("main.go").exists());
}

/// Serves the same release JSON for every request, returns the base URL
fn serve_release(tag: &str) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let body = format!(r#"{{"tag_name": "{tag}", "assets": []}}"#);

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let _ = request.respond(tiny_http::Response::from_string(body.clone()));
        }
    });

    format!("http://{addr}/releases")
}

#[test]
fn update_is_a_no_op_when_already_current() {
    let base = serve_release(&format!("v{}", env!("CARGO_PKG_VERSION")));

    gospur()
        .env("GOSPUR_RELEASE_URL", base)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"));
}

#[test]
fn update_reports_unreachable_release_api() {
    gospur()
        .env("GOSPUR_RELEASE_URL", "http://127.0.0.1:9/releases")
        .arg("update")
        .assert()
        .failure()
        .code(1);
}
