//! End-to-end tests for the backend commands against a mock server.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Runs `sage` with an isolated home against `server`.
async fn run_sage(home: &TempDir, server: &MockServer, args: &[&str]) -> assert_cmd::assert::Assert {
    let home = home.path().to_path_buf();
    let uri = server.uri();
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    tokio::task::spawn_blocking(move || {
        cargo_bin_cmd!("sage")
            .env("SAGE_HOME", home)
            .env_remove("SAGE_BASE_URL")
            .env_remove("SAGE_SESSION_COOKIE")
            .arg("--base-url")
            .arg(uri)
            .args(args)
            .write_stdin("n\n")
            .assert()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sessions_list_marks_current() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [
                {"id": 3, "title": "Sore throat", "updated_at": "2024-05-02"},
                {"id": 1, "title": "Sleep"}
            ],
            "current_session_id": 3
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    run_sage(&home, &server, &["sessions", "list"])
        .await
        .success()
        .stdout(predicate::str::contains("*     3  Sore throat"))
        .stdout(predicate::str::contains("Sleep"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sessions_list_empty() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"sessions": [], "current_session_id": null})),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    run_sage(&home, &server, &["sessions", "list"])
        .await
        .success()
        .stdout(predicate::str::contains("No chat history yet"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sessions_show_prints_senders_in_order() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"message": "My throat hurts", "sender": "user"},
                {"message": "<p>Try <b>warm tea</b>.</p>", "sender": "sage"}
            ]
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    run_sage(&home, &server, &["sessions", "show", "3"])
        .await
        .success()
        .stdout(predicate::str::contains("U You:\nMy throat hurts"))
        .stdout(predicate::str::contains("Try warm tea."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sessions_delete_requires_confirmation() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/sessions/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    run_sage(&home, &server, &["sessions", "delete", "3"])
        .await
        .success()
        .stdout(predicate::str::contains("Cancelled."));
    run_sage(&home, &server, &["sessions", "delete", "3", "--yes"])
        .await
        .success()
        .stdout(predicate::str::contains("Deleted session 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_prints_reply() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "I feel dizzy"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "Sit down and drink water.", "session_id": 8})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    run_sage(&home, &server, &["ask", "  I feel dizzy "])
        .await
        .success()
        .stdout(predicate::str::contains("Sit down and drink water."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_surfaces_backend_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized"})))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    run_sage(&home, &server, &["ask", "hello"])
        .await
        .failure()
        .stderr(predicate::str::contains("Unauthorized"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_rejects_text_file_before_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "?"})))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let notes = home.path().join("notes.txt");
    std::fs::write(&notes, "just text").unwrap();

    run_sage(&home, &server, &["upload", notes.to_str().unwrap()])
        .await
        .failure()
        .stderr(predicate::str::contains("Please upload an image or PDF file."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_png_prints_analysis() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "Looks like a mild rash.", "filename": "rash.png"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let image = home.path().join("rash.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0]).unwrap();

    run_sage(
        &home,
        &server,
        &["upload", image.to_str().unwrap(), "--message", "is it bad?"],
    )
    .await
    .success()
    .stdout(predicate::str::contains("Looks like a mild rash."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "healthy", "service": "sage-backend"})),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    run_sage(&home, &server, &["health"])
        .await
        .success()
        .stdout(predicate::str::contains("sage-backend: healthy"));
}
