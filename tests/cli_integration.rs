//! Integration tests for the `td` CLI.
//!
//! Each test creates a temp config directory, runs `td` as a subprocess,
//! and verifies stdout/stderr and session-file contents. Network commands
//! run against a canned single-thread HTTP responder.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;

use tempfile::TempDir;

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

fn td(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(td_bin())
        .arg("--config-dir")
        .arg(config_dir)
        .args(args)
        .env_remove("TASKDECK_CONFIG_DIR")
        .env_remove("TASKDECK_PASSWORD")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Store a credential directly, skipping the network.
fn login_as(config_dir: &Path, username: &str, role: &str) {
    let output = td(
        config_dir,
        &[
            "login",
            "--token",
            "test-token",
            "--role",
            role,
            "--username",
            username,
        ],
    );
    assert!(output.status.success(), "login failed: {}", stderr(&output));
}

/// A canned HTTP responder: answers one connection per queued response,
/// recording each raw request.
struct CannedServer {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: thread::JoinHandle<()>,
}

impl CannedServer {
    fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                seen.lock().unwrap().push(read_request(&mut stream));
                let reason = if status < 400 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });

        CannedServer {
            url,
            requests,
            handle,
        }
    }

    fn finish(self) -> Vec<String> {
        self.handle.join().unwrap();
        Arc::try_unwrap(self.requests)
            .unwrap()
            .into_inner()
            .unwrap()
    }
}

/// Read headers plus a Content-Length body off one request.
fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut buf).unwrap();
        raw.extend_from_slice(&buf[..n]);
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        if n == 0 {
            break raw.len();
        }
    };

    let headers = String::from_utf8_lossy(&raw[..header_end]).into_owned();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    while raw.len() < header_end + content_length {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&raw).into_owned()
}

fn point_at(config_dir: &Path, url: &str) {
    std::fs::write(
        config_dir.join("config.toml"),
        format!("[backend]\nurl = \"{}\"\n", url),
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

#[test]
fn login_whoami_logout_roundtrip() {
    let dir = TempDir::new().unwrap();
    login_as(dir.path(), "alice", "manager");
    assert!(dir.path().join("session.json").exists());

    let output = td(dir.path(), &["whoami"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "alice (Manager)");

    let output = td(dir.path(), &["logout"]);
    assert!(output.status.success());
    assert!(!dir.path().join("session.json").exists());

    let output = td(dir.path(), &["whoami"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not logged in"));
}

#[test]
fn login_reports_role() {
    let dir = TempDir::new().unwrap();
    let output = td(
        dir.path(),
        &[
            "login", "--token", "t", "--role", "admin", "--username", "root",
        ],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "logged in as root (Admin)");
}

#[test]
fn login_via_backend_stores_granted_role() {
    let server = CannedServer::start(vec![(
        200,
        r#"{"token":"issued","role":"Member","username":"bob"}"#,
    )]);
    let dir = TempDir::new().unwrap();
    point_at(dir.path(), &server.url);

    let output = td(dir.path(), &["login", "bob", "--password", "hunter2"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "logged in as bob (Member)");

    let requests = server.finish();
    assert!(requests[0].starts_with("POST /api/auth/login"));
    assert!(requests[0].contains(r#""username":"bob""#));

    let output = td(dir.path(), &["whoami"]);
    assert_eq!(stdout(&output).trim(), "bob (Member)");
}

// ---------------------------------------------------------------------------
// Task commands over the wire
// ---------------------------------------------------------------------------

#[test]
fn list_sends_bearer_token_and_renders_table() {
    let server = CannedServer::start(vec![(
        200,
        r#"[{"_id":"t1","title":"Ship the report","assignedTo":"bob","status":"In Progress"}]"#,
    )]);
    let dir = TempDir::new().unwrap();
    point_at(dir.path(), &server.url);
    login_as(dir.path(), "alice", "manager");

    let output = td(dir.path(), &["list"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Ship the report"));
    assert!(out.contains("In Progress"));

    let requests = server.finish();
    assert!(requests[0].starts_with("GET /api/tasks"));
    assert!(requests[0].contains("Authorization: Bearer test-token"));
}

#[test]
fn list_filters_land_in_the_query_string() {
    let server = CannedServer::start(vec![(200, "[]")]);
    let dir = TempDir::new().unwrap();
    point_at(dir.path(), &server.url);
    login_as(dir.path(), "alice", "admin");

    let output = td(dir.path(), &["list", "--status", "done", "--assignee", "bob"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("no tasks"));

    let requests = server.finish();
    let request_line = requests[0].lines().next().unwrap();
    assert!(request_line.contains("status=Done"));
    assert!(request_line.contains("assignedTo=bob"));
}

#[test]
fn create_posts_wire_field_names() {
    let server = CannedServer::start(vec![(
        200,
        r#"{"_id":"t9","title":"New task","assignedTo":"carol","status":"To Do"}"#,
    )]);
    let dir = TempDir::new().unwrap();
    point_at(dir.path(), &server.url);
    login_as(dir.path(), "alice", "manager");

    let output = td(dir.path(), &["create", "New task", "carol"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("New task"));

    let requests = server.finish();
    assert!(requests[0].starts_with("POST /api/tasks"));
    assert!(requests[0].contains(r#""assignedTo":"carol""#));
    assert!(requests[0].contains(r#""status":"To Do""#));
}

#[test]
fn create_surfaces_server_message() {
    let server = CannedServer::start(vec![(400, r#"{"message":"Title already taken"}"#)]);
    let dir = TempDir::new().unwrap();
    point_at(dir.path(), &server.url);
    login_as(dir.path(), "alice", "admin");

    let output = td(dir.path(), &["create", "Duplicate", "bob"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Title already taken"));
    server.finish();
}

#[test]
fn status_puts_to_the_task_endpoint() {
    let list = r#"[{"_id":"t1","title":"Ship","assignedTo":"bob","status":"To Do"}]"#;
    let updated = r#"{"_id":"t1","title":"Ship","assignedTo":"bob","status":"Done"}"#;
    let server = CannedServer::start(vec![(200, list), (200, updated)]);
    let dir = TempDir::new().unwrap();
    point_at(dir.path(), &server.url);
    login_as(dir.path(), "alice", "manager");

    let output = td(dir.path(), &["status", "t1", "done"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "[x] t1 Ship @bob");

    let requests = server.finish();
    assert!(requests[1].starts_with("PUT /api/tasks/t1"));
    assert!(requests[1].contains(r#""status":"Done""#));
}

#[test]
fn delete_hits_each_task_endpoint() {
    let list = r#"[{"_id":"t1","title":"A","assignedTo":"bob","status":"To Do"},
                   {"_id":"t2","title":"B","assignedTo":"bob","status":"To Do"}]"#;
    let server = CannedServer::start(vec![(200, list), (200, "{}"), (200, "{}")]);
    let dir = TempDir::new().unwrap();
    point_at(dir.path(), &server.url);
    login_as(dir.path(), "alice", "admin");

    let output = td(dir.path(), &["delete", "t1", "t2", "--yes"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("deleted t1"));
    assert!(out.contains("deleted t2"));

    let requests = server.finish();
    assert!(requests[1].starts_with("DELETE /api/tasks/t1"));
    assert!(requests[2].starts_with("DELETE /api/tasks/t2"));
}

#[test]
fn unreachable_backend_reports_server_error() {
    let dir = TempDir::new().unwrap();
    // Bind then drop so nothing is listening on the port
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    point_at(dir.path(), &format!("http://127.0.0.1:{}", port));
    login_as(dir.path(), "alice", "admin");

    let output = td(dir.path(), &["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Server error"));
}

// ---------------------------------------------------------------------------
// Authorization at the CLI boundary
// ---------------------------------------------------------------------------

#[test]
fn member_cannot_create() {
    let dir = TempDir::new().unwrap();
    login_as(dir.path(), "bob", "member");

    // Refused before any network traffic, so no server is needed
    let output = td(dir.path(), &["create", "Sneaky", "bob"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Members cannot create tasks"));
}

#[test]
fn member_cannot_delete() {
    let dir = TempDir::new().unwrap();
    login_as(dir.path(), "bob", "member");

    let output = td(dir.path(), &["delete", "t1", "--yes"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("only Admins and Managers"));
}
