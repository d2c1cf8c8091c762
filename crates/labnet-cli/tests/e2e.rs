//! End-to-end tests for the labnet CLI.
//!
//! Tests invoke the `labnet` binary as a subprocess against a temporary
//! data directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn labnet(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_labnet"));
    cmd.arg("--data-dir").arg(dir).env_remove("LABNET_DATA_DIR");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    labnet(dir).args(args).output().unwrap()
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run(dir, args);
    assert!(
        output.status.success(),
        "labnet {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = args.to_vec();
    full.extend(["--format", "json"]);
    serde_json::from_str(&run_ok(dir, &full)).unwrap()
}

fn init_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["init"]);
    dir
}

// === Init ===

#[test]
fn e2e_init_creates_collections_and_config() {
    let dir = TempDir::new().unwrap();
    let stdout = run_ok(dir.path(), &["init"]);
    assert!(stdout.contains("Initialized"));

    let collections = dir.path().join("collections");
    for key in [
        "currentUser",
        "allUsers",
        "posts",
        "savedPosts",
        "notifications",
        "connectionRequests",
        "conversations",
        "messages",
    ] {
        assert!(
            collections.join(format!("{key}.json")).exists(),
            "missing {key}.json"
        );
    }
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn e2e_init_twice_keeps_data() {
    let dir = init_data_dir();
    run_ok(dir.path(), &["post", "Keep me"]);
    let stdout = run_ok(dir.path(), &["init"]);
    assert!(stdout.contains("Reinitialized"));

    let feed = run_json(dir.path(), &["feed"]);
    assert_eq!(feed[0]["content"], "Keep me");
}

#[test]
fn e2e_uninitialized_dir_is_refused() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["feed"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("labnet init"), "stderr: {stderr}");
}

// === Feed and posts ===

#[test]
fn e2e_feed_is_newest_first_and_limited() {
    let dir = init_data_dir();
    let feed = run_json(dir.path(), &["feed", "-n", "2"]);
    let ids: Vec<&str> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["post-1", "post-2"]);
}

#[test]
fn e2e_post_then_feed() {
    let dir = init_data_dir();
    let created = run_json(dir.path(), &["post", "Fresh results"]);
    assert_eq!(created["outcome"], "created");
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("post-"));

    let feed = run_json(dir.path(), &["feed", "-n", "1"]);
    assert_eq!(feed[0]["id"], id.as_str());
    assert_eq!(feed[0]["author"]["id"], "1");
}

#[test]
fn e2e_job_without_location_is_rejected() {
    let dir = init_data_dir();
    let output = run(
        dir.path(),
        &[
            "post", "--kind", "job", "--position", "Postdoc", "--company", "EMBL",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("location"), "stderr: {stderr}");

    let jobs = run_json(dir.path(), &["jobs"]);
    assert_eq!(jobs.as_array().unwrap().len(), 1);
}

#[test]
fn e2e_like_toggles() {
    let dir = init_data_dir();
    let first = run_json(dir.path(), &["like", "post-3"]);
    assert_eq!(first["liked"], true);
    let second = run_json(dir.path(), &["like", "post-3"]);
    assert_eq!(second["liked"], false);
    assert_eq!(first["likes"].as_u64().unwrap(), second["likes"].as_u64().unwrap() + 1);
}

#[test]
fn e2e_like_unknown_post_fails() {
    let dir = init_data_dir();
    let output = run(dir.path(), &["like", "post-nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no such post"));
}

#[test]
fn e2e_delete_post_requires_yes() {
    let dir = init_data_dir();
    let output = run(dir.path(), &["delete-post", "post-1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--yes"));

    run_ok(dir.path(), &["delete-post", "post-1", "--yes"]);
    let feed = run_json(dir.path(), &["feed"]);
    assert!(feed
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["id"] != "post-1"));
}

#[test]
fn e2e_comment_notifies_author() {
    let dir = init_data_dir();
    let before = run_json(dir.path(), &["notifications"]);
    let created = run_json(dir.path(), &["comment", "post-1", "Congratulations!"]);
    assert!(created["id"].as_str().unwrap().starts_with("comment-"));

    let after = run_json(dir.path(), &["notifications"]);
    assert_eq!(
        after.as_array().unwrap().len(),
        before.as_array().unwrap().len() + 1
    );
    assert_eq!(after[0]["message"], "commented on your post");
}

// === Network and messaging ===

#[test]
fn e2e_connect_shows_up_as_sent_request() {
    let dir = init_data_dir();
    let created = run_json(dir.path(), &["connect", "4"]);
    assert!(created["id"].as_str().unwrap().starts_with("req-"));

    let network = run_json(dir.path(), &["network"]);
    assert_eq!(network["sent"][0]["to"], "4");
    let suggested: Vec<&str> = network["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert!(!suggested.contains(&"4"));
}

#[test]
fn e2e_message_conversation_and_thread() {
    let dir = init_data_dir();
    run_ok(dir.path(), &["message", "2", "Coffee at the conference?"]);
    run_ok(dir.path(), &["message", "2", "Hall B, 10am"]);

    let conversations = run_json(dir.path(), &["conversations"]);
    let list = conversations.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "1-2");
    assert_eq!(list[0]["lastMessage"]["content"], "Hall B, 10am");

    let thread = run_ok(dir.path(), &["thread", "2"]);
    let first = thread.find("Coffee").unwrap();
    let second = thread.find("Hall B").unwrap();
    assert!(first < second);

    let conversations = run_json(dir.path(), &["conversations"]);
    assert_eq!(conversations[0]["unreadCount"], 0);
}

#[test]
fn e2e_empty_message_is_rejected() {
    let dir = init_data_dir();
    let output = run(dir.path(), &["message", "2", "  "]);
    assert!(!output.status.success());
    let conversations = run_json(dir.path(), &["conversations"]);
    assert!(conversations.as_array().unwrap().is_empty());
}

// === Profile, search, apply ===

#[test]
fn e2e_profile_edit_persists() {
    let dir = init_data_dir();
    run_ok(
        dir.path(),
        &["profile", "--title", "Professor", "--add-image", "https://img/1.png"],
    );
    let profile = run_json(dir.path(), &["profile"]);
    assert_eq!(profile["title"], "Professor");
    let gallery = profile["gallery"].as_array().unwrap();
    assert_eq!(gallery.last().unwrap(), "https://img/1.png");
}

#[test]
fn e2e_search_groups_results() {
    let dir = init_data_dir();
    let results = run_json(dir.path(), &["search", "quantum"]);
    assert_eq!(results["articles"][0]["id"], "post-1");
    assert_eq!(results["jobs"][0]["id"], "post-2");
}

#[test]
fn e2e_apply_reads_commands_from_stdin() {
    let dir = init_data_dir();
    let mut child = labnet(dir.path())
        .args(["apply", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(
            br#"[
                {"op": "toggle_save_post", "post_id": "post-2"},
                {"op": "delete_post", "id": "post-missing"},
                {"op": "add_post", "draft": {"content": "From a script"}}
            ]"#,
        )
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "apply failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let outcomes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcomes[0]["outcome"], "applied");
    assert_eq!(outcomes[1]["outcome"], "ignored");
    assert_eq!(outcomes[2]["outcome"], "created");

    let saved = run_json(dir.path(), &["saved"]);
    assert_eq!(saved[0]["id"], "post-2");
}

#[test]
fn e2e_apply_rejects_unknown_op() {
    let dir = init_data_dir();
    let file = dir.path().join("commands.json");
    std::fs::write(&file, r#"{"op": "launch_rocket"}"#).unwrap();
    let output = run(dir.path(), &["apply", file.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid command"));
}
