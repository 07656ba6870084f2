//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end against a temporary
//! working directory, so each test gets its own roster file.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Get the binary to test, rooted in its own temp directory.
fn crewplan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("crewplan").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

fn roster_contents(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("data/team.json")).unwrap()
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI project planner"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_team_help() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["team", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage the team roster"));
}

// ============================================================================
// Team Management Tests
// ============================================================================

#[test]
fn test_team_list_creates_empty_roster_file() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No team members yet"));

    assert_eq!(roster_contents(&dir), "{}");
}

#[test]
fn test_team_add_and_list() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args([
            "team",
            "add",
            "Alice",
            "--skills",
            "Rust, SQL",
            "--experience",
            "senior",
            "--role",
            "Lead",
            "--availability",
            "35",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Alice to the team (1 members)"));

    crewplan(&dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Lead (Senior, 35h/week)"))
        .stdout(predicate::str::contains("Rust, SQL"));
}

#[test]
fn test_team_add_duplicate_fails_and_keeps_roster() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir).args(["team", "add", "Alice", "--skills", "Go"]).assert().success();
    let before = roster_contents(&dir);

    crewplan(&dir)
        .args(["team", "add", "Alice", "--skills", "Rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(roster_contents(&dir), before);
}

#[test]
fn test_team_add_rejects_out_of_range_availability() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["team", "add", "Bob", "--skills", "Go", "--availability", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("50"));
}

#[test]
fn test_team_add_rejects_unknown_experience() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["team", "add", "Bob", "--skills", "Go", "--experience", "principal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown experience level"));
}

#[test]
fn test_team_remove_missing_member_fails() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["team", "remove", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no team member named 'Ghost'"));
}

#[test]
fn test_team_list_json_format() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["team", "add", "Alice", "--skills", "Rust", "--experience", "mid-level"])
        .assert()
        .success();

    let output = crewplan(&dir).args(["team", "list", "--format", "json"]).assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["Alice"]["experience"], "Mid-level");
    assert_eq!(parsed["Alice"]["availability"], 40);
}

#[test]
fn test_end_to_end_add_and_remove_scenario() {
    let dir = TempDir::new().unwrap();

    // Empty roster to start with.
    crewplan(&dir).args(["team", "list"]).assert().success();
    assert_eq!(roster_contents(&dir), "{}");

    // Add Bob with the full profile.
    crewplan(&dir)
        .args([
            "team",
            "add",
            "Bob",
            "--skills",
            "Python, SQL",
            "--experience",
            "mid-level",
            "--role",
            "Engineer",
            "--availability",
            "30",
        ])
        .assert()
        .success();

    let content = roster_contents(&dir);
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["Bob"]["skills"], serde_json::json!(["Python", "SQL"]));
    assert_eq!(parsed["Bob"]["experience"], "Mid-level");
    assert_eq!(parsed["Bob"]["role"], "Engineer");
    assert_eq!(parsed["Bob"]["availability"], 30);
    assert_eq!(parsed.as_object().unwrap().len(), 1);

    // Remove Bob; the file reflects the empty mapping again.
    crewplan(&dir)
        .args(["team", "remove", "Bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Bob from the team (0 members)"));
    assert_eq!(roster_contents(&dir), "{}");
}

// ============================================================================
// Migration Tests
// ============================================================================

#[test]
fn test_legacy_roster_is_migrated_on_team_commands() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data/team.json"),
        r#"{"Alice": {"skills": ["Go"], "experience": "Senior"}}"#,
    )
    .unwrap();

    crewplan(&dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team Member (Senior, 40h/week)"));

    // The back-filled defaults were persisted, original keys untouched.
    let parsed: serde_json::Value = serde_json::from_str(&roster_contents(&dir)).unwrap();
    assert_eq!(parsed["Alice"]["skills"], serde_json::json!(["Go"]));
    assert_eq!(parsed["Alice"]["experience"], "Senior");
    assert_eq!(parsed["Alice"]["role"], "Team Member");
    assert_eq!(parsed["Alice"]["availability"], 40);
}

#[test]
fn test_corrupt_roster_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data/team.json"), "not json {{{").unwrap();

    crewplan(&dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No team members yet"));
}

// ============================================================================
// Overview Tests
// ============================================================================

#[test]
fn test_team_overview_metrics_and_matrix() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["team", "add", "Alice", "--skills", "Rust, SQL", "--experience", "senior"])
        .assert()
        .success();
    crewplan(&dir)
        .args(["team", "add", "Bob", "--skills", "Python, SQL", "--experience", "junior"])
        .assert()
        .success();

    crewplan(&dir)
        .args(["team", "overview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team Size:      2"))
        .stdout(predicate::str::contains("Total Skills:   3"))
        .stdout(predicate::str::contains("Senior Members: 1"))
        .stdout(predicate::str::contains("Team Skills Matrix"))
        .stdout(predicate::str::contains("Member"));
}

// ============================================================================
// Workflow Stage Tests (no network: validation and init failures only)
// ============================================================================

#[test]
fn test_analyze_without_credential_reports_init_error() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .env_remove("GEMINI_API_KEY")
        .args(["analyze", "some project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize model provider"))
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_analyze_rejects_empty_description_before_any_call() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .args(["analyze", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("please enter a project description"));
}

#[test]
fn test_analyze_requires_description_or_file() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["analyze"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[model]"))
        .stdout(predicate::str::contains("gemini"));
}

#[test]
fn test_local_config_overrides_roster_path() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".crewplan.toml"), "[team]\ndata_file = \"crew.json\"\n")
        .unwrap();

    crewplan(&dir).args(["team", "add", "Alice", "--skills", "Go"]).assert().success();
    assert!(dir.path().join("crew.json").exists());
    assert!(!dir.path().join("data/team.json").exists());
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_generate() {
    let dir = TempDir::new().unwrap();
    crewplan(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crewplan"));
}
