use assert_cmd::Command;
use predicates::prelude::*;

fn issueboard() -> Command {
    let mut cmd = Command::cargo_bin("issueboard").unwrap();
    // Keep host env from leaking repo/token settings into assertions.
    cmd.env_remove("REPO_NAME");
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

const ISSUES_FIXTURE: &str = r#"[
  {
    "number": 1,
    "title": "Ship the landing page",
    "html_url": "https://github.com/octocat/hello/issues/1",
    "body": "Tracking issue.",
    "state": "open",
    "user": {"login": "octocat"},
    "labels": [{"name": "epic", "color": "0e8a16"}],
    "created_at": "2025-06-01T10:00:00Z",
    "updated_at": "2025-06-05T10:00:00Z"
  },
  {
    "number": 2,
    "title": "Write the hero copy",
    "html_url": "https://github.com/octocat/hello/issues/2",
    "state": "open",
    "user": {"login": "hubot"},
    "assignees": [{"login": "hubot"}],
    "created_at": "2025-06-02T10:00:00Z",
    "updated_at": "2025-06-03T10:00:00Z",
    "parent_issue_url": "https://api.github.com/repos/octocat/hello/issues/1"
  }
]"#;

#[test]
fn schema_prints_config_schema() {
    issueboard()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Config\""))
        .stdout(predicate::str::contains("link_previews"));
}

#[test]
fn build_requires_repo() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("build")
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("repository not set"));
}

#[test]
fn build_requires_token_when_repo_is_set() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("build")
        .arg("--project-root")
        .arg(dir.path())
        .arg("--repo")
        .arg("octocat/hello")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn init_yes_scaffolds_project() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("init")
        .arg("--yes")
        .arg("--repo")
        .arg("octocat/hello")
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .issueboard.toml"));

    let config = std::fs::read_to_string(dir.path().join(".issueboard.toml")).unwrap();
    assert!(config.contains("octocat/hello"));

    let template = std::fs::read_to_string(dir.path().join("template.html")).unwrap();
    assert!(template.contains("<!-- issueboard:issues-start -->"));
    assert!(template.contains("<!-- issueboard:issues-end -->"));
    assert!(template.contains("octocat/hello"));
}

#[test]
fn build_from_dump_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("init")
        .arg("--yes")
        .arg("--repo")
        .arg("octocat/hello")
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .success();

    let dump = dir.path().join("issues.json");
    std::fs::write(&dump, ISSUES_FIXTURE).unwrap();

    issueboard()
        .arg("build")
        .arg("--project-root")
        .arg(dir.path())
        .arg("--issues-file")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"))
        .stdout(predicate::str::contains("2 issue(s), 1 top-level"));

    let page = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(page.contains("#1 Ship the landing page"));
    assert!(page.contains("#2 Write the hero copy"));
    assert!(page.contains("issue-child"));
    assert!(page.contains("data-labels=\"epic\""));

    // Second build with identical input leaves the page alone.
    issueboard()
        .arg("build")
        .arg("--project-root")
        .arg(dir.path())
        .arg("--issues-file")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));
}

#[test]
fn build_from_empty_dump_renders_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("init")
        .arg("--yes")
        .arg("--repo")
        .arg("octocat/hello")
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .success();

    let dump = dir.path().join("issues.json");
    std::fs::write(&dump, "[]").unwrap();

    issueboard()
        .arg("build")
        .arg("--project-root")
        .arg(dir.path())
        .arg("--issues-file")
        .arg(&dump)
        .assert()
        .success();

    let page = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(page.contains("<p>No open issues.</p>"));
}

#[test]
fn build_fails_without_template() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("issues.json");
    std::fs::write(&dump, "[]").unwrap();

    issueboard()
        .arg("build")
        .arg("--project-root")
        .arg(dir.path())
        .arg("--issues-file")
        .arg(&dump)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read template"));
}

#[test]
fn build_fails_on_template_without_markers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("template.html"), "<html><body></body></html>").unwrap();
    let dump = dir.path().join("issues.json");
    std::fs::write(&dump, "[]").unwrap();

    issueboard()
        .arg("build")
        .arg("--project-root")
        .arg(dir.path())
        .arg("--issues-file")
        .arg(&dump)
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("marker"));
}

#[test]
fn doctor_reports_missing_project() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("doctor")
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .failure()
        .code(6)
        .stdout(predicate::str::contains("Problems"));
}

#[test]
fn doctor_passes_on_initialized_project() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("init")
        .arg("--yes")
        .arg("--repo")
        .arg("octocat/hello")
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .success();

    issueboard()
        .arg("doctor")
        .arg("--project-root")
        .arg(dir.path())
        .env("GITHUB_TOKEN", "dummy-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn doctor_json_format() {
    let dir = tempfile::tempdir().unwrap();
    issueboard()
        .arg("doctor")
        .arg("--project-root")
        .arg(dir.path())
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"problems\""));
}
