use assert_cmd::Command;
use predicates::prelude::*;

fn nutrisearch(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nutrisearch").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("NUTRISEARCH_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("FDC_API_KEY", "test-key")
        .env("FDC_API_URL", "http://127.0.0.1:9/fdc/v1");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("food"))
        .stdout(predicate::str::contains("scale"));
}

#[test]
fn test_scale_json() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["--format", "json", "scale", "--calories", "165", "--protein", "31", "--grams", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"calories\": 248"))
        .stdout(predicate::str::contains("\"protein_g\": 46.5"));
}

#[test]
fn test_scale_zero_grams() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["scale", "--format", "json", "--calories", "89", "--grams", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"calories\": 0"));
}

#[test]
fn test_scale_text() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["scale", "--calories", "89", "--carbs", "22.8", "--grams", "120", "--name", "Banana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Banana"))
        .stdout(predicate::str::contains("107 kcal"))
        .stdout(predicate::str::contains("27.4 g"));
}

#[test]
fn test_verbose_logs_session_metrics() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["--verbose", "--format", "json", "search", "   "])
        .assert()
        .success()
        .stderr(predicate::str::contains("Session metrics"));
}

#[test]
fn test_scale_rejects_negative_nutrients() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["scale", "--calories", "-5", "--grams", "100"])
        .assert()
        .failure();
}

#[test]
fn test_scale_requires_grams() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["scale", "--calories", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--grams"));
}

#[test]
fn test_blank_search_is_empty_without_network() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["--format", "json", "search", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"results\": []"));
}

#[test]
fn test_search_reports_unreachable_provider() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["search", "banana", "--limit", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    nutrisearch(&dir)
        .args(["--config", "missing.toml", "search", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}
