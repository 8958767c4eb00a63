#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn droplink_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("droplink"));
    cmd.env("DROPLINK_DATA_DIR", data.path().as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("DROPLINK_LOG");
    cmd
}

fn add(data: &TempDir, args: &[&str]) {
    droplink_cmd(data)
        .arg("add")
        .args(args)
        .assert()
        .success();
}

fn listed_json(data: &TempDir) -> serde_json::Value {
    let output = droplink_cmd(data)
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn init_writes_settings_once() {
    let data = TempDir::new().unwrap();

    droplink_cmd(&data)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default settings written"));
    assert!(data.path().join("settings.json").exists());

    droplink_cmd(&data)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn add_then_list() {
    let data = TempDir::new().unwrap();

    droplink_cmd(&data)
        .args(["add", "-t", "defi", "example.com/claim", "Layer", "Zero"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Link added (1): Layer Zero"));

    droplink_cmd(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Layer Zero"))
        .stdout(predicate::str::contains("https://example.com/claim #defi"));

    let links = listed_json(&data);
    let links = links.as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["url"], "https://example.com/claim");
    assert_eq!(links[0]["tags"], serde_json::json!(["defi"]));
    assert!(links[0]["createdAt"].is_string());
}

#[test]
fn naked_invocation_lists() {
    let data = TempDir::new().unwrap();
    droplink_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("No links found."));
}

#[test]
fn add_rejects_bad_url() {
    let data = TempDir::new().unwrap();
    droplink_cmd(&data)
        .args(["add", "not a url"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid URL"));
}

#[test]
fn save_skips_already_saved_url() {
    let data = TempDir::new().unwrap();

    droplink_cmd(&data)
        .args(["save", "example.com", "Example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Link saved: Example"));

    droplink_cmd(&data)
        .args(["save", "https://example.com", "Again"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Link already saved (1)"));

    let links = listed_json(&data);
    assert_eq!(links.as_array().unwrap().len(), 1);
    assert_eq!(links[0]["tags"], serde_json::json!(["Airdrop"]));
}

#[test]
fn delete_range_keeps_the_rest() {
    let data = TempDir::new().unwrap();
    add(&data, &["a.com", "A"]);
    add(&data, &["b.com", "B"]);
    add(&data, &["c.com", "C"]);

    droplink_cmd(&data)
        .args(["delete", "1-2"])
        .assert()
        .success();

    let links = listed_json(&data);
    let titles: Vec<&str> = links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C"]);
}

#[test]
fn tag_untag_and_filter() {
    let data = TempDir::new().unwrap();
    add(&data, &["a.com", "A"]);
    add(&data, &["b.com", "B"]);

    droplink_cmd(&data)
        .args(["tag", "L2", "2"])
        .assert()
        .success();
    droplink_cmd(&data)
        .args(["list", "--json", "-t", "L2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"B\""))
        .stdout(predicate::str::contains("\"A\"").not());

    droplink_cmd(&data)
        .args(["untag", "L2", "2"])
        .assert()
        .success();
    droplink_cmd(&data)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("L2").not())
        .stdout(predicate::str::contains("Airdrop"));
}

#[test]
fn open_over_limit_asks_or_caps() {
    let data = TempDir::new().unwrap();
    droplink_cmd(&data)
        .args(["config", "maxTabsToOpen", "2"])
        .assert()
        .success();
    for site in ["site1.com", "site2.com", "site3.com"] {
        add(&data, &[site]);
    }

    droplink_cmd(&data)
        .args(["open", "--all", "--dry-run"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Open 3 links? [y/N]"))
        .stdout(predicate::str::contains("Opening cancelled"))
        .stdout(predicate::str::contains("https://site1.com").not());

    droplink_cmd(&data)
        .args(["open", "--all", "--dry-run", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://site3.com"))
        .stdout(predicate::str::contains("Opened 3 links"));

    droplink_cmd(&data)
        .args(["open", "1-3", "--dry-run", "--capped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://site2.com"))
        .stdout(predicate::str::contains("https://site3.com").not())
        .stdout(predicate::str::contains("Opened 2 links"));
}

#[test]
fn export_import_round_trip() {
    let data = TempDir::new().unwrap();
    add(&data, &["-t", "x", "a.com", "A"]);
    add(&data, &["b.com", "B"]);
    let before = listed_json(&data);

    let out = data.path().join("backup.json");
    droplink_cmd(&data)
        .args(["export", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 links"));

    droplink_cmd(&data)
        .args(["delete", "1"])
        .assert()
        .success();

    droplink_cmd(&data)
        .args(["import", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced 1 existing link"))
        .stdout(predicate::str::contains("Imported 2 links"));

    assert_eq!(listed_json(&data), before);
}

#[test]
fn export_to_stdout_is_plain_json() {
    let data = TempDir::new().unwrap();
    add(&data, &["a.com", "A"]);

    let output = droplink_cmd(&data)
        .args(["export", "-o", "-"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn invalid_import_fails_and_keeps_links() {
    let data = TempDir::new().unwrap();
    add(&data, &["keep.me", "Keep"]);

    let bad = data.path().join("bad.json");
    fs::write(&bad, "not json").unwrap();
    droplink_cmd(&data)
        .args(["import", bad.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Failed to import links: Invalid JSON format",
        ));

    let links = listed_json(&data);
    assert_eq!(links[0]["title"], "Keep");
}

#[test]
fn import_from_stdin() {
    let data = TempDir::new().unwrap();
    droplink_cmd(&data)
        .args(["import", "-"])
        .write_stdin(r#"[{"id":"1","url":"https://x.com","title":"X","tags":[],"createdAt":"2024-01-01T00:00:00.000Z"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 link"));
}

#[test]
fn config_clamps_and_rejects_unknown() {
    let data = TempDir::new().unwrap();

    droplink_cmd(&data)
        .args(["config", "maxTabsToOpen", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maxTabsToOpen set to 50"));

    droplink_cmd(&data)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("maxTabsToOpen = 50"))
        .stdout(predicate::str::contains("defaultTag = Airdrop"));

    droplink_cmd(&data)
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: colour"));
}

#[test]
fn backup_force_and_stats() {
    let data = TempDir::new().unwrap();
    add(&data, &["a.com", "A"]);

    droplink_cmd(&data)
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Automatic backup is off"));

    droplink_cmd(&data)
        .args(["backup", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up 1 link"));
    assert!(data.path().join("backupLinks.json").exists());

    droplink_cmd(&data)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total links"))
        .stdout(predicate::str::contains("1"));
}

#[test]
fn open_all_with_tag_opens_only_tagged_links() {
    let data = TempDir::new().unwrap();
    add(&data, &["-t", "testnet", "a.com", "A"]);
    add(&data, &["-t", "mainnet", "b.com", "B"]);
    add(&data, &["-t", "testnet", "c.com", "C"]);

    droplink_cmd(&data)
        .args(["open", "--all", "--tag", "testnet", "--dry-run", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://a.com"))
        .stdout(predicate::str::contains("https://c.com"))
        .stdout(predicate::str::contains("https://b.com").not())
        .stdout(predicate::str::contains("Opened 2 links"));
}
