// tests/cli.rs
mod common;

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use common::fixtures_dir;

fn stdout_of(args: &[&str]) -> String {
    let mut cmd = cargo_bin_cmd!("eb_scrape");
    cmd.env_remove("RUST_LOG").args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn journals_lists_ids_with_urls() {
    let out = stdout_of(&["journals", "--ids", "12187,12185-12186"]);
    assert_eq!(
        out,
        "12185,,https://link.springer.com/journal/12185/editors\n\
         12186,,https://link.springer.com/journal/12186/editors\n\
         12187,,https://link.springer.com/journal/12187/editors\n"
    );
}

#[test]
fn analyze_reads_saved_pages_offline() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wiley.json");
    let pages = fixtures_dir("wiley");

    let stdout = stdout_of(&[
        "analyze", "-P", "wiley",
        "--pages-dir", pages.to_str().unwrap(),
        "-o", out.to_str().unwrap(),
    ]);
    assert!(stdout.starts_with("Wrote 9 records to "));

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["jwt.html"].as_array().unwrap().len(), 9);
    assert_eq!(v["jwt.html"][1]["editor_name"], "Dr. Karl Weber");
}

#[test]
fn boards_from_saved_pages() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("board.csv");
    let pages = fixtures_dir("springer");

    stdout_of(&[
        "boards", "-P", "springer", "--ids", "12186",
        "--from-pages", pages.to_str().unwrap(),
        "--pause-ms", "0",
        "-o", out.to_str().unwrap(),
    ]);
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.contains("Erika Musterfrau"));
}

#[test]
fn bad_ids_fail_with_message() {
    let mut cmd = cargo_bin_cmd!("eb_scrape");
    let out = cmd.args(["journals", "--ids", "20-10"]).assert().failure().get_output().stderr.clone();
    assert!(String::from_utf8_lossy(&out).contains("20-10"));
}

#[test]
fn fetch_rejects_saved_pages_flag() {
    let mut cmd = cargo_bin_cmd!("eb_scrape");
    let out = cmd
        .args(["fetch", "-P", "springer", "--ids", "12186", "--from-pages", "pages"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&out).contains("--from-pages"));
}
