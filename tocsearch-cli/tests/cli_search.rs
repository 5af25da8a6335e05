use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_site(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let docs = dir.join("content");
    fs::create_dir_all(docs.join("guide"))?;

    fs::write(
        dir.join("tocsearch.yml"),
        r#"
root: content
summary: SUMMARY.md
max_depth: 3
"#,
    )?;
    fs::write(
        docs.join("SUMMARY.md"),
        "- [Intro](README.md)\n- [Install](guide/install)\n",
    )?;
    fs::write(docs.join("README.md"), "# Intro\n\n## Installing quickly\n")?;
    fs::write(
        docs.join("guide/install.md"),
        "# Install\n\n## Linux install\n\n### Packages\n\n#### Too deep\n",
    )?;
    Ok(())
}

#[test]
fn search_json_outputs_results_in_index_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["search", "install", "--json", "--limit", "2"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["query"], "install");
    assert_eq!(value["total"], 3);

    let results = value["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["url"], "/README.md#installing-quickly");
    assert_eq!(results[0]["name"], "Intro");
    assert_eq!(results[0]["depth"], 2);
    assert_eq!(
        results[0]["content"],
        r#"<em class="search-keyword">Install</em>ing quickly"#
    );
    assert_eq!(results[1]["url"], "/guide/install#install");

    Ok(())
}

#[test]
fn index_respects_max_depth() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["index", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    let contents: Vec<&str> = value
        .as_array()
        .expect("records array")
        .iter()
        .filter_map(|r| r["content"].as_str())
        .collect();
    assert_eq!(
        contents,
        vec!["Intro", "Installing quickly", "Install", "Linux install", "Packages"]
    );

    Ok(())
}

#[test]
fn paths_flag_overrides_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["search", "install", "--paths", "guide/install", "--max-depth", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 results"))
        .stdout(predicate::str::contains("/guide/install#linux-install"))
        .stdout(predicate::str::contains("README.md").not());

    Ok(())
}

#[test]
fn summary_flag_overrides_configured_paths() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;
    fs::write(
        dir.path().join("tocsearch.yml"),
        "root: content\npaths: README.md\n",
    )?;

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["index"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/guide/install").not());

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["index", "--summary", "SUMMARY.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/README.md#intro"))
        .stdout(predicate::str::contains("/guide/install#install"));

    Ok(())
}

#[test]
fn toc_prints_page_outline() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["toc", "guide/install"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "- [Install](/guide/install#install)\n  - [Linux install](/guide/install#linux-install)\n    - [Packages](/guide/install#packages)\n",
        ));

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["toc", "guide/missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not found"));

    Ok(())
}

#[test]
fn interactive_reads_queries_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["interactive", "--limit", "1"])
        .write_stdin("packages\n\nzzz\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/guide/install#packages"))
        .stdout(predicate::str::contains("(no active search)"))
        .stdout(predicate::str::contains("No results for 'zzz'"));

    Ok(())
}

#[test]
fn missing_configuration_is_inactive_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["search", "anything"])
        .assert()
        .success()
        .stderr(predicate::str::contains("search is inactive"));

    Ok(())
}

#[test]
fn invalid_depths_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    #[allow(deprecated)]
    Command::cargo_bin("tocsearch")?
        .current_dir(dir.path())
        .args(["index", "--min-depth", "4", "--max-depth", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid heading depths"));

    Ok(())
}
