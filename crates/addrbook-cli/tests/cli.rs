use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_fixture(dir: &Path) {
    fs::write(dir.join("families.txt"), "Müller;Q1\nvon Arx;Q2\n").unwrap();
    fs::write(dir.join("givennames.txt"), "Hans\nPeter\n").unwrap();
    fs::write(
        dir.join("addresses.csv"),
        "street,housenumber,postcode,city,lat,lon\n\
         Bahnhofstrasse,5,3011,Bern,46.948,7.439\n\
         Marktgasse,3,3011,Bern,46.947,7.446\n",
    )
    .unwrap();

    let pages = dir.join("proofread");
    fs::create_dir(&pages).unwrap();
    fs::write(
        pages.join("1944-01.txt"),
        "# Date: 1943-12-15 Page: 9001/[3]\n\
         Müller, Hans, Bahnhofstr. 5 [12345]\n\
         — Peter, Marktg. 3\n\
         Zzyx, Peter, Marktgasse 3\n",
    )
    .unwrap();
}

fn addrbook(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .arg("process")
        .arg(dir.join("proofread"))
        .arg("--families")
        .arg(dir.join("families.txt"))
        .arg("--given-names")
        .arg(dir.join("givennames.txt"))
        .arg("--addresses")
        .arg(dir.join("addresses.csv"));
    cmd
}

#[test]
fn test_process_csv() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    addrbook(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("surname,surname_id,given_name,date,street"))
        .stdout(predicate::str::contains(
            "Müller,Q1,Hans,1943-12-15,Bahnhofstrasse,5,3011,Bern,",
        ))
        .stdout(predicate::str::contains("1 23 45,9001,[3]"))
        .stdout(predicate::str::contains("Müller,Q1,Peter,1943-12-15,Marktgasse,3"))
        .stdout(predicate::str::contains("Zzyx").not())
        .stderr(predicate::str::contains("family names: total 2; known: 1 = 50%"));
}

#[test]
fn test_process_relaxed_json() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    addrbook(dir.path())
        .args(["--format", "json", "--relaxed", "--report", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""surname":"Zzyx""#))
        .stderr(predicate::str::contains("Unknown family names:"))
        .stderr(predicate::str::contains("Zzyx"));
}

#[test]
fn test_process_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let output = dir.path().join("records.csv");

    addrbook(dir.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 records written"));

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_bad_directive_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(
        dir.path().join("proofread").join("1944-02.txt"),
        "# Seite 2\nMüller, Hans, Marktgasse 3\n",
    )
    .unwrap();

    addrbook(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1944-02.txt:1: unknown # directive"));
}

#[test]
fn test_missing_dictionary_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::remove_file(dir.path().join("givennames.txt")).unwrap();

    addrbook(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("dictionary file not found"));
}

#[test]
fn test_year_filter_without_pages_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    addrbook(dir.path())
        .args(["--year", "1930"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No page files found"));
}

#[test]
fn test_config_init_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "get", "extraction.phone.grouping_from_year"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1944"));
}

#[test]
fn test_config_commands_use_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.json");

    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "corpus.input_dir", "pages"])
        .assert()
        .success();
    assert!(config.exists());
    assert!(!dir.path().join("xdg").join("addrbook").exists());

    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "corpus.input_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pages\""));

    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"));
}
