//! End-to-end test of the convert subcommand
//!
//! Runs the real binary against a small source tree and checks the artifact
//! set, then decrypts the bundle through the library to confirm the wire
//! format round-trips.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use casepack::config::CipherConfig;
use casepack::crypto::{decrypt_value, Envelope};

fn write_sources(dir: &Path) {
    fs::create_dir_all(dir.join("results")).unwrap();
    fs::create_dir_all(dir.join("raw")).unwrap();
    fs::write(
        dir.join("results/sb_top20_mechanisms.csv"),
        "rank,post_id,title,B,tm,created_date,category,mechanism,confidence,evidence,prince_id\n\
         1,42,Sleeping beauty,0.93,2,2023-03-10,General,resurfacing,high,cited later,\n",
    )
    .unwrap();
    fs::write(dir.join("results/sb_prince_exploration.json"), "[]").unwrap();
    fs::write(
        dir.join("results/sb_post_daily_views.csv"),
        "post_id,post_age_days,daily_views\n42,0,5\n42,1,80\n",
    )
    .unwrap();
    fs::write(
        dir.join("raw/posts_combined.csv"),
        "postid,superparentid,simplified_user_id,title,body,datecreated,category\n\
         42,,7,Sleeping beauty,the post body,2023-03-10 09:00:00,General\n\
         50,42,8,,first comment,2023-03-11 10:00:00,\n",
    )
    .unwrap();
}

fn casepack() -> Command {
    Command::cargo_bin("casepack").unwrap()
}

#[test]
fn test_convert_writes_decryptable_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());
    let out = temp_dir.path().join("out");

    casepack()
        .arg("convert")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--output-dir")
        .arg(&out)
        .arg("--password")
        .arg("hunter2")
        .arg("--iterations")
        .arg("100")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 cases encrypted"));

    assert!(out.join("metadata.json").exists());
    assert!(out.join("cases.encrypted").exists());
    assert!(out.join("encryption_config.json").exists());
    // Daily variant publishes no plain top-20 table
    assert!(!out.join("hourly_top20.json").exists());

    let envelope: Envelope =
        serde_json::from_str(&fs::read_to_string(out.join("cases.encrypted")).unwrap()).unwrap();
    let config = CipherConfig::load(&out.join("encryption_config.json"))
        .unwrap()
        .unwrap();
    assert_eq!(config.iterations, 100);

    let cases = decrypt_value(&envelope, "hunter2", &config).unwrap();
    assert_eq!(cases[0]["post_id"], 42);
    assert_eq!(cases[0]["main_post"]["body"], "the post body");
    assert_eq!(cases[0]["comments"][0]["body"], "first comment");
    assert_eq!(cases[0]["daily_views"][0]["post_age_days"], 0.0);
}

#[test]
fn test_convert_fails_cleanly_on_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    // No source tree at all
    let out = temp_dir.path().join("out");

    casepack()
        .arg("convert")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--output-dir")
        .arg(&out)
        .arg("--password")
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sb_top20_mechanisms.csv"));

    assert!(!out.exists());
}

#[test]
fn test_password_accepted_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());
    let out = temp_dir.path().join("out");

    casepack()
        .arg("convert")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--output-dir")
        .arg(&out)
        .arg("--iterations")
        .arg("100")
        .env("CASEPACK_PASSWORD", "from-env")
        .assert()
        .success();

    let envelope: Envelope =
        serde_json::from_str(&fs::read_to_string(out.join("cases.encrypted")).unwrap()).unwrap();
    let config = CipherConfig::load(&out.join("encryption_config.json"))
        .unwrap()
        .unwrap();
    assert!(decrypt_value(&envelope, "from-env", &config).is_ok());
}

#[test]
fn test_config_subcommand_reports_paths() {
    let temp_dir = TempDir::new().unwrap();

    casepack()
        .arg("config")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--output-dir")
        .arg(temp_dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("posts_combined.csv"))
        .stdout(predicate::str::contains("not yet written"));
}
