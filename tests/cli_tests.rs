//! End-to-end tests of the merkledrop binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GOLDEN_LEAF_0: &str = "0x831b128d2fddcbfe7f9bc1b682f908ee800b9373b18ee4ae4f9fb00838447e3e";
const GOLDEN_LEAF_1: &str = "0x0aa899fc3c90ed128f835896593f1f03924419299f1b582dba5f6e038071032e";
const GOLDEN_ROOT: &str = "0xa20a274a6cb0afb70e5b6f7ffbb42710a8d88099e9bc4b620a4550365c9e3361";
const ACCOUNT_A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const ACCOUNT_B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// Command with an isolated config home
fn merkledrop(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("merkledrop").unwrap();
    cmd.env("MERKLEDROP_HOME", home)
        .env_remove("MERKLEDROP_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn write_golden_leaves(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("leaves.json");
    fs::write(
        &path,
        format!(
            r#"[
                {{ "index": 0, "account": "{}", "amount": "100" }},
                {{ "index": "1", "account": "{}", "amount": 200 }}
            ]"#,
            ACCOUNT_A.to_uppercase().replace("0X", "0x"),
            ACCOUNT_B
        ),
    )
    .unwrap();
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_build_prints_bundle() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());

    let output = merkledrop(temp_dir.path())
        .arg("build")
        .arg(&leaves)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let bundle = stdout_json(&output);
    assert_eq!(bundle["merkle_root"], GOLDEN_ROOT);
    assert_eq!(bundle["total_amount"], "300");
    assert_eq!(bundle["leaf_count"], 2);
    assert_eq!(bundle["claims"][0]["leaf_hash"], GOLDEN_LEAF_0);
    assert_eq!(bundle["claims"][0]["merkle_proof"][0], GOLDEN_LEAF_1);
}

#[test]
fn test_build_to_file_with_summary() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());
    let bundle_path = temp_dir.path().join("bundle.json");

    merkledrop(temp_dir.path())
        .arg("build")
        .arg(&leaves)
        .arg("-o")
        .arg(&bundle_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Distribution built"))
        .stdout(predicate::str::contains(GOLDEN_ROOT));

    let bundle: Value = serde_json::from_str(&fs::read_to_string(&bundle_path).unwrap()).unwrap();
    assert_eq!(bundle["claims"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_build_rejects_bad_input() {
    let temp_dir = TempDir::new().unwrap();
    let empty = temp_dir.path().join("empty.json");
    fs::write(&empty, "[]").unwrap();

    merkledrop(temp_dir.path())
        .arg("build")
        .arg(&empty)
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero leaves"));

    let negative = temp_dir.path().join("negative.json");
    fs::write(
        &negative,
        format!(r#"[{{ "index": 0, "account": "{}", "amount": "-5" }}]"#, ACCOUNT_A),
    )
    .unwrap();

    merkledrop(temp_dir.path())
        .arg("build")
        .arg(&negative)
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-negative"));
}

#[test]
fn test_prove_then_verify() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());

    let output = merkledrop(temp_dir.path())
        .args(["prove", "--account", ACCOUNT_B, "--json"])
        .arg(&leaves)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let proof = stdout_json(&output);
    assert_eq!(proof["merkle_root"], GOLDEN_ROOT);
    assert_eq!(proof["claim"]["index"], 1);
    assert_eq!(proof["claim"]["merkle_proof"][0], GOLDEN_LEAF_0);

    merkledrop(temp_dir.path())
        .args([
            "verify", "--root", GOLDEN_ROOT, "--index", "1", "--account", ACCOUNT_B, "--amount",
            "200", "--proof", GOLDEN_LEAF_0,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("successful"));
}

#[test]
fn test_verify_fails_on_wrong_amount() {
    let temp_dir = TempDir::new().unwrap();

    merkledrop(temp_dir.path())
        .args([
            "verify", "--root", GOLDEN_ROOT, "--index", "1", "--account", ACCOUNT_B, "--amount",
            "201", "--proof", GOLDEN_LEAF_0, "--json",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"));
}

#[test]
fn test_verify_rejects_malformed_proof() {
    let temp_dir = TempDir::new().unwrap();

    merkledrop(temp_dir.path())
        .args([
            "verify", "--root", GOLDEN_ROOT, "--index", "0", "--account", ACCOUNT_A, "--amount",
            "100", "--proof", "0x1234",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid proof format"));
}

#[test]
fn test_campaign_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());
    let token = "0x2222222222222222222222222222222222222222";

    merkledrop(temp_dir.path())
        .args(["campaign", "create", "--id", "1", "--root", GOLDEN_ROOT, "--token", token])
        .arg(&leaves)
        .assert()
        .success()
        .stdout(predicate::str::contains("Campaign created"));
    assert!(temp_dir
        .path()
        .join("campaigns")
        .join("1")
        .join("campaign.json")
        .exists());

    let output = merkledrop(temp_dir.path())
        .args(["campaign", "proof", "--id", "1", "--address", ACCOUNT_A, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let proof = stdout_json(&output);
    assert_eq!(proof["index"], 0);
    assert_eq!(proof["amount"], "100");
    assert_eq!(proof["proof"][0], GOLDEN_LEAF_1);
    assert_eq!(proof["claimed"], false);

    merkledrop(temp_dir.path())
        .args(["campaign", "fund", "--id", "1", "--total-funded", "300", "--funded", "true"])
        .assert()
        .success();

    let tx = format!("0x{}", "ab".repeat(32));
    merkledrop(temp_dir.path())
        .args(["campaign", "mark-claimed", "--id", "1", "--index", "0", "--tx-hash", &tx])
        .assert()
        .success();
    merkledrop(temp_dir.path())
        .args(["campaign", "mark-claimed", "--id", "1", "--index", "0", "--tx-hash", &tx])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already claimed"));

    let output = merkledrop(temp_dir.path())
        .args(["campaign", "show", "--id", "1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let shown = stdout_json(&output);
    assert_eq!(shown["campaign"]["is_funded"], true);
    assert_eq!(shown["campaign"]["total_claimed"], "100");
    assert_eq!(shown["claimed_entries"], 1);

    merkledrop(temp_dir.path())
        .args(["campaign", "verify", "--id", "1", "--address", ACCOUNT_B])
        .assert()
        .success();
}

#[test]
fn test_campaign_proof_by_index() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());

    merkledrop(temp_dir.path())
        .args(["campaign", "create", "--id", "4", "--root", GOLDEN_ROOT, "--token", ACCOUNT_A])
        .arg(&leaves)
        .assert()
        .success();

    let output = merkledrop(temp_dir.path())
        .args(["campaign", "proof", "--id", "4", "--index", "1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let proof = stdout_json(&output);
    assert_eq!(proof["address"], ACCOUNT_B);
    assert_eq!(proof["amount"], "200");
    assert_eq!(proof["proof"][0], GOLDEN_LEAF_0);

    merkledrop(temp_dir.path())
        .args(["campaign", "proof", "--id", "4", "--index", "7"])
        .assert()
        .failure();
    merkledrop(temp_dir.path())
        .args(["campaign", "proof", "--id", "4"])
        .assert()
        .failure();
}

#[test]
fn test_campaign_verify_fails_on_tampered_entry() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());

    merkledrop(temp_dir.path())
        .args(["campaign", "create", "--id", "5", "--root", GOLDEN_ROOT, "--token", ACCOUNT_A])
        .arg(&leaves)
        .assert()
        .success();

    let entries_path = temp_dir.path().join("campaigns").join("5").join("entries.json");
    let mut entries: Value = serde_json::from_str(&fs::read_to_string(&entries_path).unwrap()).unwrap();
    for entry in entries.as_array_mut().unwrap() {
        if entry["kol_address"] == ACCOUNT_A {
            entry["reward_amount"] = Value::from("999");
        }
    }
    fs::write(&entries_path, serde_json::to_vec_pretty(&entries).unwrap()).unwrap();

    merkledrop(temp_dir.path())
        .args(["campaign", "verify", "--id", "5", "--address", ACCOUNT_A])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
    merkledrop(temp_dir.path())
        .args(["campaign", "verify", "--id", "5", "--address", ACCOUNT_B])
        .assert()
        .success();
}

#[test]
fn test_decimals_above_cap_rejected() {
    let temp_dir = TempDir::new().unwrap();

    merkledrop(temp_dir.path())
        .args([
            "verify", "--root", GOLDEN_ROOT, "--index", "0", "--account", ACCOUNT_A, "--amount",
            "1", "--proof", GOLDEN_LEAF_1, "--decimals", "4000000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 77"));
}

#[test]
fn test_campaign_create_rejects_root_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());
    let wrong_root = format!("0x{}", "11".repeat(32));

    merkledrop(temp_dir.path())
        .args(["campaign", "create", "--id", "2", "--root", &wrong_root, "--token", ACCOUNT_A])
        .arg(&leaves)
        .assert()
        .failure()
        .stderr(predicate::str::contains("root mismatch"));

    assert!(!temp_dir.path().join("campaigns").join("2").exists());
}

#[test]
fn test_data_dir_flag_overrides_config() {
    let temp_dir = TempDir::new().unwrap();
    let leaves = write_golden_leaves(temp_dir.path());
    let data_dir = temp_dir.path().join("elsewhere");

    merkledrop(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["campaign", "create", "--id", "3", "--root", GOLDEN_ROOT, "--token", ACCOUNT_A])
        .arg(&leaves)
        .assert()
        .success();

    assert!(data_dir.join("3").join("entries.json").exists());
}

#[test]
fn test_config_round_trip() {
    let temp_dir = TempDir::new().unwrap();

    merkledrop(temp_dir.path())
        .args(["config", "units.decimals", "2"])
        .assert()
        .success();
    merkledrop(temp_dir.path())
        .args(["config", "units.decimals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
    assert!(temp_dir.path().join("config.toml").exists());

    // Configured decimals scale token quantities: 1 and 2 tokens at 2 decimals
    let leaves = temp_dir.path().join("tokens.json");
    fs::write(
        &leaves,
        format!(
            r#"[{{ "index": 0, "account": "{}", "amount": "1" }}, {{ "index": 1, "account": "{}", "amount": "2.00" }}]"#,
            ACCOUNT_A, ACCOUNT_B
        ),
    )
    .unwrap();
    merkledrop(temp_dir.path())
        .arg("build")
        .arg(&leaves)
        .assert()
        .success()
        .stdout(predicate::str::contains(GOLDEN_ROOT));

    merkledrop(temp_dir.path())
        .args(["config", "--unset", "units.decimals"])
        .assert()
        .success();
    merkledrop(temp_dir.path())
        .args(["config", "units.decimals"])
        .assert()
        .failure();
}

#[test]
fn test_completion_script() {
    let temp_dir = TempDir::new().unwrap();

    merkledrop(temp_dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("merkledrop"));
}
