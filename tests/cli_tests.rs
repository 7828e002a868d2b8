//! Command-line tests driving the compiled binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

use eip_solver::{StandardCatalog, StandardId};

const OWNABLE_ABI: &str = r#"[
    {"type":"function","name":"owner","inputs":[],"outputs":[{"name":"","type":"address"}]},
    {"type":"function","name":"transferOwnership","inputs":[{"name":"newOwner","type":"address"}],"outputs":[]},
    {"type":"event","name":"OwnershipTransferred","inputs":[
        {"name":"previousOwner","type":"address","indexed":true},
        {"name":"newOwner","type":"address","indexed":true}]}
]"#;

fn eip_solver() -> Command {
    Command::cargo_bin("eip-solver").unwrap()
}

fn catalog_abi(id: &str) -> String {
    let catalog = StandardCatalog::load_embedded().unwrap();
    catalog.get(&StandardId::new(id)).unwrap().abi().to_string()
}

fn abi_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".json").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_catalog_list() {
    eip_solver()
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ERC20"))
        .stdout(predicate::str::contains("ERC1155"))
        .stdout(predicate::str::contains("7 standards"));
}

#[test]
fn test_catalog_list_active_only() {
    eip_solver()
        .args(["catalog", "list", "--active-only", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ERC20\t"))
        .stdout(predicate::str::contains("ERC1822").not());
}

#[test]
fn test_catalog_show() {
    eip_solver()
        .args(["catalog", "show", "ERC20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tokens:   68"))
        .stdout(predicate::str::contains("transfer(address,uint256) returns (bool)"));
}

#[test]
fn test_catalog_show_unknown_standard() {
    eip_solver()
        .args(["catalog", "show", "ERC9999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_catalog_export_round_trips() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("catalog.json");

    eip_solver()
        .args(["catalog", "export"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 7 standards"));

    let reloaded = StandardCatalog::load_from_file(&exported).unwrap();
    assert_eq!(reloaded.len(), 7);

    // The exported file works as a custom catalog
    eip_solver()
        .args(["catalog", "show", "ERC721", "--catalog"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tokens:   90"));
}

#[test]
fn test_catalog_build_to_file() {
    let abi = abi_file(OWNABLE_ABI);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ownable.json");

    eip_solver()
        .args(["catalog", "build", "--id", "OWN", "--name", "Ownable", "--abi"])
        .arg(abi.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote standard 'OWN'"));

    let standard: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(standard["id"], "OWN");
    assert_eq!(standard["functions"].as_array().unwrap().len(), 2);
    assert_eq!(standard["events"].as_array().unwrap().len(), 1);
}

#[test]
fn test_catalog_build_append_requires_force() {
    let abi = abi_file(OWNABLE_ABI);
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("custom.json");

    let build = |force: bool| {
        let mut cmd = eip_solver();
        cmd.args(["catalog", "build", "--id", "OWN", "--name", "Ownable", "--abi"])
            .arg(abi.path())
            .arg("--append-to")
            .arg(&catalog);
        if force {
            cmd.arg("--force");
        }
        cmd.assert()
    };

    build(false)
        .success()
        .stdout(predicate::str::contains("(1 total standards)"));
    build(false)
        .failure()
        .stderr(predicate::str::contains("already exists"));
    build(true)
        .success()
        .stdout(predicate::str::contains("(1 total standards)"));

    // The built standard scores its own ABI as perfect
    eip_solver()
        .args(["check", "--standard", "OWN", "--format", "tsv", "--catalog"])
        .arg(&catalog)
        .arg(abi.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("OWN\tperfect\t1.0000"));
}

#[test]
fn test_check_requested_standard_json() {
    let abi = abi_file(&catalog_abi("ERC20"));

    let output = eip_solver()
        .arg("check")
        .arg(abi.path())
        .args(["--standard", "ERC20", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let results: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["standard"], "ERC20");
    assert_eq!(results[0]["confidence"], "perfect");
    assert_eq!(results[0]["discovered_tokens"], 68);
}

#[test]
fn test_check_from_stdin() {
    eip_solver()
        .args(["check", "-", "-s", "ERC721"])
        .write_stdin(catalog_abi("ERC721"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Contract: stdin"))
        .stdout(predicate::str::contains("perfect (90/90 tokens"));
}

#[test]
fn test_check_all_with_minimum_confidence() {
    let abi = abi_file(&catalog_abi("ERC20"));

    eip_solver()
        .arg("check")
        .arg(abi.path())
        .args(["--min-confidence", "medium", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("standard\tconfidence"))
        .stdout(predicate::str::contains("ERC20\tperfect"))
        .stdout(predicate::str::contains("ERC721\tmedium"))
        .stdout(predicate::str::contains("ERC1155").not());
}

#[test]
fn test_check_reports_missing_signatures() {
    let abi = abi_file(OWNABLE_ABI);

    eip_solver()
        .arg("check")
        .arg(abi.path())
        .args(["-s", "ERC20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no_confidence"))
        .stdout(predicate::str::contains("Missing:"));
}

#[test]
fn test_check_nothing_above_minimum() {
    let abi = abi_file(OWNABLE_ABI);

    eip_solver()
        .arg("check")
        .arg(abi.path())
        .args(["--min-confidence", "low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OZOWNABLE"))
        .stdout(predicate::str::contains("ERC20").not());

    let unrelated = abi_file(r#"[{"type":"function","name":"ping","inputs":[],"outputs":[]}]"#);
    eip_solver()
        .arg("check")
        .arg(unrelated.path())
        .args(["--min-confidence", "low"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No standards matched"));
}

#[test]
fn test_check_missing_file() {
    eip_solver()
        .args(["check", "/nonexistent/abi.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ABI file not found"));
}

#[test]
fn test_check_invalid_abi() {
    let abi = abi_file("{\"bytecode\": \"0x00\"}");

    eip_solver()
        .arg("check")
        .arg(abi.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid ABI format"));
}

#[test]
fn test_function_check() {
    let abi = abi_file(&catalog_abi("ERC20"));

    eip_solver()
        .arg("function")
        .arg(abi.path())
        .args(["transfer", "--standard", "ERC20", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ERC20\ttransfer\tperfect\t1.0000\t9\t9"));
}

#[test]
fn test_function_not_in_abi() {
    let abi = abi_file(OWNABLE_ABI);

    eip_solver()
        .arg("function")
        .arg(abi.path())
        .args(["transfer", "--standard", "ERC20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Function 'transfer' not found"));
}
