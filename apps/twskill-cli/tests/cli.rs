use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn data_dir() -> PathBuf {
    // apps/twskill-cli -> apps -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().join("data")
}

fn bin(name: &str) -> Command {
    let mut cmd = Command::cargo_bin(name).unwrap();
    let tmp = std::env::temp_dir();
    cmd.current_dir(tmp)
        .env_remove("RUST_LOG")
        .env_remove("TWSKILL_PACKAGE")
        .env_remove("TWSKILL_CATALOG_FILE")
        .arg("--data-dir")
        .arg(data_dir());
    cmd
}

#[test]
fn list_shows_domains_with_record_counts() {
    bin("twskill-search")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("troubleshoot"))
        .stdout(predicate::str::contains("file: error-codes.csv"))
        .stdout(predicate::str::contains("records: 6"));
}

#[test]
fn missing_query_prints_help() {
    bin("twskill-search").assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn explicit_domain_json_output() {
    bin("twskill-search")
        .args(["10000016", "-d", "error", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"_domain\": \"error\""))
        .stdout(predicate::str::contains("金額錯誤"))
        .stdout(predicate::str::contains("Auto-detected").not());
}

#[test]
fn detected_domain_is_announced() {
    bin("twskill-search")
        .arg("折讓")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Auto-detected domain: operation]"))
        .stdout(predicate::str::contains("Domain: OPERATION"));
}

#[test]
fn unknown_domain_is_a_usage_error() {
    bin("twskill-search")
        .args(["ecpay", "-d", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown domain 'nope'"));
}

#[test]
fn no_hits_is_not_a_failure() {
    bin("twskill-search")
        .args(["zzzz", "-d", "error", "-f", "simple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

#[test]
fn search_all_as_markdown() {
    bin("twskill-search")
        .args(["ECPay", "--all", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Taiwan Invoice Search Results"))
        .stdout(predicate::str::contains("## PROVIDER"));
}

#[test]
fn package_flag_switches_catalog() {
    bin("twskill-search")
        .args(["黑貓", "-p", "logistics", "-f", "simple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TCAT"));
}

#[test]
fn bad_package_is_rejected() {
    bin("twskill-search").args(["x", "-p", "shipping"]).assert().code(2);
}

#[test]
fn recommend_json() {
    bin("twskill-recommend")
        .args(["電商 高交易量 穩定", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recommended\": \"ECPay\""))
        .stdout(predicate::str::contains("HashKey/HashIV"));
}

#[test]
fn recommend_payment_simple() {
    bin("twskill-recommend")
        .args(["LINE Pay 行動支付", "-p", "payment", "-f", "simple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommended: newebpay"));
}

#[test]
fn recommend_payment_lists_caveats() {
    bin("twskill-recommend")
        .args(["apple pay google pay", "-p", "payment", "-f", "simple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommended: payuni"))
        .stdout(predicate::str::contains("Score: 6"))
        .stdout(predicate::str::contains("完整文檔: 文檔完整度不如 ECPay"));
}

#[test]
fn recommend_payment_without_match() {
    bin("twskill-recommend")
        .args(["hello", "-p", "payment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No provider matched: hello"));
    bin("twskill-recommend")
        .args(["hello", "-p", "payment", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("null"));
}

#[test]
fn recommend_without_rule_book_fails() {
    bin("twskill-recommend")
        .args(["黑貓", "-p", "logistics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no provider recommendations"));
}
