mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::create_test_file;
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

const DATA: &str = indoc! {"
    1, 2, 3
    1, 2
    1, 3
    2, 3
    1
"};

const PARAMS: &str = indoc! {"
    MIS(rest) = 0.2
    Price(rest) = 0
    SDC = 1
    AVPT = 0
"};

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let data = create_test_file(&temp, "data.txt", DATA);
    let params = create_test_file(&temp, "para.txt", PARAMS);
    (temp, data, params)
}

#[test]
fn mine_writes_text_report_to_output_file() {
    let (temp, data, params) = setup();
    let output = temp.path().join("result.txt");

    cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .env_remove("MSAPRIORI_CONFIG")
        .arg("mine")
        .arg(&data)
        .arg(&params)
        .arg(&output)
        .assert()
        .success();

    let report = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        report,
        indoc! {"
            (Length-1 3
            (1) : 4 : 5 : 0
            (2) : 3 : 5 : 0
            (3) : 3 : 5 : 0
            )
            (Length-2 3
            (1 2) : 2 : 4 : 0
            (1 3) : 2 : 4 : 0
            (2 3) : 2 : 3 : 0
            )
            (Length-3 1
            (1 2 3) : 1 : 2 : 0
            )
        "}
    );
}

#[test]
fn mine_prints_json_to_stdout() {
    let (temp, data, params) = setup();

    let stdout = cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .env_remove("MSAPRIORI_CONFIG")
        .args(["mine", "--format", "json", "--no-parallel"])
        .arg(&data)
        .arg(&params)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(json["transactions"], 5);
    assert_eq!(json["levels"].as_array().unwrap().len(), 3);
    assert_eq!(json["levels"][2]["itemsets"][0]["itemset"], serde_json::json!([1, 2, 3]));
    assert_eq!(json["levels"][2]["itemsets"][0]["tail_count"], 2);
}

#[test]
fn config_file_selects_output_format() {
    let (temp, data, params) = setup();
    let config = create_test_file(
        &temp,
        "custom.toml",
        indoc! {r#"
            [output]
            format = "json"
        "#},
    );

    let stdout = cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .arg("mine")
        .arg("--config")
        .arg(&config)
        .arg(&data)
        .arg(&params)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(json["levels"][0]["count"], 3);
}

#[test]
fn malformed_transactions_fail_with_location() {
    let temp = TempDir::new().unwrap();
    let data = create_test_file(&temp, "data.txt", "1, 2\nthree\n");
    let params = create_test_file(&temp, "para.txt", PARAMS);

    let output = cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .env_remove("MSAPRIORI_CONFIG")
        .arg("mine")
        .arg(&data)
        .arg(&params)
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("data.txt:2"), "stderr was: {stderr}");
}

#[test]
fn missing_parameter_file_fails() {
    let (temp, data, _) = setup();

    cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .env_remove("MSAPRIORI_CONFIG")
        .arg("mine")
        .arg(&data)
        .arg(temp.path().join("absent.txt"))
        .assert()
        .failure();
}

#[test]
fn init_creates_config_once() {
    let temp = TempDir::new().unwrap();

    cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success();
    assert!(temp.path().join(".msapriori.toml").exists());

    cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .failure();

    cargo_bin_cmd!("msapriori")
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
