//! CLI integration tests for hive-ddl.
//!
//! These tests verify command-line argument parsing, help output,
//! generated statements and exit codes for various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the hive-ddl binary.
fn cmd() -> Command {
    Command::cargo_bin("hive-ddl").unwrap()
}

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const SCHEMA: &str = r#"
tables:
  - name: inputTable
    columns:
      - { name: id, type: INTEGER }
      - { name: value, type: VARCHAR }
      - { name: price, type: DECIMAL, precision: 4, scale: 2 }
"#;

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("create-table"))
        .stdout(predicate::str::contains("load-data"))
        .stdout(predicate::str::contains("map-type"))
        .stdout(predicate::str::contains("time"));
}

#[test]
fn test_generate_subcommand_help() {
    cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-table"))
        .stdout(predicate::str::contains("--comments"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hive-ddl"));
}

#[test]
fn test_global_flags_and_defaults() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--schema"))
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("[default: config.yaml]"))
        .stdout(predicate::str::contains("[default: text]"))
        .stdout(predicate::str::contains("[default: info]"));
}

#[test]
fn test_no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_missing_config_exits_with_code_7() {
    cmd()
        .args(["--config", "/nonexistent/config.yaml", "generate"])
        .assert()
        .failure()
        .code(7); // EXIT_IO_ERROR - file not found
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let config = yaml_file("this is not: valid: yaml: [");
    cmd()
        .args(["-c", config.path().to_str().unwrap(), "generate"])
        .assert()
        .failure()
        .code(1); // EXIT_CONFIG_ERROR
}

#[test]
fn test_malformed_override_exits_with_code_1() {
    let config = yaml_file("table:\n  input: inputTable\nhive:\n  map_column_hive: \"id\"\n");
    cmd()
        .args(["-c", config.path().to_str().unwrap(), "generate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed mapping"));
}

#[test]
fn test_unknown_log_format_exits_with_code_1() {
    cmd()
        .args(["--log-format", "xml", "time", "12:00:00"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_missing_schema_source_exits_with_code_1() {
    let config = yaml_file("table:\n  input: inputTable\n");
    cmd()
        .args(["-c", config.path().to_str().unwrap(), "generate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No column types available"));
}

#[test]
fn test_unknown_table_exits_with_code_2() {
    let config = yaml_file("table:\n  input: missing\n");
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "generate",
        ])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_unresolved_override_exits_with_code_1() {
    let config = yaml_file(
        "table:\n  input: inputTable\nhive:\n  map_column_hive: \"nope=STRING\"\n",
    );
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "create-table",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No column by the name nope"));
}

// =============================================================================
// Statement Generation Tests
// =============================================================================

#[test]
fn test_generate_prints_both_statements() {
    let config = yaml_file(
        r#"
table:
  input: inputTable
  output: outputTable
hive:
  database: db
  partition:
    key: ds
    value: "20110413"
  map_column_hive: "id=STRING"
"#,
    );
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "generate",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CREATE TABLE IF NOT EXISTS `db`.`outputTable` ( `id` STRING, `value` STRING, `price` DECIMAL(4, 2)) PARTITIONED BY (ds STRING) ",
        ))
        .stdout(predicate::str::contains(
            "LOAD DATA INPATH '/user/hive/warehouse/inputTable' INTO TABLE `db`.`outputTable` PARTITION (ds='20110413')",
        ));
}

#[test]
fn test_output_table_flag_overrides_config() {
    let config = yaml_file("table:\n  input: inputTable\n");
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "generate",
            "--output-table",
            "renamed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INTO TABLE `renamed`"));
}

#[test]
fn test_create_table_lzop() {
    let config = yaml_file("table:\n  input: inputTable\nhive:\n  compression_codec: lzop\n");
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "create-table",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "STORED AS INPUTFORMAT 'com.hadoop.mapred.DeprecatedLzoTextInputFormat'",
        ))
        .stdout(predicate::str::contains("LOAD DATA").not());
}

#[test]
fn test_create_table_with_comments_flag() {
    let config = yaml_file("table:\n  input: inputTable\n");
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "create-table",
            "--comments",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMENT 'Imported by hive-ddl on "));
}

#[test]
fn test_load_data_with_schema() {
    let config = yaml_file(
        "table:\n  input: inputTable\nhive:\n  target_dir: targetDir\n  overwrite: true\n",
    );
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "load-data",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "LOAD DATA INPATH '/user/hive/warehouse/targetDir' OVERWRITE INTO TABLE `inputTable`\n",
        ));
}

#[test]
fn test_load_data_without_schema_exits_with_code_1() {
    let config = yaml_file("table:\n  input: inputTable\n");
    cmd()
        .args(["-c", config.path().to_str().unwrap(), "load-data"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_load_data_unresolved_override_exits_with_code_1() {
    let config = yaml_file(
        "table:\n  input: inputTable\nhive:\n  map_column_hive: \"ghost=STRING\"\n",
    );
    let schema = yaml_file(SCHEMA);
    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "load-data",
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No column by the name ghost"));
}

#[test]
fn test_generate_json_output() {
    let config = yaml_file("table:\n  input: inputTable\n");
    let schema = yaml_file(SCHEMA);
    let output = cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            "--schema",
            schema.path().to_str().unwrap(),
            "--output-json",
            "generate",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["create_table"]
        .as_str()
        .unwrap()
        .starts_with("CREATE TABLE IF NOT EXISTS `inputTable`"));
    assert!(value["load_data"].as_str().unwrap().starts_with("LOAD DATA INPATH"));
}

// =============================================================================
// Inspection Command Tests
// =============================================================================

#[test]
fn test_map_type_by_name_and_code() {
    cmd()
        .args(["map-type", "varchar"])
        .assert()
        .success()
        .stdout(predicate::str::diff("STRING\n"));

    cmd()
        .args(["map-type", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::diff("BIGINT\n"));
}

#[test]
fn test_map_type_approximate() {
    cmd()
        .args(["map-type", "TIMESTAMP"])
        .assert()
        .success()
        .stdout(predicate::str::diff("STRING (approximate)\n"));
}

#[test]
fn test_map_type_unsupported_exits_with_code_2() {
    cmd()
        .args(["map-type", "BLOB"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_map_type_json() {
    cmd()
        .args(["--output-json", "map-type", "NUMERIC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hive_type\": \"DOUBLE\""))
        .stdout(predicate::str::contains("\"approximate\": true"))
        .stdout(predicate::str::contains("\"code\": 2"));
}

#[test]
fn test_time_canonical_form() {
    cmd()
        .args(["time", "1:2:3.000000100"])
        .assert()
        .success()
        .stdout(predicate::str::diff("01:02:03.000000100\n"));

    cmd()
        .args(["time", "23:59:59.5000"])
        .assert()
        .success()
        .stdout(predicate::str::diff("23:59:59.5000\n"));
}

#[test]
fn test_time_json() {
    cmd()
        .args(["--output-json", "time", "12:30:45.123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nanos\": 123000000"))
        .stdout(predicate::str::contains("\"fraction_digits\": 3"));
}

#[test]
fn test_malformed_time_exits_with_code_3() {
    cmd()
        .args(["time", "12:30"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Malformed time value"));
}
