use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
[indicator]
default_mode = 2

[stations."08101001"]
POBLACION_500M = [52579,25616,26940,7585,35542,9280,36791,15545,19944,10495,21981]

[stations."08015021"]
POBLACION_500M = [300, 150, 150, 0, 250, 50]

[stations."25120001"]
POBLACION_500M = [100, 50, 50, 10]
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file
}

fn run(config: &NamedTempFile, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aging-index"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_compute_uses_config_default_mode() {
    let config = write_config(CONFIG);

    let output = run(&config, &["compute", "08101001"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "122.35\n");

    let output = run(&config, &["compute", "08101001", "--mode", "1"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "32.08\n");
}

#[test]
fn test_compute_without_config_mode_defaults_to_dependent_share() {
    let config = write_config(
        "[stations.\"08101001\"]\nPOBLACION_500M = [52579,25616,26940,7585,35542,9280,36791,15545,19944,10495,21981]\n",
    );

    let output = run(&config, &["compute", "08101001"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "32.08\n");
}

#[test]
fn test_compute_prints_nan_for_non_values() {
    let config = write_config(CONFIG);

    for args in [
        ["compute", "99999999", "--mode", "0"],
        ["compute", "08101001", "--mode", "7"],
        ["compute", "08015021", "--mode", "2"],
    ] {
        let output = run(&config, &args);
        assert_eq!(output.status.code(), Some(0), "{:?}", args);
        assert_eq!(stdout(&output), "NaN\n", "{:?}", args);
    }
}

#[test]
fn test_malformed_record_exits_with_data_error() {
    let config = write_config(CONFIG);

    let output = run(&config, &["compute", "25120001"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("expected at least 6 fields, found 4"));
}

#[test]
fn test_missing_config_exits_with_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_aging-index"))
        .args(["--config", "/nonexistent/aging-index.toml", "stations"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_report_json() {
    let config = write_config(CONFIG.replace("[100, 50, 50, 10]", "[]").as_str());

    let output = run(&config, &["report", "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["station"], "08015021");
    assert!(rows[0]["aging_index"].is_null());
    assert_eq!(rows[2]["station"], "25120001");
    assert!(rows[2]["dependent_share"].is_null());
    assert_eq!(rows[1]["dependent_share"], 32.08);
}

#[test]
fn test_stations_lists_sorted_ids() {
    let config = write_config(CONFIG);

    let output = run(&config, &["stations"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "08015021\n08101001\n25120001\n");
}
