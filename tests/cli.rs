use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn exceedence(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_exceedence_rater"))
        .arg("exceedence")
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LOG_FILE_PATH")
        .output()
        .expect("failed to run binary")
}

#[test]
fn test_malformed_date_prints_only_the_error() {
    let input = fixture("malformed_date.csv");
    let output = exceedence(&["--input", input.to_str().unwrap()]);

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "ERROR: expected date to have the format of YYYY-MM-DD but got 13/45/2020\n"
    );
}

#[test]
fn test_report_on_stdout() {
    let input = fixture("synthetic_three_seasons.csv");
    let output = exceedence(&["--input", input.to_str().unwrap(), "--step", "1.0"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Annual Excedence, Annual Snowfall Days Likelihood\n1.5,1\n"));
    assert_eq!(stdout.matches("Annual Excedence").count(), 3);
}

#[test]
fn test_quiet_run_keeps_stderr_clean() {
    let input = fixture("3122642.csv");
    let output = exceedence(&["--input", input.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_verbose_run_reports_partial_season() {
    let input = fixture("3122642.csv");
    let output = exceedence(&["--input", input.to_str().unwrap(), "--verbose"]);

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Season was not a full weather year"));
    assert!(stderr.contains("2014"));
}

#[test]
fn test_json_format() {
    let input = fixture("synthetic_three_seasons.csv");
    let output = exceedence(&["--input", input.to_str().unwrap(), "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["coverage"]["full_seasons"], 3);
    assert_eq!(value["event_days"]["points"][0]["probability"], 1.5);
}

#[test]
fn test_zero_step_is_rejected() {
    let input = fixture("synthetic_three_seasons.csv");
    let output = exceedence(&["--input", input.to_str().unwrap(), "--step", "0"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_infinite_value_is_an_error() {
    let input = std::env::temp_dir().join(format!("exceedence_inf_{}.csv", std::process::id()));
    std::fs::write(&input, "STATION,NAME,DATE,SNOW\nUS1,Boulder,2020-09-01,inf\n").unwrap();

    let output = exceedence(&["--input", input.to_str().unwrap()]);
    std::fs::remove_file(&input).ok();

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "ERROR: line 2: expected a number but got \"inf\"\n");
}

#[test]
fn test_coin_flip_is_reproducible() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_exceedence_rater"))
            .args([
                "coin-flip",
                "--people",
                "100",
                "--seed",
                "85616075",
                "--me",
                "0",
                "--verbose",
            ])
            .env_remove("LOG_FILE_PATH")
            .output()
            .expect("failed to run binary")
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(String::from_utf8_lossy(&first.stdout).contains("Player 0 ended with a total of $"));
}
