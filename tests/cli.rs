use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:trip\r\n\
SUMMARY:Trip\r\n\
DTSTART:20240301T100000Z\r\n\
DTEND:20240303T100000Z\r\n\
CATEGORIES:travel, work\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:standup\r\n\
SUMMARY:Standup\r\n\
DTSTART:20240301T090000Z\r\n\
DTEND:20240301T091500Z\r\n\
CATEGORIES:work\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:holiday\r\n\
SUMMARY:Holiday\r\n\
DTSTART;VALUE=DATE:20231225\r\n\
DTEND;VALUE=DATE:20231227\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

fn icalfmt(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("icalfmt").unwrap();
    // Keep the user's real config out of the way
    cmd.arg("--config").arg(config_dir.path().join("config.toml"));
    cmd
}

fn config_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "").unwrap();
    dir
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_events_from_stdin_are_sorted_json() {
    let dir = config_dir();
    let value = json_output(icalfmt(&dir).arg("events").write_stdin(FEED));

    let summaries: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["summary"].as_str().unwrap())
        .collect();
    assert_eq!(summaries, vec!["Holiday", "Standup", "Trip"]);
    assert_eq!(value[0]["end"], "2023-12-26T00:00:00");
}

#[test]
fn test_events_from_file_with_filters() {
    let dir = config_dir();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FEED.as_bytes()).unwrap();

    let value = json_output(
        icalfmt(&dir)
            .args(["events", "-y", "2024", "-c", "+cal,-work"])
            .arg(file.path()),
    );

    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["categories"], serde_json::json!(["cal"]));
    assert_eq!(value[1]["categories"], serde_json::json!(["cal", "travel"]));
}

#[test]
fn test_split_long_grouped_by_day() {
    let dir = config_dir();
    let value = json_output(
        icalfmt(&dir)
            .args([
                "events",
                "--from",
                "2024-01-01",
                "--split-long",
                "--start-prefix",
                "> ",
                "--end-prefix",
                "< ",
                "--group",
                "days",
            ])
            .write_stdin(FEED),
    );

    let days = value.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0][1]["summary"], "> Trip");
    assert_eq!(days[1][0]["summary"], "< Trip");
    assert!(days[1][0]["end"].is_null());
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "month = 12\n").unwrap();

    let value = json_output(icalfmt(&dir).arg("events").write_stdin(FEED));
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["summary"], "Holiday");
}

#[test]
fn test_categories_command() {
    let dir = config_dir();
    icalfmt(&dir)
        .args(["categories", "-c", "+zoo"])
        .write_stdin(FEED)
        .assert()
        .success()
        .stdout("travel\nwork\nzoo\n");
}

#[test]
fn test_categories_command_keeps_escaped_commas() {
    let dir = config_dir();
    let feed = FEED.replace("CATEGORIES:work\r\n", "CATEGORIES:Meetings\\, internal\r\n");

    icalfmt(&dir)
        .arg("categories")
        .write_stdin(feed)
        .assert()
        .success()
        .stdout("Meetings, internal\ntravel\nwork\n");
}

#[test]
fn test_month_out_of_range_in_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "month = 13\n").unwrap();

    icalfmt(&dir)
        .arg("events")
        .write_stdin(FEED)
        .assert()
        .failure()
        .stderr(predicate::str::contains("month"));
}

#[test]
fn test_agenda_format() {
    let dir = config_dir();
    icalfmt(&dir)
        .args(["events", "--format", "agenda", "-y", "2024"])
        .write_stdin(FEED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fri Mar 1 2024").and(predicate::str::contains("Standup")));
}

#[test]
fn test_bad_date_fails_whole_feed() {
    let dir = config_dir();
    let feed = FEED.replace("DTSTART:20240301T090000Z", "DTSTART:tomorrow");

    icalfmt(&dir)
        .arg("events")
        .write_stdin(feed)
        .assert()
        .failure()
        .stderr(predicate::str::contains("DTSTART"));
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let dir = config_dir();
    icalfmt(&dir)
        .args(["events", "--debug"])
        .env_remove("RUST_LOG")
        .write_stdin(FEED)
        .assert()
        .success()
        .stderr(predicate::str::contains("Event {"));
}
