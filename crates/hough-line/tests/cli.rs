#![cfg(feature = "cli")]

use assert_cmd::Command;
use hough_line::{pgm, LineDetectionReport};
use predicates::prelude::*;

fn diagonal_pgm() -> Vec<u8> {
    let mut data = b"P5\n5 5\n255\n".to_vec();
    for y in 0..5 {
        for x in 0..5 {
            data.push(if x == y { 200 } else { 0 });
        }
    }
    data
}

fn uniform_pgm(value: u8) -> Vec<u8> {
    let mut data = b"# flat\nP5\n6 4\n255\n".to_vec();
    data.extend(std::iter::repeat(value).take(24));
    data
}

fn cmd() -> Command {
    Command::cargo_bin("hough-line").expect("binary")
}

#[test]
fn filters_stdin_to_stdout() {
    let input = diagonal_pgm();
    let output = cmd()
        .write_stdin(input.clone())
        .assert()
        .success()
        .stderr(
            predicate::str::contains("(m, c)=(0.75781")
                .and(predicate::str::contains(", -0.5)\n")),
        )
        .get_output()
        .stdout
        .clone();

    assert!(output.starts_with(b"P5\n5 5\n255\n"));
    assert_eq!(output.len(), input.len());
    let img = pgm::read_pgm(&mut &output[..]).expect("decode output");
    assert_eq!(img.at(2, 1), 0);
    assert_eq!(img.at(2, 2), 200);
}

#[test]
fn uniform_image_passes_through() {
    let input = uniform_pgm(100);
    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let mut expected = b"P5\n6 4\n255\n".to_vec();
    expected.extend(std::iter::repeat(100u8).take(24));
    assert_eq!(output, expected);
}

#[test]
fn bad_magic_fails() {
    cmd()
        .write_stdin(b"P2\n2 2\n255\n0 0 0 0\n".to_vec())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bad magic number"));
}

#[test]
fn truncated_body_fails() {
    cmd()
        .write_stdin(b"P5\n4 4\n255\n\x01\x02".to_vec())
        .assert()
        .failure()
        .stderr(predicate::str::contains("truncated pixel data"));
}

#[test]
fn max_value_out_of_range_fails() {
    cmd()
        .write_stdin(b"P5\n1 1\n300\n\x00".to_vec())
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 1..=255"));
}

#[test]
fn files_report_and_accumulator() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.pgm");
    let output = dir.path().join("out.pgm");
    let report = dir.path().join("report.json");
    let accumulator = dir.path().join("acc.pgm");
    let config = dir.path().join("config.json");
    std::fs::write(&input, diagonal_pgm()).expect("write input");
    std::fs::write(
        &config,
        r#"{ "slope": { "min": -2.0, "max": 2.0, "bins": 128 } }"#,
    )
    .expect("write config");

    cmd()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .arg("--threshold")
        .arg("60")
        .arg("--report")
        .arg(&report)
        .arg("--accumulator")
        .arg(&accumulator)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let out = pgm::read_pgm_file(&output).expect("output image");
    assert_eq!((out.width(), out.height()), (5, 5));

    let acc = pgm::read_pgm_file(&accumulator).expect("accumulator image");
    assert_eq!((acc.width(), acc.height(), acc.max_value()), (128, 512, 255));
    assert_eq!(acc.min_max(), (0, 255));

    let report = LineDetectionReport::load_json(&report).expect("report");
    assert_eq!(report.params.threshold, 60);
    assert_eq!(report.params.slope.bins, 128);
    assert_eq!((report.width, report.height), (5, 5));
    assert_eq!(report.line.votes, 400);
    assert!(report.segment.is_some());
}

#[test]
fn missing_input_file_fails() {
    cmd()
        .arg("--input")
        .arg("/nonexistent/input.pgm")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("hough-line:"));
}

#[test]
fn slope_range_too_wide_for_image_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{ "slope": { "min": -1e9, "max": 1e9, "bins": 8 } }"#,
    )
    .expect("write config");

    cmd()
        .arg("--config")
        .arg(&config)
        .write_stdin(diagonal_pgm())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid detector parameters"));
}
