use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("context-chunk").expect("binary");
    cmd.env_remove("CONTEXT_CHUNK_TOKENIZER")
        .env_remove("RUST_LOG");
    cmd
}

fn words(tag: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{tag}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn records(stdout: &[u8]) -> Vec<Value> {
    let body: Value = serde_json::from_slice(stdout).expect("valid json");
    body.as_array().expect("json array").clone()
}

#[test]
fn chunks_stdin_into_json_records() {
    let output = cli()
        .arg("--doc-id")
        .arg("doc_01")
        .write_stdin("First paragraph.\n\n\n\nSecond   paragraph.\r\n")
        .output()
        .expect("command run");
    assert!(output.status.success());

    let records = records(&output.stdout);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["doc_id"], "doc_01");
    assert_eq!(records[0]["chunk_id"], "doc_01_chunk_0");
    assert_eq!(records[0]["text"], "First paragraph.\n\nSecond paragraph.");
    assert_eq!(records[0]["token_count"], 4);
    assert_eq!(records[0]["metadata"], serde_json::json!({}));
}

#[test]
fn empty_input_prints_empty_array() {
    let output = cli().write_stdin("   \n\n  ").output().expect("command run");
    assert!(output.status.success());
    assert!(records(&output.stdout).is_empty());
}

#[test]
fn two_large_paragraphs_become_two_chunks() {
    let text = format!("{}\n\n{}", words("a", 200), words("b", 200));
    let output = cli()
        .args(["--overlap-tokens", "0"])
        .write_stdin(text)
        .output()
        .expect("command run");
    assert!(output.status.success());

    let records = records(&output.stdout);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["text"], words("a", 200));
    assert_eq!(records[1]["text"], words("b", 200));
    assert_eq!(records[1]["chunk_id"], "doc_chunk_1");
}

#[test]
fn metadata_is_attached_to_every_record() {
    let text = format!("{}\n\n{}", words("a", 200), words("b", 200));
    let output = cli()
        .args(["--metadata", r#"{"source":"user_upload","page":3}"#])
        .write_stdin(text)
        .output()
        .expect("command run");
    assert!(output.status.success());

    for record in records(&output.stdout) {
        assert_eq!(record["metadata"]["source"], "user_upload");
        assert_eq!(record["metadata"]["page"], 3);
    }
}

#[test]
fn reads_file_and_uses_stem_as_doc_id() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("handbook.txt");
    fs::write(&path, "Only one paragraph here.").unwrap();

    cli()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"chunk_id\": \"handbook_chunk_0\""));
}

#[test]
fn config_file_sets_budgets() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("chunking.toml");
    fs::write(
        &config,
        "min_tokens = 0\nmax_tokens = 10\noverlap_tokens = 0\n",
    )
    .unwrap();

    let text = format!("{}\n\n{}", words("a", 8), words("b", 8));
    let output = cli()
        .arg("--config")
        .arg(&config)
        .write_stdin(text)
        .output()
        .expect("command run");
    assert!(output.status.success());
    assert_eq!(records(&output.stdout).len(), 2);
}

#[test]
fn jsonl_prints_one_record_per_line() {
    let text = format!("{}\n\n{}", words("a", 200), words("b", 200));
    let output = cli()
        .args(["--format", "jsonl", "--overlap-tokens", "0"])
        .write_stdin(text)
        .output()
        .expect("command run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let record: Value = serde_json::from_str(line).expect("json line");
        assert_eq!(record["token_count"], 200);
    }
}

#[test]
fn text_format_lists_token_counts() {
    cli()
        .args(["--format", "text", "--doc-id", "notes"])
        .write_stdin("alpha beta gamma")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes_chunk_0"))
        .stdout(predicate::str::contains("tokens: 3"));
}

#[test]
fn invalid_budgets_are_rejected() {
    cli()
        .args(["--min-tokens", "400", "--max-tokens", "350"])
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn metadata_must_be_a_json_object() {
    cli()
        .args(["--metadata", "[1,2,3]"])
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}

#[test]
fn missing_tokenizer_file_fails() {
    let temp = tempdir().unwrap();
    cli()
        .arg("--tokenizer")
        .arg(temp.path().join("absent.json"))
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load tokenizer"));
}
