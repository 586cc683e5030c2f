//! End-to-end tests of the `tsa` binary.
//!
//! Each test runs in its own temp directory so no `config/tsa.toml` or
//! `.env` from the checkout is picked up.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

const CREDENTIAL_VARS: [&str; 4] = [
    "TWITTER_CONSUMER_KEY",
    "TWITTER_CONSUMER_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_TOKEN_SECRET",
];

fn tsa_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tsa"))
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("tweets.csv");
    fs::write(
        &csv_path,
        "id,tweet_text\n1,I love this!\n2,This is terrible.\n3,The meeting is at noon.\n",
    )
    .unwrap();
    (tmp, csv_path)
}

struct Run {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

fn tsa_command(cwd: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(tsa_binary());
    cmd.current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null());
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn run(mut cmd: Command) -> Run {
    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("Failed to run tsa binary at {:?}: {}", tsa_binary(), e));
    Run {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code(),
    }
}

fn run_tsa(cwd: &Path, args: &[&str]) -> Run {
    run(tsa_command(cwd, args))
}

fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix))
        })
        .collect()
}

#[test]
fn test_file_analysis_writes_all_outputs() {
    let (tmp, csv_path) = setup_test_env();
    let out_dir = tmp.path().join("out");

    let r = run_tsa(
        tmp.path(),
        &[
            "file",
            csv_path.to_str().unwrap(),
            "--output-dir",
            out_dir.to_str().unwrap(),
        ],
    );
    assert_eq!(r.code, Some(0), "stdout={} stderr={}", r.stdout, r.stderr);

    assert!(r.stdout.contains("Analysis Results:"));
    assert!(r.stdout.contains("Source: file:tweets.csv"));
    assert!(r.stdout.contains("Total tweets analyzed: 3"));
    assert!(r.stdout.contains("Positive tweets: 1 (33.3%)"));
    assert!(r.stdout.contains("Neutral tweets: 1 (33.3%)"));
    assert!(r.stdout.contains("Negative tweets: 1 (33.3%)"));

    let tables = files_with_prefix(&out_dir, "sentiment_analysis_results_");
    assert_eq!(tables.len(), 1);
    let table = fs::read_to_string(&tables[0]).unwrap();
    let mut lines = table.lines();
    assert_eq!(
        lines.next(),
        Some("tweet,compound_score,pos_score,neg_score,neu_score,sentiment")
    );
    assert_eq!(lines.count(), 3);

    let plots = files_with_prefix(&out_dir, "sentiment_analysis_plots_");
    assert_eq!(plots.len(), 1);
    assert!(fs::read_to_string(&plots[0]).unwrap().starts_with("<svg"));
}

#[test]
fn test_file_analysis_json_summary() {
    let (tmp, csv_path) = setup_test_env();

    let r = run_tsa(
        tmp.path(),
        &["file", csv_path.to_str().unwrap(), "--format", "json"],
    );
    assert_eq!(r.code, Some(0), "stderr={}", r.stderr);

    let value: serde_json::Value = serde_json::from_str(&r.stdout).unwrap();
    assert_eq!(value["source"], "file:tweets.csv");
    assert_eq!(value["total_count"], 3);
    assert_eq!(value["top_positive"][0]["text"], "I love this!");
    assert_eq!(value["top_negative"][0]["text"], "This is terrible.");
}

#[test]
fn test_custom_column_and_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("posts.csv"), "body\nWhat a wonderful day\n").unwrap();
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/tsa.toml"),
        r#"
[sources.file]
path = "posts.csv"
column = "body"

[output]
write_plots = false
"#,
    )
    .unwrap();

    let r = run_tsa(tmp.path(), &["file"]);
    assert_eq!(r.code, Some(0), "stderr={}", r.stderr);
    assert!(r.stdout.contains("Positive tweets: 1 (100.0%)"));
    assert_eq!(files_with_prefix(tmp.path(), "sentiment_analysis_results_").len(), 1);
    assert!(files_with_prefix(tmp.path(), "sentiment_analysis_plots_").is_empty());
}

#[test]
fn test_missing_column_is_fatal() {
    let (tmp, csv_path) = setup_test_env();

    let r = run_tsa(
        tmp.path(),
        &["file", csv_path.to_str().unwrap(), "--column", "text"],
    );
    assert_eq!(r.code, Some(1));
    assert!(r.stderr.contains("text"));
    assert!(r.stderr.contains("tweet_text"));
    assert!(r.stdout.is_empty());
}

#[test]
fn test_missing_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let r = run_tsa(tmp.path(), &["file", "nope.csv"]);
    assert_eq!(r.code, Some(1));
    assert!(r.stderr.contains("nope.csv"));
}

#[test]
fn test_nothing_analyzed_exits_2() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("blank.csv"), "id,tweet_text\n1,\n2,   \n").unwrap();

    let r = run_tsa(tmp.path(), &["file", "blank.csv"]);
    assert_eq!(r.code, Some(2), "stderr={}", r.stderr);
    assert!(r.stderr.contains("No tweets were successfully analyzed"));
    assert!(files_with_prefix(tmp.path(), "sentiment_analysis_").is_empty());
}

#[test]
fn test_search_without_credentials() {
    let tmp = TempDir::new().unwrap();
    let r = run_tsa(tmp.path(), &["search", "rust"]);
    assert_eq!(r.code, Some(1));
    for var in CREDENTIAL_VARS {
        assert!(r.stderr.contains(var), "{} not named in: {}", var, r.stderr);
    }
}

#[test]
fn test_search_blank_topic() {
    let tmp = TempDir::new().unwrap();

    let mut cmd = tsa_command(tmp.path(), &["search"]);
    for var in CREDENTIAL_VARS {
        cmd.env(var, "x");
    }
    let r = run(cmd);
    assert_eq!(r.code, Some(1));
    assert!(r.stdout.contains("Welcome to Twitter Sentiment Analysis!"));
    assert!(r.stderr.contains("Error: Please enter a topic to analyze"));
}

#[test]
fn test_sources_lists_both() {
    let (tmp, _csv_path) = setup_test_env();

    let r = run_tsa(tmp.path(), &["sources", "--format", "json"]);
    assert_eq!(r.code, Some(0), "stderr={}", r.stderr);

    let value: serde_json::Value = serde_json::from_str(&r.stdout).unwrap();
    let sources = value.as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["source_type"], "file");
    assert_eq!(sources[1]["source_type"], "twitter");
    assert_eq!(sources[1]["healthy"], false);
}

#[test]
fn test_invalid_config_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("bad.toml");
    fs::write(&config, "[sources.twitter]\npage_size = 500\n").unwrap();

    let r = run_tsa(tmp.path(), &["--config", config.to_str().unwrap(), "sources"]);
    assert_eq!(r.code, Some(1));
    assert!(r.stderr.contains("page_size"));
}
