//! CLI contract tests
//!
//! Runs the real binary with `--config` and `--model` pointing into a temp
//! directory so nothing touches the user's config or data dirs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn veracity_bin() -> String {
    env!("CARGO_BIN_EXE_veracity").to_string()
}

struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus.jsonl");
        std::fs::write(
            dir.path().join("config.toml"),
            format!("[corpus]\npath = {:?}\n", corpus.display().to_string()),
        )
        .unwrap();
        Self { dir }
    }

    fn model(&self) -> PathBuf {
        self.dir.path().join("model.bin")
    }

    fn corpus(&self) -> PathBuf {
        self.dir.path().join("corpus.jsonl")
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(veracity_bin());
        cmd.args(args)
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .arg("--model")
            .arg(self.model())
            .env_remove("VERACITY_MODEL_PATH")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to run veracity")
    }

    fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn veracity");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "veracity failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is valid JSON")
}

#[test]
fn test_check_json_output() {
    let sandbox = Sandbox::new();
    let json = stdout_json(&sandbox.run(&[
        "check",
        "Drinking bleach can cure coronavirus",
        "--format",
        "json",
    ]));

    assert_eq!(json["tier"], "high");
    let p = json["probability"].as_f64().unwrap();
    assert!(p > 0.7 && p <= 1.0);
    assert!(sandbox.model().exists(), "cold start should persist the model");
}

#[test]
fn test_check_text_output() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["check", "The earth is flat and NASA is lying to everyone"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Confidence Score:"));
    assert!(stdout.contains("RISK"));
}

#[test]
fn test_check_empty_stdin_has_no_content() {
    let sandbox = Sandbox::new();
    let json = stdout_json(&sandbox.run_with_stdin(&["check", "--format", "json"], "  \n\t "));
    assert_eq!(json["tier"], "no_content");
    assert_eq!(json["probability"].as_f64(), Some(0.5));
}

#[test]
fn test_check_file() {
    let sandbox = Sandbox::new();
    let file = sandbox.path().join("article.txt");
    std::fs::write(&file, "Chemtrails are\n\ngovernment   mind control chemicals").unwrap();
    let json = stdout_json(&sandbox.run(&[
        "check",
        "--file",
        file.to_str().unwrap(),
        "--format",
        "json",
    ]));
    assert_eq!(json["preview"], "Chemtrails are government mind control chemicals");
}

#[test]
fn test_check_missing_file_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["check", "--file", "/nonexistent/veracity-input.txt"]);
    assert!(!output.status.success());
}

#[test]
fn test_batch_preserves_order() {
    let sandbox = Sandbox::new();
    let file = sandbox.path().join("claims.txt");
    std::fs::write(
        &file,
        "Essential oils can cure any disease including cancer\n\nRegular exercise improves health\n",
    )
    .unwrap();
    let json = stdout_json(&sandbox.run(&["batch", file.to_str().unwrap(), "--format", "json"]));

    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["preview"].as_str().unwrap().starts_with("Essential oils"));
    assert_eq!(reports[0]["tier"], "high");
    assert_eq!(reports[1]["tier"], "low");
}

#[test]
fn test_label_then_train() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["label", "Bigfoot runs the post office", "--as", "misinformation"]);
    assert!(output.status.success());
    let recorded = std::fs::read_to_string(sandbox.corpus()).unwrap();
    assert_eq!(recorded.lines().count(), 1);
    assert!(recorded.contains("\"label\":\"misinformation\""));

    let output = sandbox.run(&["train"]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Trained on 16 examples"), "got: {}", stdout);
    assert!(sandbox.model().exists());
}

#[test]
fn test_train_without_seed_needs_both_classes() {
    let sandbox = Sandbox::new();
    sandbox.run(&["label", "Water is wet", "--as", "reliable"]);
    let output = sandbox.run(&["train", "--no-seed"]);
    assert!(!output.status.success());
}

#[test]
fn test_label_rejects_unknown_label() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["label", "Something", "--as", "maybe"]);
    assert!(!output.status.success());
    assert!(!sandbox.corpus().exists());
}

#[test]
fn test_status_and_clean() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["status"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("missing"));
    assert!(!sandbox.model().exists(), "status must not write a model");

    assert!(sandbox.run(&["check", "Vaccines are tested in clinical trials"]).status.success());
    let output = sandbox.run(&["status"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("present"), "got: {}", stdout);
    assert!(stdout.contains("Vocabulary:"));

    let output = sandbox.run(&["clean", "--dry-run"]);
    assert!(output.status.success());
    assert!(sandbox.model().exists());

    let output = sandbox.run(&["clean"]);
    assert!(output.status.success());
    assert!(!sandbox.model().exists());
}

#[test]
fn test_status_reports_corrupt_model_without_rewriting() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.model(), b"not a model").unwrap();
    let output = sandbox.run(&["status"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("unreadable"));
    assert_eq!(std::fs::read(sandbox.model()).unwrap(), b"not a model");
}

#[test]
fn test_train_skips_cold_start_seed_fit() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["train", "--log-level", "info"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("training from seed corpus"), "got: {}", stderr);
    assert!(sandbox.model().exists());
}

#[test]
fn test_train_save_failure_keeps_previous_model() {
    let sandbox = Sandbox::new();
    let blocker = sandbox.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();
    let output = Command::new(veracity_bin())
        .arg("train")
        .arg("--config")
        .arg(sandbox.path().join("config.toml"))
        .arg("--model")
        .arg(blocker.join("model.bin"))
        .env_remove("VERACITY_MODEL_PATH")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("previously saved model"), "got: {}", stderr);
}

#[test]
fn test_init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.toml");
    let run = || {
        Command::new(veracity_bin())
            .args(["init", "--config"])
            .arg(&config)
            .output()
            .unwrap()
    };

    let output = run();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created"));
    assert!(std::fs::read_to_string(&config).unwrap().contains("[policy]"));

    let output = run();
    assert!(String::from_utf8_lossy(&output.stdout).contains("Already initialized"));
}

#[test]
fn test_invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path().join("config.toml"), "[model]\nalpha = -1.0\n").unwrap();
    let output = sandbox.run(&["check", "anything"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config"));
}
