//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a temporary data directory, with the
//! keyring disabled so quests and news always come from the offline tables.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

struct Cli {
    home: TempDir,
}

impl Cli {
    fn new() -> Self {
        let cli = Self {
            home: tempfile::tempdir().unwrap(),
        };
        cli.run_success(&["config", "set", "provider.keyring", "false"]);
        cli.run_success(&["config", "set", "provider.quest_latency_ms", "0"]);
        cli.run_success(&["config", "set", "provider.news_latency_ms", "0"]);
        cli
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pomoquest"));
        cmd.env("POMOQUEST_HOME", self.home.path())
            .env_remove("GEMINI_API_KEY")
            .env_remove("POMOQUEST_LOG");
        cmd
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to execute CLI command");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }

    fn run_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "CLI command {args:?} failed: {stderr}");
        stdout
    }

    /// Feed `script` to `pomoquest play` and return stdout.
    fn play(&self, script: &str) -> String {
        let mut child = self
            .command()
            .arg("play")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start play session");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(script.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();
        assert!(output.status.success(), "play session failed");
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn home(&self) -> &Path {
        self.home.path()
    }
}

#[test]
fn test_config_get_set() {
    let cli = Cli::new();
    assert_eq!(cli.run_success(&["config", "get", "game.quest_cost"]).trim(), "10");

    cli.run_success(&["config", "set", "game.quest_cost", "20"]);
    assert_eq!(cli.run_success(&["config", "get", "game.quest_cost"]).trim(), "20");
    assert!(cli.home().join("config.toml").exists());
}

#[test]
fn test_config_rejects_unknown_key() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["config", "get", "game.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("game.nope"));

    let (_, _, code) = cli.run(&["config", "set", "game.quest_cost", "lots"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_and_reset() {
    let cli = Cli::new();
    let listed: serde_json::Value =
        serde_json::from_str(&cli.run_success(&["config", "list"])).unwrap();
    assert_eq!(listed["provider"]["keyring"], false);

    cli.run_success(&["config", "reset"]);
    assert_eq!(cli.run_success(&["config", "get", "provider.keyring"]).trim(), "true");
}

#[test]
fn test_quest_prints_json() {
    let cli = Cli::new();
    let quest: serde_json::Value = serde_json::from_str(&cli.run_success(&["quest"])).unwrap();
    assert!(quest["text"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(quest["reward"].as_u64().is_some());
}

#[test]
fn test_news_names_company() {
    let cli = Cli::new();
    let news = cli.run_success(&["news", "pomo_pro"]);
    assert!(news.contains("PomoPro Gadgets"));

    let (_, _, code) = cli.run(&["news", "acme"]);
    assert_ne!(code, 0);
}

#[test]
fn test_auth_status_without_key() {
    let cli = Cli::new();
    let out = cli.run_success(&["auth", "status"]);
    assert!(out.contains("not configured"));

    cli.run_success(&["config", "set", "provider.api_key", "abc"]);
    let out = cli.run_success(&["auth", "status"]);
    assert!(out.contains("config file"));
}

#[test]
fn test_journal_export() {
    let cli = Cli::new();
    let out_dir = cli.home().join("exports");
    let out = cli.run_success(&[
        "journal",
        "--out",
        out_dir.to_str().unwrap(),
        "Deep",
        "focus",
        "today.",
    ]);
    let path = Path::new(out.trim());
    assert!(path.starts_with(&out_dir));
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.starts_with("# Journal Entry: "));
    assert!(content.contains("Deep focus today."));
}

#[test]
fn test_play_tasks_and_goal() {
    let cli = Cli::new();
    let out = cli.play("task add one\ntask add two\ngoal 2\nstatus\nquit\n");
    assert!(out.contains("Task goal set to 2."));
    assert!(out.contains("[ ] #"));
    assert!(out.contains("Coins: 50"));
}

#[test]
fn test_play_quest_is_charged() {
    let cli = Cli::new();
    let out = cli.play("quest new\nquit\n");
    assert!(out.contains("Consulting the quest giver..."));
    assert!(out.contains("New quest #"));
}

#[test]
fn test_play_invest() {
    let cli = Cli::new();
    let out = cli.play("invest pixel_power\nquit\n");
    assert!(out.contains("Bought a share of Pixel Power Inc.: 1 owned."));
    assert!(out.contains("News: "));

    let out = cli.play("invest code_crafters\ninvest acme\nquit\n");
    assert!(out.contains("That share costs 75 coins; you have 50."));
}

#[test]
fn test_play_document_shortcut_round_trip() {
    let cli = Cli::new();
    let source = cli.home().join("notes.txt");
    let target = cli.home().join("copy.txt");
    std::fs::write(&source, "remember the milk").unwrap();

    let mut child = cli
        .command()
        .arg("play")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start play session");
    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    writeln!(stdin, "doc add {}", source.display()).unwrap();
    let id = loop {
        let mut line = String::new();
        assert_ne!(stdout.read_line(&mut line).unwrap(), 0, "session ended early");
        if let Some(id) = line
            .trim()
            .strip_prefix("Shortcut #")
            .and_then(|rest| rest.strip_suffix(" added."))
        {
            break id.to_string();
        }
    };
    writeln!(stdin, "shortcut save {id} {}", target.display()).unwrap();
    writeln!(stdin, "quit").unwrap();
    drop(stdin);
    assert!(child.wait().unwrap().success());

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "remember the milk");
}
