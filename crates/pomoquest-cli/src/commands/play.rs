//! Interactive game session.
//!
//! The snapshot lives in memory for the length of the session. Stdin lines
//! are parsed as commands; a one-second ticker drives the countdown. Quest
//! and investment requests run in the background so the timer keeps going.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use pomoquest_core::action::Action;
use pomoquest_core::attachment;
use pomoquest_core::session::{follow_up, start_actions, Countdown};
use pomoquest_core::{
    provider, Config, EntityId, Investment, InvestmentDesk, JournalEntry, QuestBoard,
    QuestRequest, ShortcutEdit, ShortcutKind, Store, ValidationError,
};

use super::{journal, render};

#[derive(Parser)]
#[command(name = "pomoquest", no_binary_name = true, disable_version_flag = true)]
struct PlayLine {
    #[command(subcommand)]
    command: PlayCommand,
}

#[derive(Subcommand)]
enum PlayCommand {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Stop and return to idle
    Reset,
    /// Set the work session length in minutes (5, 15, 25, 50)
    Duration { minutes: u32 },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        op: TaskOp,
    },
    /// Set how many completed tasks pay the bonus
    Goal { threshold: u32 },
    /// Buy or complete quests
    Quest {
        #[command(subcommand)]
        op: QuestOp,
    },
    /// Buy one share of a company
    Invest { company: String },
    /// Toggle light/dark theme
    Theme,
    /// Add web link shortcuts
    Link {
        #[command(subcommand)]
        op: LinkOp,
    },
    /// Add document shortcuts from files
    Doc {
        #[command(subcommand)]
        op: DocOp,
    },
    /// Edit, remove or save shortcuts
    Shortcut {
        #[command(subcommand)]
        op: ShortcutOp,
    },
    /// Export a journal entry
    Journal {
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the game state
    Status,
    /// Leave the game
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum TaskOp {
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Toggle completion
    Done { id: EntityId },
    Rm { id: EntityId },
}

#[derive(Subcommand)]
enum QuestOp {
    /// Pay for a new quest
    New,
    /// Complete a quest and collect its reward
    Done { id: EntityId },
}

#[derive(Subcommand)]
enum LinkOp {
    Add { name: String, url: String },
}

#[derive(Subcommand)]
enum DocOp {
    Add {
        path: PathBuf,
        /// Shortcut name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum ShortcutOp {
    Rename {
        id: EntityId,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Point a link at a new URL
    Url { id: EntityId, url: String },
    Rm { id: EntityId },
    /// Write a document shortcut back to a file
    Save { id: EntityId, path: PathBuf },
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Game {
    store: Arc<Store>,
    board: Arc<QuestBoard>,
    desk: Arc<InvestmentDesk>,
    countdown: Countdown,
    long_break_interval: u32,
    journal_dir: PathBuf,
    pending: Vec<JoinHandle<()>>,
}

impl Game {
    fn new(config: &Config, journal_dir: PathBuf) -> Self {
        let store = Arc::new(Store::new(config.initial_snapshot()));
        let provider = provider::from_config(&config.provider);
        tracing::debug!(provider = provider.name(), "content provider ready");
        let board = Arc::new(QuestBoard::new(
            store.clone(),
            provider.clone(),
            config.game.quest_cost,
        ));
        let desk = Arc::new(InvestmentDesk::new(store.clone(), provider));
        let countdown = Countdown::new(&store.snapshot().session);
        Self {
            store,
            board,
            desk,
            countdown,
            long_break_interval: config.game.long_break_interval,
            journal_dir,
            pending: Vec::new(),
        }
    }

    fn dispatch(&mut self, action: Action) {
        let events = self.store.dispatch(action);
        render::print_events(&events);
        self.countdown.sync(&self.store.snapshot().session);
    }

    fn tick(&mut self) {
        self.pending.retain(|handle| !handle.is_finished());
        self.countdown.sync(&self.store.snapshot().session);
        if let Some(finished) = self.countdown.tick() {
            println!("Time's up: {finished} is over.");
            let session = self.store.snapshot().session;
            for action in follow_up(&session, finished, self.long_break_interval) {
                self.dispatch(action);
            }
            println!("Type `start` to begin the next phase.");
        }
    }

    fn handle(&mut self, line: &str) -> Result<Flow, Box<dyn std::error::Error>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Flow::Continue);
        }
        let parsed = match PlayLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                e.print()?;
                return Ok(Flow::Continue);
            }
        };

        match parsed.command {
            PlayCommand::Start => {
                self.tick();
                for action in start_actions(&self.store.snapshot().session) {
                    self.dispatch(action);
                }
                if self.countdown.start() {
                    println!("{} left.", self.countdown.display());
                } else {
                    println!("Already running.");
                }
            }
            PlayCommand::Pause => {
                if self.countdown.pause() {
                    println!("Paused at {}.", self.countdown.display());
                } else {
                    println!("Not running.");
                }
            }
            PlayCommand::Reset => {
                self.countdown.pause();
                self.dispatch(Action::ResetSession);
            }
            PlayCommand::Duration { minutes } => {
                let phase = self.store.snapshot().session.phase;
                if self.countdown.is_running() || phase.is_break() {
                    println!("The work duration can only change while the timer is stopped outside a break.");
                } else {
                    self.dispatch(Action::work_minutes(minutes)?);
                }
            }
            PlayCommand::Task { op } => match op {
                TaskOp::Add { text } => self.dispatch(Action::task_from_input(&text.join(" "))?),
                TaskOp::Done { id } => self.dispatch(Action::ToggleTask { id }),
                TaskOp::Rm { id } => self.dispatch(Action::RemoveTask { id }),
            },
            PlayCommand::Goal { threshold } => {
                self.dispatch(Action::SetTaskRewardThreshold { threshold });
            }
            PlayCommand::Quest { op } => match op {
                QuestOp::New => self.request_quest(),
                QuestOp::Done { id } => render::print_events(&self.board.complete(id)),
            },
            PlayCommand::Invest { company } => self.invest(company),
            PlayCommand::Theme => self.dispatch(Action::ToggleTheme),
            PlayCommand::Link { op: LinkOp::Add { name, url } } => {
                self.dispatch(Action::link_from_input(&name, &url)?);
            }
            PlayCommand::Doc {
                op: DocOp::Add { path, name },
            } => {
                let payload = attachment::encode_file(&path)?;
                let name = name
                    .or_else(|| attachment::default_name(&path))
                    .unwrap_or_else(|| "Document".into());
                self.dispatch(Action::document_from_input(&name, payload)?);
            }
            PlayCommand::Shortcut { op } => self.shortcut(op)?,
            PlayCommand::Journal { out, text } => {
                let entry = JournalEntry::today(&text.join(" "))?;
                let path = entry.export(out.as_deref().unwrap_or(&self.journal_dir))?;
                println!("Journal saved to {}.", path.display());
            }
            PlayCommand::Status => {
                print!("{}", render::status(&self.store.snapshot(), &self.countdown));
                if self.board.is_generating() {
                    println!("A quest is being generated...");
                }
                if self.desk.is_researching() {
                    println!("Market research in progress...");
                }
            }
            PlayCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn shortcut(&mut self, op: ShortcutOp) -> Result<(), Box<dyn std::error::Error>> {
        match op {
            ShortcutOp::Rename { id, name } => {
                let edit = ShortcutEdit::rename(&name.join(" "))?;
                self.dispatch(Action::UpdateShortcut { id, edit });
            }
            ShortcutOp::Url { id, url } => {
                let edit = ShortcutEdit::relink(&url)?;
                self.dispatch(Action::UpdateShortcut { id, edit });
            }
            ShortcutOp::Rm { id } => self.dispatch(Action::RemoveShortcut { id }),
            ShortcutOp::Save { id, path } => {
                let state = self.store.snapshot();
                let shortcut = state
                    .shortcut(id)
                    .filter(|s| s.kind == ShortcutKind::Document)
                    .ok_or_else(|| ValidationError::InvalidValue {
                        field: "shortcut",
                        message: format!("no document shortcut with id {id}"),
                    })?;
                attachment::save_data_url(&shortcut.content, &path)?;
                println!("Saved {} to {}.", shortcut.name, path.display());
            }
        }
        Ok(())
    }

    fn request_quest(&mut self) {
        if self.board.is_generating() {
            println!("A quest is already being generated.");
            return;
        }
        println!("Consulting the quest giver...");
        let board = self.board.clone();
        self.pending.push(tokio::spawn(async move {
            match board.request_quest().await {
                QuestRequest::Delivered(quest) => println!(
                    "New quest #{}: {} (+{} coins)",
                    quest.id, quest.text, quest.reward
                ),
                QuestRequest::InFlight => println!("A quest is already being generated."),
                QuestRequest::Unaffordable { cost, balance } => {
                    println!("A quest costs {cost} coins; you have {balance}.");
                }
            }
        }));
    }

    fn invest(&mut self, company: String) {
        if self.desk.is_researching() {
            println!("Market research is already in progress.");
            return;
        }
        let desk = self.desk.clone();
        self.pending.push(tokio::spawn(async move {
            match desk.invest(&company).await {
                Investment::Completed {
                    company,
                    shares,
                    news,
                } => {
                    println!("Bought a share of {}: {shares} owned.", company.name);
                    println!("News: {news}");
                }
                Investment::UnknownCompany(id) => {
                    println!("Unknown company '{id}'. Try pixel_power, code_crafters or pomo_pro.");
                }
                Investment::InFlight => println!("Market research is already in progress."),
                Investment::Unaffordable { cost, balance } => {
                    println!("That share costs {cost} coins; you have {balance}.");
                }
            }
        }));
    }

    /// Let background requests finish before leaving.
    async fn finish(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "background request failed");
            }
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut game = Game::new(&config, journal::default_dir()?);
    println!("Pomoquest. Type `help` for commands, `quit` to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => game.tick(),
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match game.handle(&line) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("error: {e}"),
                }
            }
        }
    }

    game.finish().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        let mut config = Config::default();
        config.provider.keyring = false;
        config.provider.api_key = None;
        Game::new(&config, std::env::temp_dir())
    }

    #[test]
    fn lines_parse_as_commands() {
        assert!(matches!(
            PlayLine::try_parse_from(["task", "add", "write", "tests"]).map(|l| l.command),
            Ok(PlayCommand::Task { op: TaskOp::Add { text } }) if text == ["write", "tests"]
        ));
        assert!(PlayLine::try_parse_from(["dance"]).is_err());
    }

    #[tokio::test]
    async fn start_enters_work_and_runs() {
        let mut game = game();
        assert_eq!(game.handle("start").unwrap(), Flow::Continue);
        assert_eq!(game.store.snapshot().session.phase, pomoquest_core::Phase::Work);
        assert!(game.countdown.is_running());

        game.handle("duration 25").unwrap();
        assert_eq!(game.store.snapshot().session.work_duration_secs, 900);

        game.handle("pause").unwrap();
        game.handle("duration 25").unwrap();
        assert_eq!(game.store.snapshot().session.work_duration_secs, 1500);
        assert!(!game.countdown.is_running());
        assert_eq!(game.countdown.display(), "25:00");
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let mut game = game();
        assert_eq!(game.handle("  ").unwrap(), Flow::Continue);
        assert_eq!(game.handle("quit").unwrap(), Flow::Quit);
    }

    #[tokio::test]
    async fn invalid_input_is_an_error() {
        let mut game = game();
        assert!(game.handle("link add Docs not-a-url").is_err());
        assert!(game.store.snapshot().shortcuts.is_empty());
    }
}
