//! Text output for the interactive session.

use pomoquest_core::session::Countdown;
use pomoquest_core::{market, Event, ShortcutKind, Snapshot, Theme, COMPANIES};

pub fn event_line(event: &Event) -> Option<String> {
    let line = match event {
        Event::PhaseStarted { phase } => phase.status_message().to_string(),
        Event::SessionCompleted {
            sessions_completed,
            coins_earned,
            break_duration_secs,
        } => format!(
            "Session {sessions_completed} complete: +{coins_earned} coins. Break: {} min.",
            break_duration_secs / 60
        ),
        Event::SessionReset { .. } => "Timer reset.".into(),
        Event::WorkDurationChanged {
            work_duration_secs, ..
        } => format!("Work sessions now last {} min.", work_duration_secs / 60),
        Event::TaskAdded { id } => format!("Task #{id} added."),
        Event::TaskToggled { id, completed, .. } => {
            if *completed {
                format!("Task #{id} done.")
            } else {
                format!("Task #{id} reopened.")
            }
        }
        Event::TaskBonusAwarded { bonus, balance } => {
            format!("Task goal reached! +{bonus} coins ({balance} total).")
        }
        Event::TaskRemoved { id } => format!("Task #{id} removed."),
        Event::TaskRewardThresholdChanged { threshold } => {
            format!("Task goal set to {threshold}.")
        }
        Event::QuestCharged { cost, balance } => {
            format!("Paid {cost} coins for a quest ({balance} left).")
        }
        Event::QuestCompleted {
            id,
            reward,
            balance,
        } => format!("Quest #{id} complete: +{reward} coins ({balance} total)."),
        Event::ThemeChanged { theme } => format!("Theme: {}.", theme_label(*theme)),
        Event::Invested {
            company_id,
            shares,
            balance,
        } => {
            let name = market::company(company_id).map_or(company_id.as_str(), |c| c.name);
            format!("Bought a share of {name}: {shares} owned ({balance} coins left).")
        }
        Event::ShortcutAdded { id } => format!("Shortcut #{id} added."),
        Event::ShortcutUpdated { id } => format!("Shortcut #{id} updated."),
        Event::ShortcutRemoved { id } => format!("Shortcut #{id} removed."),
        Event::Rejected { action, reason } => format!("Refused ({action}): {reason}."),
        Event::CoinsEarned { .. } | Event::CoinsSpent { .. } | Event::QuestAdded { .. } => {
            return None
        }
    };
    Some(line)
}

pub fn print_events(events: &[Event]) {
    for line in events.iter().filter_map(event_line) {
        println!("{line}");
    }
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

pub fn status(state: &Snapshot, countdown: &Countdown) -> String {
    let mut out = String::new();
    let session = &state.session;
    let running = if countdown.is_running() { "running" } else { "paused" };
    out.push_str(&format!(
        "{} {} [{running}]  sessions: {}\n",
        session.phase.status_message(),
        countdown.display(),
        session.sessions_completed
    ));
    out.push_str(&format!(
        "Coins: {}  Task goal: {}/{}  Theme: {}\n",
        state.coins,
        state.task_reward_progress,
        state.task_reward_threshold,
        theme_label(state.theme)
    ));

    if !state.tasks.is_empty() {
        out.push_str("Tasks:\n");
        for task in &state.tasks {
            let mark = if task.completed { 'x' } else { ' ' };
            out.push_str(&format!("  [{mark}] #{} {}\n", task.id, task.text));
        }
    }
    if !state.quests.is_empty() {
        out.push_str("Quests:\n");
        for quest in &state.quests {
            out.push_str(&format!("  #{} {} (+{})\n", quest.id, quest.text, quest.reward));
        }
    }
    if !state.shortcuts.is_empty() {
        out.push_str("Shortcuts:\n");
        for shortcut in &state.shortcuts {
            match shortcut.kind {
                ShortcutKind::Link => out.push_str(&format!(
                    "  #{} {} -> {}\n",
                    shortcut.id, shortcut.name, shortcut.content
                )),
                ShortcutKind::Document => {
                    out.push_str(&format!("  #{} {} (document)\n", shortcut.id, shortcut.name))
                }
            }
        }
    }

    out.push_str("Market:\n");
    for company in COMPANIES {
        out.push_str(&format!(
            "  {:<14} {:>3} coins  owned: {}\n",
            company.id,
            company.cost,
            state.shares(company.id)
        ));
    }
    out
}
