//! End-to-end game flows through the store.
//!
//! Everything here runs offline: quests and news come from the built-in
//! tables.

use std::sync::Arc;

use pomoquest_core::action::Action;
use pomoquest_core::provider::{ContentProvider, Generative};
use pomoquest_core::session::{follow_up, start_actions, Countdown};
use pomoquest_core::{
    Event, Investment, InvestmentDesk, Phase, QuestBoard, QuestRequest, Snapshot, Store,
};

fn offline() -> Arc<dyn ContentProvider> {
    Arc::new(Generative::offline())
}

/// Test: a full pomodoro cycle pays coins and chains into a break.
#[test]
fn test_work_cycle_pays_and_chains_break() {
    let store = Store::default();
    store.dispatch(Action::work_minutes(25).unwrap());
    store.dispatch_all(start_actions(&store.snapshot().session));
    assert_eq!(store.snapshot().session.phase, Phase::Work);

    let countdown = Countdown::new(&store.snapshot().session);
    assert_eq!(countdown.display(), "25:00");

    let events = store.dispatch_all(follow_up(&store.snapshot().session, Phase::Work, 4));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::SessionCompleted {
            sessions_completed: 1,
            coins_earned: 25,
            break_duration_secs: 300,
        }
    )));

    let state = store.snapshot();
    assert_eq!(state.coins, 75);
    assert_eq!(state.session.phase, Phase::ShortBreak);
    assert_eq!(Countdown::new(&state.session).display(), "05:00");
}

/// Test: the fourth completed session earns a long break.
#[test]
fn test_fourth_session_gets_long_break() {
    let store = Store::default();
    for round in 1..=4 {
        store.dispatch(Action::StartPhase { phase: Phase::Work });
        store.dispatch_all(follow_up(&store.snapshot().session, Phase::Work, 4));
        let phase = store.snapshot().session.phase;
        if round == 4 {
            assert_eq!(phase, Phase::LongBreak);
        } else {
            assert_eq!(phase, Phase::ShortBreak);
        }
        store.dispatch_all(follow_up(&store.snapshot().session, phase, 4));
        assert_eq!(store.snapshot().session.phase, Phase::Work);
    }
    assert_eq!(store.snapshot().session.sessions_completed, 4);
}

/// Test: completing five tasks pays the bonus once and raises the goal.
#[test]
fn test_task_goal_bonus() {
    let store = Store::default();
    let mut ids = Vec::new();
    for i in 0..5 {
        let action = Action::task_from_input(&format!("task {i}")).unwrap();
        if let Action::AddTask { task } = &action {
            ids.push(task.id);
        }
        store.dispatch(action);
    }

    let mut bonuses = 0;
    for id in &ids {
        bonuses += store
            .dispatch(Action::ToggleTask { id: *id })
            .iter()
            .filter(|e| matches!(e, Event::TaskBonusAwarded { .. }))
            .count();
    }

    let state = store.snapshot();
    assert_eq!(bonuses, 1);
    assert_eq!(state.coins, 60);
    assert_eq!(state.task_reward_progress, 0);
    assert_eq!(state.task_reward_threshold, 10);
}

/// Test: a quest is bought, then completed for its reward.
#[tokio::test]
async fn test_quest_purchase_and_completion() {
    let store = Arc::new(Store::default());
    let board = QuestBoard::new(store.clone(), offline(), 10);

    let QuestRequest::Delivered(quest) = board.request_quest().await else {
        panic!("Expected a delivered quest");
    };
    assert_eq!(store.snapshot().coins, 40);

    let events = board.complete(quest.id);
    assert!(matches!(events[0], Event::QuestCompleted { .. }));
    assert_eq!(store.snapshot().coins, 40 + u64::from(quest.reward));

    // Completing again is a no-op.
    let before = store.snapshot();
    let events = board.complete(quest.id);
    assert!(events[0].is_rejection());
    assert_eq!(store.snapshot(), before);
}

/// Test: quest charges stop once the balance runs out.
#[tokio::test]
async fn test_quests_until_broke() {
    let store = Arc::new(Store::new(Snapshot {
        coins: 25,
        ..Snapshot::default()
    }));
    let board = QuestBoard::new(store.clone(), offline(), 10);

    assert!(matches!(board.request_quest().await, QuestRequest::Delivered(_)));
    assert!(matches!(board.request_quest().await, QuestRequest::Delivered(_)));
    assert_eq!(
        board.request_quest().await,
        QuestRequest::Unaffordable { cost: 10, balance: 5 }
    );
    let state = store.snapshot();
    assert_eq!(state.coins, 5);
    assert_eq!(state.quests.len(), 2);
}

/// Test: investing accumulates shares per company.
#[tokio::test]
async fn test_invest_accumulates_shares() {
    let store = Arc::new(Store::new(Snapshot {
        coins: 200,
        ..Snapshot::default()
    }));
    let desk = InvestmentDesk::new(store.clone(), offline());

    for expected in 1..=2 {
        let Investment::Completed { shares, news, .. } = desk.invest("pixel_power").await else {
            panic!("Expected a completed investment");
        };
        assert_eq!(shares, expected);
        assert!(!news.is_empty());
    }
    assert!(matches!(
        desk.invest("pomo_pro").await,
        Investment::Completed { shares: 1, .. }
    ));

    let state = store.snapshot();
    assert_eq!(state.coins, 0);
    assert_eq!(state.shares("pixel_power"), 2);
    assert_eq!(state.shares("pomo_pro"), 1);
    assert_eq!(
        desk.invest("code_crafters").await,
        Investment::Unaffordable { cost: 75, balance: 0 }
    );
}

/// Test: shortcuts can be added, edited and removed.
#[test]
fn test_shortcut_lifecycle() {
    let store = Store::default();
    let link = Action::link_from_input("Docs", "https://docs.rs").unwrap();
    let Action::AddShortcut { shortcut } = &link else {
        panic!("Expected AddShortcut");
    };
    let link_id = shortcut.id;
    store.dispatch(link);

    let doc = Action::document_from_input("Notes", "data:text/plain;base64,aGk=".into()).unwrap();
    let Action::AddShortcut { shortcut } = &doc else {
        panic!("Expected AddShortcut");
    };
    let doc_id = shortcut.id;
    store.dispatch(doc);

    let relink = pomoquest_core::ShortcutEdit::relink("https://crates.io").unwrap();
    store.dispatch(Action::UpdateShortcut {
        id: link_id,
        edit: relink.clone(),
    });
    assert_eq!(
        store.snapshot().shortcut(link_id).map(|s| s.content.as_str()),
        Some("https://crates.io")
    );

    let before = store.snapshot();
    let events = store.dispatch(Action::UpdateShortcut {
        id: doc_id,
        edit: relink,
    });
    assert!(events[0].is_rejection());
    assert_eq!(store.snapshot(), before);

    store.dispatch(Action::RemoveShortcut { id: link_id });
    let state = store.snapshot();
    assert_eq!(state.shortcuts.len(), 1);
    assert_eq!(state.shortcuts[0].id, doc_id);
}
