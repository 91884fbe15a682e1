use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(not(feature = "hydrate"))]
use futures::executor::block_on;

use super::*;
#[cfg(not(feature = "hydrate"))]
use crate::config::{CHIP_BUSY_LABEL, TRANSPORT_ERROR_TEXT};
use crate::state::chat::Role;

fn controller() -> ChatController {
    ChatController::new(WidgetConfig::default())
}

/// Install the futures executor behind `spawn_local`. Tests share one
/// process-wide executor, so later calls find it already set.
#[cfg(not(feature = "hydrate"))]
fn init_executor() {
    let _ = any_spawner::Executor::init_futures_executor();
}

/// Run spawned exchanges on this thread until none can make progress.
#[cfg(not(feature = "hydrate"))]
fn settle() {
    any_spawner::Executor::poll_local();
}

fn with_chips(c: ChatController, queries: &[&str]) {
    c.state().update(|s| {
        s.chips = queries
            .iter()
            .map(|q| Chip { label: format!("Ask {q}"), action_query: (*q).to_owned(), busy: false })
            .collect();
    });
}

// =============================================================
// run_exchange
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn failed_request_settles_as_failed_outcome() {
    let outcome = block_on(run_exchange("/chat", "hello", 6));
    assert_eq!(outcome, Outcome::Failed);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn failed_exchange_releases_the_gate() {
    let mut state = ChatState::default();
    let exchange = state.try_begin("hello").expect("accepted");
    let outcome = block_on(run_exchange("/chat", &exchange.message, 6));
    assert!(state.finish(&exchange, outcome));
    assert!(!state.is_busy());
    assert_eq!(state.messages[1].text, TRANSPORT_ERROR_TEXT);
    assert_eq!(state.messages[1].role, Role::Error);
    assert!(state.try_begin("retry by hand").is_some());
}

// =============================================================
// ChatController: accepted sends
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn accepted_send_settles_to_one_user_and_one_error_entry() {
    init_executor();
    let c = controller();
    c.send_message("hi");
    assert!(c.is_busy());
    assert_eq!(c.state().with_untracked(|s| s.messages.len()), 2);

    settle();

    assert!(!c.is_busy());
    c.state().with_untracked(|s| {
        assert_eq!(s.messages.len(), 2);
        assert_eq!(s.messages[0].role, Role::User);
        assert_eq!(s.messages[0].text, "hi");
        assert_eq!(s.messages[1].role, Role::Error);
        assert_eq!(s.messages[1].text, TRANSPORT_ERROR_TEXT);
        assert!(!s.messages[1].pending);
    });
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn widget_accepts_the_next_send_after_settling() {
    init_executor();
    let c = controller();
    c.send_message("first");
    settle();
    c.send_message("second");
    settle();
    assert!(!c.is_busy());
    assert_eq!(c.state().with_untracked(|s| s.messages.len()), 4);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn submit_draft_clears_input_and_sends() {
    init_executor();
    let c = controller();
    c.state().update(|s| s.draft = "  typed question ".to_owned());
    c.submit_draft();
    assert_eq!(c.state().with_untracked(|s| s.draft.clone()), "");
    settle();
    c.state().with_untracked(|s| {
        assert_eq!(s.messages[0].text, "typed question");
        assert_eq!(s.messages.len(), 2);
    });
    assert!(!c.is_busy());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn chip_exchange_shows_busy_label_then_replaces_the_strip() {
    init_executor();
    let c = controller();
    with_chips(c, &["gpus", "ssds"]);

    c.activate_chip(1);
    assert!(c.is_busy());
    c.state().with_untracked(|s| {
        assert_eq!(s.messages[0].text, "ssds");
        assert_eq!(s.chips.len(), 2);
        assert_eq!(s.chips[1].display_label(), CHIP_BUSY_LABEL);
        assert_eq!(s.chips[0].display_label(), "Ask gpus");
    });

    settle();

    assert!(!c.is_busy());
    c.state().with_untracked(|s| {
        assert!(s.chips.is_empty(), "failed exchange leaves no chips");
        assert_eq!(s.messages.len(), 2);
        assert_eq!(s.messages[1].role, Role::Error);
    });
}

// =============================================================
// ChatController: rejected sends
// =============================================================

#[test]
fn controller_starts_idle_with_given_config() {
    let c = ChatController::new(WidgetConfig::with_endpoint("/api/chat"));
    assert!(!c.is_busy());
    assert_eq!(c.config().endpoint, "/api/chat");
}

#[test]
fn blank_send_is_ignored() {
    let c = controller();
    c.send_message("   ");
    assert!(c.state().with_untracked(|s| s.messages.is_empty()));
    assert!(!c.is_busy());
}

#[test]
fn send_while_busy_leaves_transcript_unchanged() {
    let c = controller();
    c.state().update(|s| {
        s.try_begin("first");
    });
    let before = c.state().with_untracked(|s| s.messages.len());
    c.send_message("second");
    assert_eq!(c.state().with_untracked(|s| s.messages.len()), before);
    assert!(c.is_busy());
}

#[test]
fn submit_while_busy_keeps_the_draft() {
    let c = controller();
    c.state().update(|s| {
        s.try_begin("first");
        s.draft = "next".to_owned();
    });
    c.submit_draft();
    assert_eq!(c.state().with_untracked(|s| s.draft.clone()), "next");
}

#[test]
fn chip_click_while_busy_is_dropped() {
    let c = controller();
    c.state().update(|s| {
        s.try_begin("first");
    });
    c.activate_chip(0);
    assert_eq!(c.state().with_untracked(|s| s.messages.len()), 2);
}

#[test]
fn set_example_does_not_send() {
    let c = controller();
    c.set_example("Compare PCIe and SATA");
    c.state().with_untracked(|s| {
        assert_eq!(s.draft, "Compare PCIe and SATA");
        assert_eq!(s.focus_seq, 1);
        assert!(s.messages.is_empty());
    });
    assert!(!c.is_busy());
}

// =============================================================
// Memoized views
// =============================================================

#[test]
fn typing_does_not_rerun_chip_readers() {
    let c = controller();
    let chips = c.chips();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let rendered = Memo::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        chips.with(Vec::len)
    });

    assert_eq!(rendered.get_untracked(), 0);
    c.state().update(|s| s.draft = "typing".to_owned());
    assert_eq!(rendered.get_untracked(), 0);
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    with_chips(c, &["gpus"]);
    assert_eq!(rendered.get_untracked(), 1);
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn typing_does_not_rerun_transcript_readers() {
    let c = controller();
    let messages = c.messages();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let rendered = Memo::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        messages.with(Vec::len)
    });

    assert_eq!(rendered.get_untracked(), 0);
    c.state().update(|s| s.draft = "typing".to_owned());
    c.set_example("example");
    assert_eq!(rendered.get_untracked(), 0);
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    c.state().update(|s| {
        s.try_begin("hello");
    });
    assert_eq!(rendered.get_untracked(), 2);
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn focus_requests_change_only_on_set_example() {
    let c = controller();
    let focus = c.focus_requests();
    assert_eq!(focus.get_untracked(), 0);
    c.state().update(|s| s.draft = "typing".to_owned());
    assert_eq!(focus.get_untracked(), 0);
    c.set_example("example");
    assert_eq!(focus.get_untracked(), 1);
    assert!(!c.busy().get_untracked());
}
