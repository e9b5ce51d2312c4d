//! End-to-end tests for a mounted swipe session.
//!
//! These drive the session through the mock deck with a file-backed store,
//! the way the discovery screen does across app restarts.

use std::sync::Arc;
use std::time::Duration;

use profile_loader::{mock, Candidate};
use session::*;
use swipe::{AdvanceOutcome, AnimationOutcome, DeckState, GestureVector, SwipeAction};
use tempfile::TempDir;

fn mount_file_backed(dir: &TempDir) -> (SwipeSession, Arc<RecordingNavigator>) {
    let store = Arc::new(JsonFileStore::new(dir.path().join("state.json")));
    let navigator = Arc::new(RecordingNavigator::new());
    let session = SwipeSession::mount(
        mock::mock_candidates(),
        SessionConfig::default(),
        store,
        navigator.clone(),
    )
    .unwrap();
    (session, navigator)
}

#[tokio::test(start_paused = true)]
async fn test_like_skip_connect_through_three_cards() {
    let candidates = vec![
        Candidate::new(1, "A", "first"),
        Candidate::new(2, "B", "second"),
        Candidate::new(3, "C", "third"),
    ];
    let navigator = Arc::new(RecordingNavigator::new());
    let mut session = SwipeSession::mount(
        candidates,
        SessionConfig::default(),
        Arc::new(MemoryStore::new()),
        navigator.clone(),
    )
    .unwrap();

    let outcomes = [
        session.swipe(GestureVector::new(150.0, 0.0)).await,
        session.swipe(GestureVector::new(-150.0, 0.0)).await,
        session.swipe(GestureVector::new(0.0, -150.0)).await,
    ];

    assert_eq!(
        outcomes,
        [
            SwipeOutcome::Swiped {
                action: SwipeAction::Like,
                candidate_id: 1,
                advance: AdvanceOutcome::Advanced(1),
            },
            SwipeOutcome::Swiped {
                action: SwipeAction::Skip,
                candidate_id: 2,
                advance: AdvanceOutcome::Advanced(2),
            },
            SwipeOutcome::Swiped {
                action: SwipeAction::Connect,
                candidate_id: 3,
                advance: AdvanceOutcome::ReachedEnd,
            },
        ]
    );
    assert_eq!(session.state(), DeckState::Exhausted);
    assert_eq!(session.deck().cursor(), 3);
    assert_eq!(navigator.routes(), vec!["/dashboard/chats/3"]);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_before_host_completion_discards_it() {
    let dir = TempDir::new().unwrap();
    let (mut session, navigator) = mount_file_backed(&dir);

    let Release::Exit(ticket) = session.release(GestureVector::new(0.0, -220.0)) else {
        panic!("expected an exit");
    };

    // Host-driven animation: the screen goes away before it finishes
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.teardown();
    let completion = AnimationCompletion {
        ticket,
        outcome: AnimationOutcome::Completed,
    };

    assert_eq!(session.complete(completion), SwipeOutcome::Discarded);
    assert_eq!(session.state(), DeckState::Active(0));
    assert!(navigator.intents().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_during_played_exit_is_discarded() {
    let dir = TempDir::new().unwrap();
    let (mut session, navigator) = mount_file_backed(&dir);
    let mount = session.mount_token();

    let Release::Exit(ticket) = session.release(GestureVector::new(160.0, 0.0)) else {
        panic!("expected an exit");
    };

    // The screen is torn down while the exit animation is still running
    let (completion, _) = tokio::join!(session.play_exit(ticket), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        mount.tear_down();
    });

    assert_eq!(completion.outcome, AnimationOutcome::Interrupted);
    let pose = session.pose();
    assert!(pose.x > 160.0 && pose.x < 500.0, "pose = {pose:?}");

    assert_eq!(session.complete(completion), SwipeOutcome::Discarded);
    assert!(!session.is_mounted());
    assert_eq!(session.state(), DeckState::Active(0));
    assert!(session.drain_feedback().is_empty());
    assert!(navigator.intents().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_played_exit_feeds_completion() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = mount_file_backed(&dir);

    let Release::Exit(ticket) = session.release(GestureVector::new(-130.0, 10.0)) else {
        panic!("expected an exit");
    };
    let completion = session.play_exit(ticket).await;
    assert!(completion.outcome.is_completed());
    assert_eq!(session.pose().opacity, 0.0);

    assert!(matches!(
        session.complete(completion),
        SwipeOutcome::Swiped { action: SwipeAction::Skip, candidate_id: 1, .. }
    ));
    assert_eq!(session.current().map(|c| c.name.as_str()), Some("Sarah Chen"));
}

#[tokio::test(start_paused = true)]
async fn test_favorites_survive_remount() {
    let dir = TempDir::new().unwrap();

    {
        let (mut session, _) = mount_file_backed(&dir);
        session.toggle_favorite(4);
        session.toggle_favorite(2);
        session.toggle_favorite(5);
        session.toggle_favorite(4);
        session.teardown();
    }

    let (session, _) = mount_file_backed(&dir);
    assert_eq!(session.favorites().all(), &[2, 5]);

    let stored = JsonFileStore::new(dir.path().join("state.json")).load().unwrap();
    assert_eq!(stored.favorites, vec![2, 5]);
    assert!(stored.profile.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_message_and_profile_intents() {
    let dir = TempDir::new().unwrap();
    let (mut session, navigator) = mount_file_backed(&dir);

    session.message(3);
    session.view_profile(2);
    assert_eq!(navigator.routes(), vec!["/dashboard/chats/3", "/profile/2"]);

    session.teardown();
    session.message(1);
    assert_eq!(navigator.intents().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_drag_hints_follow_threshold() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = mount_file_backed(&dir);

    assert_eq!(session.drag(GestureVector::new(30.0, 0.0)), None);
    assert_eq!(session.drag(GestureVector::new(60.0, 0.0)), Some(SwipeAction::Like));
    assert_eq!(session.drag(GestureVector::new(0.0, -75.0)), Some(SwipeAction::Connect));
    assert_eq!(session.pose().y, -75.0);

    // A hint is not a decision
    assert_eq!(session.swipe(GestureVector::new(60.0, 0.0)).await, SwipeOutcome::Reset);
    assert_eq!(session.state(), DeckState::Active(0));
}
