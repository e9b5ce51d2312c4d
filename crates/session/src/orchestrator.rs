//! # Swipe Session
//!
//! Coordinates one mounted discovery screen:
//! 1. Classify a released drag into an action
//! 2. Hand out an exit ticket and play the exit animation
//! 3. On completion of the current ticket, emit feedback and advance the deck once
//! 4. Bring the next card in
//!
//! ## Two-phase protocol
//!
//! `release` and `complete` are separate calls so a host can run the
//! animation however it likes. Only one exit can be in flight; releases
//! during that window are ignored. Completions are matched against the
//! in-flight ticket, and anything arriving after `teardown` or for an
//! older ticket is discarded without touching the deck.
//!
//! `swipe` runs both phases back to back with the built-in [`CardAnimator`].

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use profile_loader::{Candidate, CandidateId};
use swipe::{
    AdvanceOutcome, AnimationOutcome, CardAnimator, CardPose, Deck, DeckError, DeckState,
    FavoriteSet, GestureClassifier, GestureVector, MountToken, NavDirection, SwipeAction,
};

use crate::config::SessionConfig;
use crate::feedback::Feedback;
use crate::navigation::{NavigationIntent, Navigator};
use crate::store::{PersistFavorites, ProfileStore};

/// Proof that an exit animation was started for a specific card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitTicket {
    pub generation: u64,
    pub action: SwipeAction,
    pub candidate_id: CandidateId,
}

/// Why a release or completion did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another exit animation has not completed yet
    AnimationInFlight,
    DeckExhausted,
    Unmounted,
}

/// Result of phase one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Play the exit animation, then call `complete` with this ticket
    Exit(ExitTicket),
    /// Below threshold; spring the card back, the deck does not move
    Reset,
    Ignored(IgnoreReason),
}

/// Report from the host that an exit animation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCompletion {
    pub ticket: ExitTicket,
    pub outcome: AnimationOutcome,
}

impl AnimationCompletion {
    pub fn completed(ticket: ExitTicket) -> Self {
        Self {
            ticket,
            outcome: AnimationOutcome::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The card left and the deck advanced exactly once
    Swiped {
        action: SwipeAction,
        candidate_id: CandidateId,
        advance: AdvanceOutcome,
    },
    /// Cancelled drag; the card returned to rest
    Reset,
    Ignored(IgnoreReason),
    /// Stale or post-teardown completion; nothing changed
    Discarded,
}

pub struct SwipeSession {
    config: SessionConfig,
    classifier: GestureClassifier,
    deck: Deck,
    favorites: FavoriteSet,
    animator: CardAnimator,
    mount: MountToken,
    navigator: Arc<dyn Navigator>,
    generation: u64,
    in_flight: Option<ExitTicket>,
    feedback: Vec<Feedback>,
}

impl SwipeSession {
    /// Mount a session over `candidates`.
    ///
    /// Favorites are loaded from `store` once, here; every later toggle is
    /// written back to it.
    pub fn mount(
        candidates: Vec<Candidate>,
        config: SessionConfig,
        store: Arc<dyn ProfileStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let stored = store.load().context("Failed to load stored state")?;
        let favorites =
            FavoriteSet::from_ids(stored.favorites).with_observer(PersistFavorites::new(store));

        let mount = MountToken::new();
        let animator = CardAnimator::new(config.animation, mount.clone());

        info!(
            "Mounted swipe session: {} candidates, {} favorites",
            candidates.len(),
            favorites.len()
        );

        Ok(Self {
            classifier: GestureClassifier::new(config.swipe),
            config,
            deck: Deck::new(candidates),
            favorites,
            animator,
            mount,
            navigator,
            generation: 0,
            in_flight: None,
            feedback: Vec::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn state(&self) -> DeckState {
        self.deck.state()
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.deck.current()
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn pose(&self) -> CardPose {
        self.animator.pose()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    /// Handle for deferred work that must stop once the session is torn down
    pub fn mount_token(&self) -> MountToken {
        self.mount.clone()
    }

    pub fn in_flight(&self) -> Option<ExitTicket> {
        self.in_flight
    }

    /// Which indicator to show while the card is held at `vector`
    pub fn drag(&mut self, vector: GestureVector) -> Option<SwipeAction> {
        self.animator.drag_to(vector);
        self.classifier.hint(vector)
    }

    /// Toasts produced since the last call, oldest first
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }

    // ------------------------------------------------------------------
    // Two-phase gesture protocol
    // ------------------------------------------------------------------

    /// Phase one: classify a released drag
    #[instrument(skip(self), fields(cursor = self.deck.cursor()))]
    pub fn release(&mut self, vector: GestureVector) -> Release {
        if let Some(reason) = self.ignore_reason() {
            debug!("Release ignored: {:?}", reason);
            return Release::Ignored(reason);
        }

        self.animator.drag_to(vector);
        match self.classifier.classify(vector) {
            SwipeAction::Cancel => Release::Reset,
            action => self.begin_exit(action),
        }
    }

    /// Phase two: apply a finished exit animation
    #[instrument(skip(self), fields(generation = completion.ticket.generation))]
    pub fn complete(&mut self, completion: AnimationCompletion) -> SwipeOutcome {
        if !self.mount.is_mounted() {
            debug!("Completion after teardown discarded");
            return SwipeOutcome::Discarded;
        }
        if self.in_flight != Some(completion.ticket) {
            debug!("Stale completion discarded (in flight: {:?})", self.in_flight);
            return SwipeOutcome::Discarded;
        }
        self.in_flight = None;

        if !completion.outcome.is_completed() {
            debug!("Exit animation interrupted, deck unchanged");
            return SwipeOutcome::Discarded;
        }

        let ExitTicket {
            action,
            candidate_id,
            ..
        } = completion.ticket;

        if let Some(feedback) = self
            .deck
            .current()
            .and_then(|c| Feedback::for_swipe(action, &c.name))
        {
            self.feedback.push(feedback);
        }

        if action == SwipeAction::Connect {
            self.navigator.navigate(NavigationIntent::Chat(candidate_id));
            if self.config.connect_adds_favorite {
                self.favorites.insert(candidate_id);
            }
        }

        let advance = self.deck.advance();
        if advance.is_exhausted() {
            self.feedback.push(Feedback::deck_exhausted());
        }
        info!("{} candidate {} -> {:?}", action, candidate_id, advance);

        SwipeOutcome::Swiped {
            action,
            candidate_id,
            advance,
        }
    }

    /// Play the exit animation for `ticket` on the built-in animator
    pub async fn play_exit(&mut self, ticket: ExitTicket) -> AnimationCompletion {
        let outcome = self.animator.animate_exit(ticket.action).await;
        AnimationCompletion { ticket, outcome }
    }

    /// Release, animate and complete in one go
    pub async fn swipe(&mut self, vector: GestureVector) -> SwipeOutcome {
        match self.release(vector) {
            Release::Ignored(reason) => SwipeOutcome::Ignored(reason),
            Release::Reset => {
                self.animator.reset_position().await;
                SwipeOutcome::Reset
            }
            Release::Exit(ticket) => self.finish_exit(ticket).await,
        }
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// Same as an upward swipe past the threshold
    pub async fn send_connection_request(&mut self) -> SwipeOutcome {
        if let Some(reason) = self.ignore_reason() {
            return SwipeOutcome::Ignored(reason);
        }
        match self.begin_exit(SwipeAction::Connect) {
            Release::Exit(ticket) => self.finish_exit(ticket).await,
            Release::Ignored(reason) => SwipeOutcome::Ignored(reason),
            Release::Reset => SwipeOutcome::Reset,
        }
    }

    /// Move to the next card without a swipe.
    ///
    /// Returns `None` when unmounted.
    #[instrument(skip(self))]
    pub async fn next(&mut self) -> Option<AdvanceOutcome> {
        if !self.mount.is_mounted() {
            return None;
        }
        self.cancel_in_flight();

        let advance = self.deck.advance();
        if advance.is_exhausted() {
            self.feedback.push(Feedback::deck_exhausted());
        } else {
            self.animator.animate_entry(NavDirection::Forward).await;
        }
        Some(advance)
    }

    /// Explicit back navigation. Returns the new cursor when it moved.
    #[instrument(skip(self))]
    pub async fn previous(&mut self) -> Option<usize> {
        if !self.mount.is_mounted() {
            return None;
        }
        self.cancel_in_flight();

        let cursor = self.deck.retreat()?;
        self.animator.animate_entry(NavDirection::Backward).await;
        Some(cursor)
    }

    /// Jump to `index`; out-of-range indices leave the deck where it was.
    ///
    /// After teardown the cursor is left alone and returned unchanged.
    #[instrument(skip(self))]
    pub async fn jump_to(&mut self, index: i64) -> Result<usize, DeckError> {
        let before = self.deck.cursor();
        if !self.mount.is_mounted() {
            debug!("jump_to({}) after teardown ignored", index);
            return Ok(before);
        }
        let cursor = self.deck.jump_to(index)?;
        if cursor != before {
            self.cancel_in_flight();
            let direction = self.deck.last_direction().unwrap_or(NavDirection::Forward);
            self.animator.animate_entry(direction).await;
        }
        Ok(cursor)
    }

    /// Open the chat with `id`
    pub fn message(&self, id: CandidateId) {
        if self.mount.is_mounted() {
            self.navigator.navigate(NavigationIntent::Chat(id));
        }
    }

    /// Open the full profile of `id`
    pub fn view_profile(&self, id: CandidateId) {
        if self.mount.is_mounted() {
            self.navigator.navigate(NavigationIntent::Profile(id));
        }
    }

    /// Flip favorite membership; returns the new state, `None` when unmounted
    #[instrument(skip(self))]
    pub fn toggle_favorite(&mut self, id: CandidateId) -> Option<bool> {
        if !self.mount.is_mounted() {
            return None;
        }
        let added = self.favorites.toggle(id);

        let name = self
            .deck
            .candidates()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Candidate {}", id));
        self.feedback.push(Feedback::favorite_toggled(&name, added));
        Some(added)
    }

    /// Load a fresh candidate list and go back to the first card.
    /// No-op after teardown.
    pub fn reset(&mut self, candidates: Vec<Candidate>) {
        if !self.mount.is_mounted() {
            debug!("reset after teardown ignored");
            return;
        }
        self.cancel_in_flight();
        self.deck.reset(candidates);
        self.animator.snap_to_rest();
        info!("Session reset with {} candidates", self.deck.len());
    }

    /// Unmount. Pending animations stop and later completions are discarded.
    pub fn teardown(&mut self) {
        self.mount.tear_down();
        info!("Swipe session torn down at cursor {}", self.deck.cursor());
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ignore_reason(&self) -> Option<IgnoreReason> {
        if !self.mount.is_mounted() {
            Some(IgnoreReason::Unmounted)
        } else if self.in_flight.is_some() {
            Some(IgnoreReason::AnimationInFlight)
        } else if self.deck.is_exhausted() {
            Some(IgnoreReason::DeckExhausted)
        } else {
            None
        }
    }

    fn begin_exit(&mut self, action: SwipeAction) -> Release {
        let Some(candidate_id) = self.deck.current_id() else {
            return Release::Ignored(IgnoreReason::DeckExhausted);
        };
        self.generation += 1;
        let ticket = ExitTicket {
            generation: self.generation,
            action,
            candidate_id,
        };
        self.in_flight = Some(ticket);
        debug!("Exit ticket {} issued for {} on {}", ticket.generation, action, candidate_id);
        Release::Exit(ticket)
    }

    async fn finish_exit(&mut self, ticket: ExitTicket) -> SwipeOutcome {
        let completion = self.play_exit(ticket).await;
        let outcome = self.complete(completion);
        if let SwipeOutcome::Swiped {
            advance: AdvanceOutcome::Advanced(_),
            ..
        } = outcome
        {
            self.animator.animate_entry(NavDirection::Forward).await;
        }
        outcome
    }

    /// Invalidate any outstanding ticket so its completion is discarded
    fn cancel_in_flight(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            debug!("Cancelled in-flight exit ticket {}", ticket.generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::store::MemoryStore;
    use std::time::Duration;
    use tokio::time::Instant;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new(1, "A", "first"),
            Candidate::new(2, "B", "second"),
            Candidate::new(3, "C", "third"),
        ]
    }

    fn mount_with(config: SessionConfig) -> (SwipeSession, Arc<RecordingNavigator>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let session =
            SwipeSession::mount(candidates(), config, store.clone(), navigator.clone()).unwrap();
        (session, navigator, store)
    }

    fn mount() -> (SwipeSession, Arc<RecordingNavigator>, Arc<MemoryStore>) {
        mount_with(SessionConfig::default())
    }

    fn exit_ticket(release: Release) -> ExitTicket {
        match release {
            Release::Exit(ticket) => ticket,
            other => panic!("expected an exit ticket, got {:?}", other),
        }
    }

    // ============================================================================
    // Two-phase protocol
    // ============================================================================

    #[test]
    fn test_release_then_complete_advances_once() {
        let (mut session, _, _) = mount();

        let ticket = exit_ticket(session.release(GestureVector::new(150.0, 0.0)));
        assert_eq!(ticket.action, SwipeAction::Like);
        assert_eq!(ticket.candidate_id, 1);
        // Deck does not move until the animation completes
        assert_eq!(session.state(), DeckState::Active(0));

        let outcome = session.complete(AnimationCompletion::completed(ticket));
        assert_eq!(
            outcome,
            SwipeOutcome::Swiped {
                action: SwipeAction::Like,
                candidate_id: 1,
                advance: AdvanceOutcome::Advanced(1),
            }
        );

        // Replaying the same completion is stale
        assert_eq!(
            session.complete(AnimationCompletion::completed(ticket)),
            SwipeOutcome::Discarded
        );
        assert_eq!(session.state(), DeckState::Active(1));
    }

    #[test]
    fn test_release_while_in_flight_is_ignored() {
        let (mut session, _, _) = mount();

        let ticket = exit_ticket(session.release(GestureVector::new(-150.0, 0.0)));
        assert_eq!(
            session.release(GestureVector::new(300.0, 0.0)),
            Release::Ignored(IgnoreReason::AnimationInFlight)
        );

        session.complete(AnimationCompletion::completed(ticket));
        assert_eq!(session.state(), DeckState::Active(1));
        assert!(session.in_flight().is_none());
    }

    #[test]
    fn test_cancel_release_has_no_ticket() {
        let (mut session, _, _) = mount();
        assert_eq!(session.release(GestureVector::new(100.0, 0.0)), Release::Reset);
        assert!(session.in_flight().is_none());
        assert_eq!(session.state(), DeckState::Active(0));
    }

    #[test]
    fn test_completion_after_teardown_is_discarded() {
        let (mut session, navigator, _) = mount();

        let ticket = exit_ticket(session.release(GestureVector::new(0.0, -150.0)));
        session.teardown();

        assert_eq!(
            session.complete(AnimationCompletion::completed(ticket)),
            SwipeOutcome::Discarded
        );
        assert_eq!(session.state(), DeckState::Active(0));
        assert!(navigator.intents().is_empty());
        assert!(session.drain_feedback().is_empty());
        assert_eq!(
            session.release(GestureVector::new(150.0, 0.0)),
            Release::Ignored(IgnoreReason::Unmounted)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_controls_after_teardown_leave_deck_alone() {
        let (mut session, _, _) = mount();
        session.teardown();

        assert_eq!(session.jump_to(2).await, Ok(0));
        assert_eq!(session.state(), DeckState::Active(0));

        session.reset(vec![Candidate::new(9, "Z", "other")]);
        assert_eq!(session.deck().len(), 3);
        assert_eq!(session.current().map(|c| c.id), Some(1));

        assert_eq!(session.next().await, None);
        assert_eq!(session.previous().await, None);
        assert_eq!(session.state(), DeckState::Active(0));
    }

    #[test]
    fn test_interrupted_animation_does_not_advance() {
        let (mut session, _, _) = mount();
        let ticket = exit_ticket(session.release(GestureVector::new(150.0, 0.0)));

        let outcome = session.complete(AnimationCompletion {
            ticket,
            outcome: AnimationOutcome::Interrupted,
        });
        assert_eq!(outcome, SwipeOutcome::Discarded);
        assert_eq!(session.state(), DeckState::Active(0));
        // The slot is free again
        assert!(matches!(session.release(GestureVector::new(150.0, 0.0)), Release::Exit(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_invalidates_ticket() {
        let (mut session, _, _) = mount();
        let ticket = exit_ticket(session.release(GestureVector::new(150.0, 0.0)));

        assert_eq!(session.next().await, Some(AdvanceOutcome::Advanced(1)));
        assert_eq!(
            session.complete(AnimationCompletion::completed(ticket)),
            SwipeOutcome::Discarded
        );
        assert_eq!(session.state(), DeckState::Active(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_swipe_plays_entry_for_next_card() {
        let (mut session, _, _) = mount();

        let start = Instant::now();
        session.swipe(GestureVector::new(150.0, 0.0)).await;
        let elapsed = start.elapsed();

        // 300ms exit followed by the 400ms entry tween
        assert!(elapsed >= Duration::from_millis(700), "elapsed = {elapsed:?}");
        assert_eq!(session.pose(), CardPose::REST);
        assert_eq!(session.state(), DeckState::Active(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_swipe_has_no_entry() {
        let (mut session, _, _) = mount();
        session.jump_to(2).await.unwrap();

        let start = Instant::now();
        session.swipe(GestureVector::new(-150.0, 0.0)).await;
        let elapsed = start.elapsed();

        assert!(elapsed < Duration::from_millis(400), "elapsed = {elapsed:?}");
        assert_eq!(session.state(), DeckState::Exhausted);
        assert_eq!(session.pose().opacity, 0.0);
    }

    // ============================================================================
    // Feedback and side effects
    // ============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_connect_emits_chat_intent() {
        let (mut session, navigator, store) = mount();

        let outcome = session.send_connection_request().await;
        assert!(matches!(
            outcome,
            SwipeOutcome::Swiped { action: SwipeAction::Connect, candidate_id: 1, .. }
        ));
        assert_eq!(navigator.routes(), vec!["/dashboard/chats/1"]);
        // Favorites untouched unless configured
        assert!(store.snapshot().favorites.is_empty());

        let feedback = session.drain_feedback();
        assert_eq!(feedback[0].title, "Connection Request Sent");
        assert_eq!(feedback[0].description, "You've sent a connection request to A");
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_can_add_favorite() {
        let (mut session, _, store) = mount_with(SessionConfig::default().with_connect_adds_favorite(true));

        session.swipe(GestureVector::new(0.0, -150.0)).await;
        assert!(session.favorites().contains(1));
        assert_eq!(store.snapshot().favorites, vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_feedback() {
        let (mut session, _, _) = mount();
        for _ in 0..3 {
            session.swipe(GestureVector::new(-150.0, 0.0)).await;
        }
        assert_eq!(session.state(), DeckState::Exhausted);

        let titles: Vec<_> = session.drain_feedback().into_iter().map(|f| f.title).collect();
        assert_eq!(
            titles,
            vec!["Skipped Profile", "Skipped Profile", "Skipped Profile", "No more profiles"]
        );

        assert_eq!(
            session.swipe(GestureVector::new(150.0, 0.0)).await,
            SwipeOutcome::Ignored(IgnoreReason::DeckExhausted)
        );
        assert_eq!(session.next().await, Some(AdvanceOutcome::NoMoreCandidates));
    }

    #[test]
    fn test_toggle_favorite_persists_and_reports() {
        let (mut session, _, store) = mount();

        assert_eq!(session.toggle_favorite(2), Some(true));
        assert_eq!(store.snapshot().favorites, vec![2]);
        assert_eq!(session.toggle_favorite(2), Some(false));
        assert!(store.snapshot().favorites.is_empty());

        let feedback = session.drain_feedback();
        assert_eq!(feedback[0], Feedback::favorite_toggled("B", true));
        assert_eq!(feedback[1].title, "Removed from Favorites");

        session.teardown();
        assert_eq!(session.toggle_favorite(2), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_jump_to_out_of_range() {
        let (mut session, _, _) = mount();
        assert_eq!(
            session.jump_to(3).await,
            Err(DeckError::InvalidIndex { index: 3, len: 3 })
        );
        assert_eq!(session.jump_to(2).await, Ok(2));
        assert_eq!(session.previous().await, Some(1));
        assert_eq!(session.state(), DeckState::Active(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restarts_deck() {
        let (mut session, _, _) = mount();
        for _ in 0..3 {
            session.next().await;
        }
        assert_eq!(session.state(), DeckState::Exhausted);

        session.reset(candidates());
        assert_eq!(session.state(), DeckState::Active(0));
        assert_eq!(session.pose(), CardPose::REST);
    }
}
