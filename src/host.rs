use crate::result::{TransitionError, TransitionSuccess};
use crate::services::{
    NarrativeSummaryService, NotificationSink, ScoreSubmissionService, ServiceError,
    SpeechSynthesisService, SubmissionStatus, SummaryStyle,
};
use crate::store::StateStore;
use crate::{Game, GameTransition};
use std::collections::HashMap;
use uuid::Uuid;

/// Owns the live game plus its external collaborators: the snapshot store
/// and the optional notification, commentary, speech, and score-submission
/// services.
///
/// All collaborator calls happen after the core transition has already
/// committed and are fire-and-forget: a failed save or notification is
/// logged and never rolls the transition back.
pub struct GameHost {
    game: Game,
    store: Box<dyn StateStore>,
    notifier: Option<Box<dyn NotificationSink>>,
    narrator: Option<Box<dyn NarrativeSummaryService>>,
    speech: Option<Box<dyn SpeechSynthesisService>>,
    submission: Option<Box<dyn ScoreSubmissionService>>,
    summary_cache: HashMap<SummaryStyle, String>,
}

impl GameHost {
    pub fn new(game: Game, store: Box<dyn StateStore>) -> Self {
        GameHost {
            game,
            store,
            notifier: None,
            narrator: None,
            speech: None,
            submission: None,
            summary_cache: HashMap::new(),
        }
    }

    /// Restore the game persisted in the store, or start fresh when the
    /// store is empty or unreadable.
    pub fn resume_or_new(
        id: Uuid,
        player_order: [String; 4],
        store: Box<dyn StateStore>,
    ) -> Self {
        let game = match store.load() {
            Ok(Some(snapshot)) => {
                log::info!("Resuming game at round {}", snapshot.round_num);
                Game::restore(id, &snapshot)
            }
            Ok(None) => Game::new(id, player_order),
            Err(e) => {
                log::warn!("Failed to load saved game, starting fresh: {}", e);
                Game::new(id, player_order)
            }
        };
        GameHost::new(game, store)
    }

    pub fn with_notifier(mut self, notifier: Box<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_narrator(mut self, narrator: Box<dyn NarrativeSummaryService>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn with_speech(mut self, speech: Box<dyn SpeechSynthesisService>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_submission(mut self, submission: Box<dyn ScoreSubmissionService>) -> Self {
        self.submission = Some(submission);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Apply a transition to the game, then persist and notify. The
    /// transition result is returned unchanged; collaborator failures only
    /// produce warnings.
    pub fn apply(&mut self, entry: GameTransition) -> Result<TransitionSuccess, TransitionError> {
        let outcome = self.game.play(entry)?;

        match outcome {
            TransitionSuccess::Abandon => {
                self.summary_cache.clear();
                if let Err(e) = self.store.clear() {
                    log::warn!("Failed to clear saved game: {}", e);
                }
            }
            TransitionSuccess::Start => {
                self.summary_cache.clear();
                self.persist();
            }
            _ => self.persist(),
        }

        if matches!(
            outcome,
            TransitionSuccess::RoundComplete | TransitionSuccess::GameOver
        ) {
            if let Some(notifier) = &self.notifier {
                if let Err(e) =
                    notifier.round_recorded(self.game.get_player_order(), self.game.get_history())
                {
                    log::warn!("Round notification failed: {}", e);
                }
            }
        }

        if outcome == TransitionSuccess::GameOver {
            self.submit_final_scores();
        }

        Ok(outcome)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.game.snapshot()) {
            log::warn!("Failed to save game state: {}", e);
        }
    }

    fn submit_final_scores(&self) {
        let Some(submission) = &self.submission else {
            return;
        };
        let totals = match self.game.get_scores() {
            Ok(totals) => *totals,
            Err(_) => return,
        };
        match submission.submit(self.game.get_id(), self.game.get_player_order(), &totals) {
            Ok(SubmissionStatus::Accepted) => {
                log::info!("Final scores submitted");
            }
            Ok(SubmissionStatus::Partial) => {
                log::warn!("Final scores only partially submitted");
            }
            Err(e) => {
                log::warn!("Final score submission failed: {}", e);
            }
        }
    }

    /// Commentary on the game so far in the given style. Generated at most
    /// once per style per game; repeat calls return the cached text.
    pub fn narrate(&mut self, style: SummaryStyle) -> Result<String, ServiceError> {
        if let Some(text) = self.summary_cache.get(&style) {
            return Ok(text.clone());
        }
        let narrator = self
            .narrator
            .as_ref()
            .ok_or_else(|| ServiceError::Unavailable("no summary service configured".to_string()))?;
        let text =
            narrator.summarize(self.game.get_player_order(), self.game.get_history(), style)?;
        self.summary_cache.insert(style, text.clone());
        Ok(text)
    }

    /// Commentary rendered to audio.
    pub fn narrate_aloud(&mut self, style: SummaryStyle) -> Result<Vec<u8>, ServiceError> {
        let text = self.narrate(style)?;
        let speech = self
            .speech
            .as_ref()
            .ok_or_else(|| ServiceError::Unavailable("no speech service configured".to_string()))?;
        speech.synthesize(&text)
    }
}
