//! This crate provides a scorekeeping state machine for the four person card game
//! [nomination whist](https://www.pagat.com/exact/ohhell.html), played as a fixed
//! 13-round schedule: hand sizes run 7 down to 1 and back up to 7, with the trump
//! suit rotating each round. Players bid on the tricks they expect to win, the
//! dealer bids last and may never bid the exact count that would make the bids
//! add up to the hand size, and making a bid exactly is worth a 10 point bonus.
//!
//! ## Example usage
//! ```
//! use uuid::Uuid;
//! use whist::{Game, GameTransition, State};
//!
//! let mut g = Game::new(
//!     Uuid::new_v4(),
//!     [
//!         "Campbell".to_string(),
//!         "Russell".to_string(),
//!         "Nathan".to_string(),
//!         "Dave".to_string(),
//!     ],
//! );
//!
//! g.play(GameTransition::Start).unwrap();
//! assert_eq!(*g.get_state(), State::Bidding);
//!
//! // Round 1: 7 cards, hearts. Seat 0 deals, so seat 1 bids first and seat 0 last.
//! g.play(GameTransition::Bids([0, 2, 1, 3])).unwrap();
//! g.play(GameTransition::Tricks([1, 2, 1, 3])).unwrap();
//!
//! assert_eq!(g.round(), 1);
//! assert_eq!(g.get_scores().unwrap(), &[1, 12, 11, 13]);
//! ```

mod bidding;
mod game_state;
mod host;
mod result;
mod schedule;
mod scoreboard;
mod scoring;
mod services;
mod snapshot;
mod store;

#[cfg(test)]
mod tests;

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub use bidding::{forbidden_bid, validate_bids};
pub use game_state::State;
pub use host::GameHost;
pub use result::{GetError, TransitionError, TransitionSuccess};
pub use schedule::{
    bidding_order, dealer_seat, definition_for, hand_size, trump_suit, RoundDefinition, Suit,
    SUITS, TOTAL_ROUNDS,
};
pub use scoreboard::{final_rankings, project, Ranking, ScoreboardRow, ScoreboardView, SeatEntry};
pub use scoring::{round_score, RoundResult, Scoring};
pub use services::{
    NarrativeSummaryService, NotificationSink, ScoreSubmissionService, ServiceError,
    SpeechSynthesisService, SubmissionStatus, SummaryStyle,
};
pub use snapshot::{
    Snapshot, SnapshotEncoding, SnapshotError, SnapshotRoundEntry, SNAPSHOT_VERSION,
};
pub use store::{MemoryStore, SqliteStore, StateStore, StoreError};

/// The fixed player roster.
pub const ROSTER: [&str; 4] = ["Campbell", "Russell", "Nathan", "Dave"];

/// Roster in its default seating order, for hosts that let the operator
/// rearrange it before starting.
pub fn roster_order() -> [String; 4] {
    [
        ROSTER[0].to_string(),
        ROSTER[1].to_string(),
        ROSTER[2].to_string(),
        ROSTER[3].to_string(),
    ]
}

/// The primary way to interface with a whist game. Used as an argument to
/// [Game::play](struct.Game.html#method.play). Bids and tricks are
/// seat-indexed to match the game's player order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTransition {
    Start,
    Bids([u8; 4]),
    Tricks([u8; 4]),
    Replay,
    Abandon,
}

/// Primary game state. Internally manages the round schedule, dealer
/// rotation, bid validation, and scoring.
///
/// The dealer and bidding order are recomputed from the player order and the
/// round index on every access, never stored, so they cannot drift from the
/// recorded history. Likewise the round index is the length of the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    id: Uuid,
    state: State,
    player_order: [String; 4],
    started_at: Option<u64>,
    scoring: Scoring,
}

fn epoch_secs_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl Game {
    pub fn new(id: Uuid, player_order: [String; 4]) -> Game {
        Game {
            id,
            state: State::NotStarted,
            player_order,
            started_at: None,
            scoring: Scoring::new(),
        }
    }

    pub fn get_id(&self) -> &Uuid {
        &self.id
    }

    /// See [`State`](enum.State.html)
    pub fn get_state(&self) -> &State {
        &self.state
    }

    pub fn get_player_order(&self) -> &[String; 4] {
        &self.player_order
    }

    /// Index of the next round to play; also the count of completed rounds.
    pub fn round(&self) -> usize {
        self.scoring.rounds_completed()
    }

    /// Epoch seconds at which the current game was started.
    pub fn get_started_at(&self) -> Option<u64> {
        self.started_at
    }

    /// Completed rounds, oldest first.
    pub fn get_history(&self) -> &[RoundResult] {
        &self.scoring.rounds
    }

    pub fn get_scores(&self) -> Result<&[i32; 4], GetError> {
        match self.state {
            State::NotStarted => Err(GetError::GameNotStarted),
            _ => Ok(&self.scoring.cumulative),
        }
    }

    /// Hand size and trump suit for the round in progress.
    pub fn get_round_definition(&self) -> Result<RoundDefinition, GetError> {
        match self.state {
            State::NotStarted => Err(GetError::GameNotStarted),
            State::Completed => Err(GetError::GameCompleted),
            _ => Ok(definition_for(self.round())),
        }
    }

    pub fn get_dealer(&self) -> Result<&str, GetError> {
        match self.state {
            State::NotStarted => Err(GetError::GameNotStarted),
            State::Completed => Err(GetError::GameCompleted),
            _ => Ok(&self.player_order[dealer_seat(self.round())]),
        }
    }

    /// Player names in bidding order for the round in progress; the dealer
    /// comes last.
    pub fn get_bidding_order(&self) -> Result<[&str; 4], GetError> {
        match self.state {
            State::NotStarted => Err(GetError::GameNotStarted),
            State::Completed => Err(GetError::GameCompleted),
            _ => {
                let seats = bidding_order(self.round());
                Ok([
                    &self.player_order[seats[0]],
                    &self.player_order[seats[1]],
                    &self.player_order[seats[2]],
                    &self.player_order[seats[3]],
                ])
            }
        }
    }

    /// Bids submitted for the round in progress, available while its results
    /// are awaited.
    pub fn get_pending_bids(&self) -> Result<[u8; 4], GetError> {
        match self.state {
            State::Results(bids) => Ok(bids),
            _ => Err(GetError::NotAwaitingResults),
        }
    }

    /// Players sharing the highest cumulative score, once the game is over.
    pub fn get_winners(&self) -> Result<Vec<&str>, GetError> {
        match self.state {
            State::Completed => {
                let top = self.scoring.cumulative.iter().max().copied().unwrap_or(0);
                Ok(self
                    .player_order
                    .iter()
                    .zip(self.scoring.cumulative.iter())
                    .filter(|&(_, &score)| score == top)
                    .map(|(name, _)| name.as_str())
                    .collect())
            }
            _ => Err(GetError::GameNotCompleted),
        }
    }

    /// The primary function used to progress the game state. The first
    /// `GameTransition` argument must always be
    /// [`GameTransition::Start`](enum.GameTransition.html#variant.Start).
    /// The round schedule and dealer rotation are managed internally. A full
    /// game is:
    ///
    /// Start -> (Bids -> Tricks) * 13
    ///
    /// with `Replay` rewinding one completed round and `Abandon` discarding
    /// the game at any point. Failed transitions leave the state untouched.
    pub fn play(&mut self, entry: GameTransition) -> Result<TransitionSuccess, TransitionError> {
        match entry {
            GameTransition::Start => {
                if self.state != State::NotStarted {
                    return Err(TransitionError::AlreadyStarted);
                }
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        if self.player_order[i] == self.player_order[j] {
                            return Err(TransitionError::DuplicatePlayers);
                        }
                    }
                }
                self.started_at = Some(epoch_secs_now());
                self.scoring = Scoring::new();
                self.state = State::Bidding;
                Ok(TransitionSuccess::Start)
            }
            GameTransition::Bids(bids) => match self.state {
                State::NotStarted => Err(TransitionError::NotStarted),
                State::Completed => Err(TransitionError::CompletedGame),
                State::Results(_) => Err(TransitionError::BidsInResultsStage),
                State::Bidding => {
                    validate_bids(self.round(), &self.player_order, &bids)?;
                    self.state = State::Results(bids);
                    Ok(TransitionSuccess::Bids)
                }
            },
            GameTransition::Tricks(tricks) => match self.state {
                State::NotStarted => Err(TransitionError::NotStarted),
                State::Completed => Err(TransitionError::CompletedGame),
                State::Bidding => Err(TransitionError::ResultsInBiddingStage),
                State::Results(bids) => {
                    let cards = hand_size(self.round());
                    for seat in 0..4 {
                        if tricks[seat] > cards {
                            return Err(TransitionError::TricksOutOfRange {
                                player: self.player_order[seat].clone(),
                                tricks: tricks[seat],
                            });
                        }
                    }
                    let total: u8 = tricks.iter().sum();
                    if total != cards {
                        return Err(TransitionError::TricksMismatch { expected: cards, total });
                    }

                    self.scoring.record_round(bids, tricks);
                    if self.scoring.rounds_completed() == TOTAL_ROUNDS {
                        self.state = State::Completed;
                        Ok(TransitionSuccess::GameOver)
                    } else {
                        self.state = State::Bidding;
                        Ok(TransitionSuccess::RoundComplete)
                    }
                }
            },
            GameTransition::Replay => match self.state {
                State::NotStarted => Err(TransitionError::NotStarted),
                State::Completed => Err(TransitionError::CompletedGame),
                State::Results(_) => Err(TransitionError::ReplayAwaitingResults),
                State::Bidding => match self.scoring.unrecord_last() {
                    Some(_) => Ok(TransitionSuccess::Replay),
                    None => Err(TransitionError::NoRoundToReplay),
                },
            },
            GameTransition::Abandon => {
                self.state = State::NotStarted;
                self.started_at = None;
                self.scoring = Scoring::new();
                Ok(TransitionSuccess::Abandon)
            }
        }
    }
}
