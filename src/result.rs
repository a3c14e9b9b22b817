use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum TransitionSuccess {
    Start,
    Bids,
    RoundComplete,
    GameOver,
    Replay,
    Abandon,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum GetError {
    GameNotStarted,
    GameCompleted,
    GameNotCompleted,
    NotAwaitingResults,
}

impl fmt::Display for GetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            GetError::GameNotStarted => {
                write!(f, "Error: Game not started yet.")
            }
            GetError::GameCompleted => {
                write!(f, "Error: Game is completed.")
            }
            GetError::GameNotCompleted => {
                write!(f, "Error: Game is still ongoing.")
            }
            GetError::NotAwaitingResults => {
                write!(f, "Error: No bids pending for the current round.")
            }
        }
    }
}

impl Error for GetError {}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum TransitionError {
    AlreadyStarted,
    NotStarted,
    CompletedGame,
    DuplicatePlayers,
    BidsInResultsStage,
    ResultsInBiddingStage,
    BidOutOfRange { player: String, bid: u8 },
    ForbiddenBid { player: String, forbidden: u8 },
    TricksOutOfRange { player: String, tricks: u8 },
    TricksMismatch { expected: u8, total: u8 },
    NoRoundToReplay,
    ReplayAwaitingResults,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            TransitionError::AlreadyStarted => {
                write!(f, "Error: Attempted to start a game already started.")
            }
            TransitionError::NotStarted => {
                write!(f, "Error: Attempted to play a game not started yet.")
            }
            TransitionError::CompletedGame => {
                write!(f, "Error: Attempted to play a completed game.")
            }
            TransitionError::DuplicatePlayers => {
                write!(f, "Error: Player order must contain four distinct players.")
            }
            TransitionError::BidsInResultsStage => {
                write!(f, "Error: Attempted to submit bids while awaiting results.")
            }
            TransitionError::ResultsInBiddingStage => {
                write!(f, "Error: Attempted to submit results while game is in bidding stage.")
            }
            TransitionError::BidOutOfRange { player, bid } => {
                write!(f, "Error: {}'s bid of {} exceeds the hand size.", player, bid)
            }
            TransitionError::ForbiddenBid { player, forbidden } => {
                write!(f, "Error: {}'s bid can't be {}.", player, forbidden)
            }
            TransitionError::TricksOutOfRange { player, tricks } => {
                write!(f, "Error: {}'s {} tricks exceed the hand size.", player, tricks)
            }
            TransitionError::TricksMismatch { expected, total } => {
                write!(f, "Error: Total tricks must equal {}. Currently: {}.", expected, total)
            }
            TransitionError::NoRoundToReplay => {
                write!(f, "Error: No completed round to replay.")
            }
            TransitionError::ReplayAwaitingResults => {
                write!(f, "Error: Attempted to replay a round while results are pending.")
            }
        }
    }
}

impl Error for TransitionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::test_case;
    use std::error::Error;

    #[test_case("GameNotStarted")]
    #[test_case("GameCompleted")]
    #[test_case("GameNotCompleted")]
    #[test_case("NotAwaitingResults")]
    fn get_error_display_contains_error(variant_name: &str) {
        let err = match variant_name {
            "GameNotStarted" => GetError::GameNotStarted,
            "GameCompleted" => GetError::GameCompleted,
            "GameNotCompleted" => GetError::GameNotCompleted,
            "NotAwaitingResults" => GetError::NotAwaitingResults,
            _ => unreachable!(),
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("Error:"), "GetError::{} display should start with 'Error:', got: {}", variant_name, msg);
    }

    #[test_case("AlreadyStarted")]
    #[test_case("NotStarted")]
    #[test_case("CompletedGame")]
    #[test_case("DuplicatePlayers")]
    #[test_case("BidsInResultsStage")]
    #[test_case("ResultsInBiddingStage")]
    #[test_case("NoRoundToReplay")]
    #[test_case("ReplayAwaitingResults")]
    fn transition_error_display_contains_error(variant_name: &str) {
        let err = match variant_name {
            "AlreadyStarted" => TransitionError::AlreadyStarted,
            "NotStarted" => TransitionError::NotStarted,
            "CompletedGame" => TransitionError::CompletedGame,
            "DuplicatePlayers" => TransitionError::DuplicatePlayers,
            "BidsInResultsStage" => TransitionError::BidsInResultsStage,
            "ResultsInBiddingStage" => TransitionError::ResultsInBiddingStage,
            "NoRoundToReplay" => TransitionError::NoRoundToReplay,
            "ReplayAwaitingResults" => TransitionError::ReplayAwaitingResults,
            _ => unreachable!(),
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("Error:"), "TransitionError::{} display should start with 'Error:', got: {}", variant_name, msg);
    }

    #[test]
    fn bid_errors_name_the_player() {
        let err = TransitionError::ForbiddenBid { player: "Dave".to_string(), forbidden: 2 };
        assert_eq!(err.to_string(), "Error: Dave's bid can't be 2.");

        let err = TransitionError::BidOutOfRange { player: "Nathan".to_string(), bid: 8 };
        assert!(err.to_string().contains("Nathan"));
    }

    #[test]
    fn tricks_mismatch_reports_expected_and_actual() {
        let err = TransitionError::TricksMismatch { expected: 7, total: 6 };
        assert_eq!(err.to_string(), "Error: Total tricks must equal 7. Currently: 6.");
    }

    #[test]
    fn transition_error_implements_std_error() {
        let err = TransitionError::NotStarted;
        assert_eq!(err.to_string(), "Error: Attempted to play a game not started yet.");
        assert!(err.source().is_none());
    }
}
