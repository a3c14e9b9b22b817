use crate::scoring::RoundResult;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use uuid::Uuid;

/// Failure from an external collaborator. Never fatal to the game: the host
/// surfaces these as warnings and keeps going.
#[derive(Debug, PartialEq)]
pub enum ServiceError {
    Unavailable(String),
    Failed(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            ServiceError::Unavailable(msg) => {
                write!(f, "Error: Service unavailable: {}", msg)
            }
            ServiceError::Failed(msg) => {
                write!(f, "Error: Service call failed: {}", msg)
            }
        }
    }
}

impl Error for ServiceError {}

/// Tone selector for generated game summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryStyle {
    Matchday,
    Dramatic,
    Deadpan,
}

/// Outcome of submitting final scores to an external ledger. `Partial` means
/// some but not all rows were persisted; hard failures are `ServiceError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Accepted,
    Partial,
}

/// Told about every recorded round, e.g. a remote sheet or webhook.
pub trait NotificationSink {
    fn round_recorded(
        &self,
        players: &[String; 4],
        history: &[RoundResult],
    ) -> Result<(), ServiceError>;
}

/// Turns a finished (or in-progress) game history into freeform commentary.
pub trait NarrativeSummaryService {
    fn summarize(
        &self,
        players: &[String; 4],
        history: &[RoundResult],
        style: SummaryStyle,
    ) -> Result<String, ServiceError>;
}

/// Renders text to audio bytes.
pub trait SpeechSynthesisService {
    fn synthesize(&self, text: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Persists final per-player totals to an external ledger.
pub trait ScoreSubmissionService {
    fn submit(
        &self,
        game_id: &Uuid,
        players: &[String; 4],
        totals: &[i32; 4],
    ) -> Result<SubmissionStatus, ServiceError>;
}
