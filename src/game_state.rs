use serde::{Deserialize, Serialize};

/// Phase of a game. `Results` carries the bids submitted for the round in
/// progress, so pending bids exist exactly when results are awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    NotStarted,
    Bidding,
    Results([u8; 4]),
    Completed,
}
