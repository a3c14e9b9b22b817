use serde::{Deserialize, Serialize};

/// Score for a single player's round: making the bid exactly earns a
/// 10 point bonus on top of the tricks, missing it scores the tricks alone.
pub fn round_score(bid: u8, tricks: u8) -> i32 {
    if bid == tricks {
        10 + i32::from(tricks)
    } else {
        i32::from(tricks)
    }
}

/// One completed round, seat-indexed to match the game's player order.
/// Immutable once recorded; scores are always derived from bids and tricks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub bids: [u8; 4],
    pub tricks: [u8; 4],
    pub scores: [i32; 4],
}

impl RoundResult {
    fn new(bids: [u8; 4], tricks: [u8; 4]) -> RoundResult {
        let mut scores = [0; 4];
        for seat in 0..4 {
            scores[seat] = round_score(bids[seat], tricks[seat]);
        }
        RoundResult { bids, tricks, scores }
    }
}

/// Cumulative scores plus the full round history. Rounds are only ever
/// appended or popped as a pair with their score contribution, so
/// `cumulative` always equals the column sums of `rounds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    pub cumulative: [i32; 4],
    pub rounds: Vec<RoundResult>,
}

impl Scoring {
    pub fn new() -> Scoring {
        Scoring {
            cumulative: [0; 4],
            rounds: Vec::new(),
        }
    }

    pub fn rounds_completed(&self) -> usize {
        self.rounds.len()
    }

    /// Score and record a completed round, adding each player's score to
    /// their running total.
    pub fn record_round(&mut self, bids: [u8; 4], tricks: [u8; 4]) -> RoundResult {
        let result = RoundResult::new(bids, tricks);
        for seat in 0..4 {
            self.cumulative[seat] += result.scores[seat];
        }
        self.rounds.push(result.clone());
        result
    }

    /// Reverse the most recent round, subtracting its scores back out.
    /// Returns `None` when no round has been completed.
    pub fn unrecord_last(&mut self) -> Option<RoundResult> {
        let result = self.rounds.pop()?;
        for seat in 0..4 {
            self.cumulative[seat] -= result.scores[seat];
        }
        Some(result)
    }
}

impl Default for Scoring {
    fn default() -> Scoring {
        Scoring::new()
    }
}
