use crate::schedule::{definition_for, Suit};
use crate::Game;
use serde::{Deserialize, Serialize};

/// One player's cell in a scoreboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatEntry {
    pub bid: u8,
    pub score: i32,
}

/// One completed round of the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardRow {
    pub round: usize,
    pub hand_size: u8,
    pub trump_suit: Suit,
    pub entries: [SeatEntry; 4],
}

/// The per-round table plus running totals. Valid at any point of a game;
/// rows cover only the rounds completed so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardView {
    pub players: [String; 4],
    pub rows: Vec<ScoreboardRow>,
    pub totals: [i32; 4],
}

pub fn project(game: &Game) -> ScoreboardView {
    let mut rows = Vec::with_capacity(game.get_history().len());
    let mut totals = [0; 4];

    for (round, result) in game.get_history().iter().enumerate() {
        let def = definition_for(round);
        let mut entries = [SeatEntry { bid: 0, score: 0 }; 4];
        for seat in 0..4 {
            entries[seat] = SeatEntry {
                bid: result.bids[seat],
                score: result.scores[seat],
            };
            totals[seat] += result.scores[seat];
        }
        rows.push(ScoreboardRow {
            round,
            hand_size: def.hand_size,
            trump_suit: def.trump_suit,
            entries,
        });
    }

    ScoreboardView {
        players: game.get_player_order().clone(),
        rows,
        totals,
    }
}

/// A player's final standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub rank: usize,
    pub player: String,
    pub score: i32,
}

/// Standings by score, highest first, using competition ranking: tied players
/// share a rank and the following rank skips past them.
pub fn final_rankings(players: &[String; 4], totals: &[i32; 4]) -> Vec<Ranking> {
    let mut sorted: Vec<(usize, i32)> = totals.iter().copied().enumerate().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let mut rankings = Vec::with_capacity(4);
    let mut current_rank = 1;
    for (position, (seat, score)) in sorted.iter().enumerate() {
        if position > 0 && *score != sorted[position - 1].1 {
            current_rank = position + 1;
        }
        rankings.push(Ranking {
            rank: current_rank,
            player: players[*seat].clone(),
            score: *score,
        });
    }
    rankings
}
