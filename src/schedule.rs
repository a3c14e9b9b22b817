use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rounds in a full game: hand sizes count down 7 to 1, then back up 2 to 7.
pub const TOTAL_ROUNDS: usize = 13;

/// Trump suit rotation, cycled by round index.
pub const SUITS: [Suit; 5] = [
    Suit::Hearts,
    Suit::Clubs,
    Suit::Diamonds,
    Suit::Spades,
    Suit::NoTrumps,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Clubs,
    Diamonds,
    Spades,
    NoTrumps,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Suit::Hearts => write!(f, "Hearts \u{2665}"),
            Suit::Clubs => write!(f, "Clubs \u{2663}"),
            Suit::Diamonds => write!(f, "Diamonds \u{2666}"),
            Suit::Spades => write!(f, "Spades \u{2660}"),
            Suit::NoTrumps => write!(f, "No Trumps"),
        }
    }
}

/// The fixed definition of a single round in the 13-round schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDefinition {
    pub index: usize,
    pub hand_size: u8,
    pub trump_suit: Suit,
}

/// Cards dealt to each player in the given round. Total over `0..13`.
pub fn hand_size(round: usize) -> u8 {
    debug_assert!(round < TOTAL_ROUNDS);
    if round <= 6 {
        7 - round as u8
    } else {
        round as u8 - 5
    }
}

pub fn trump_suit(round: usize) -> Suit {
    debug_assert!(round < TOTAL_ROUNDS);
    SUITS[round % SUITS.len()]
}

pub fn definition_for(round: usize) -> RoundDefinition {
    RoundDefinition {
        index: round,
        hand_size: hand_size(round),
        trump_suit: trump_suit(round),
    }
}

/// The dealer advances by one seat each round.
pub fn dealer_seat(round: usize) -> usize {
    round % 4
}

/// Seats in bidding order: the seat after the dealer leads, the dealer bids last.
pub fn bidding_order(round: usize) -> [usize; 4] {
    let first = (dealer_seat(round) + 1) % 4;
    [first, (first + 1) % 4, (first + 2) % 4, (first + 3) % 4]
}
