use crate::result::TransitionError;
use crate::schedule::{bidding_order, hand_size};

/// The bid the last bidder is barred from making, given the total already bid.
///
/// The dealer bids last and may not bring the round's total bids up to exactly
/// the hand size. When earlier bids already exceed the hand size there is no
/// such value, so no restriction applies beyond the range check.
pub fn forbidden_bid(hand_size: u8, sum_of_others: u8) -> Option<u8> {
    if sum_of_others <= hand_size {
        Some(hand_size - sum_of_others)
    } else {
        None
    }
}

/// Validate a full set of bids for the given round, seat-indexed to match
/// `player_order`. Checks every bid against the hand size, then applies the
/// hook rule to the dealer's bid. Never mutates anything; the caller's state
/// is untouched on failure.
pub fn validate_bids(
    round: usize,
    player_order: &[String; 4],
    bids: &[u8; 4],
) -> Result<(), TransitionError> {
    let cards = hand_size(round);
    let order = bidding_order(round);

    for &seat in &order {
        if bids[seat] > cards {
            return Err(TransitionError::BidOutOfRange {
                player: player_order[seat].clone(),
                bid: bids[seat],
            });
        }
    }

    let dealer = order[3];
    let sum_of_others: u8 = order[..3].iter().map(|&seat| bids[seat]).sum();
    if let Some(forbidden) = forbidden_bid(cards, sum_of_others) {
        if bids[dealer] == forbidden {
            return Err(TransitionError::ForbiddenBid {
                player: player_order[dealer].clone(),
                forbidden,
            });
        }
    }

    Ok(())
}
