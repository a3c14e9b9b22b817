use crate::game_state::State;
use crate::result::{TransitionError, TransitionSuccess};
use crate::schedule::{hand_size, TOTAL_ROUNDS};
use crate::{roster_order, Game, GameTransition};
use uuid::Uuid;

fn started_game() -> Game {
    let mut g = Game::new(Uuid::new_v4(), roster_order());
    g.play(GameTransition::Start).unwrap();
    g
}

/// All-zero bids are legal in every round: the dealer's forbidden bid is the
/// full hand size, never zero. The dealer's seat takes every trick.
fn play_round(g: &mut Game) -> TransitionSuccess {
    let round = g.round();
    let cards = hand_size(round);
    let mut tricks = [0u8; 4];
    tricks[round % 4] = cards;
    g.play(GameTransition::Bids([0, 0, 0, 0])).unwrap();
    g.play(GameTransition::Tricks(tricks)).unwrap()
}

#[test]
fn replay_restores_the_previous_round_exactly() {
    let mut g = started_game();
    play_round(&mut g);
    play_round(&mut g);
    let before = g.clone();

    play_round(&mut g);
    assert_eq!(g.round(), 3);

    assert_eq!(g.play(GameTransition::Replay), Ok(TransitionSuccess::Replay));
    assert_eq!(g, before);
    assert_eq!(g.round(), 2);
    assert_eq!(*g.get_state(), State::Bidding);
}

#[test]
fn replay_at_round_zero_is_rejected() {
    let mut g = started_game();
    assert_eq!(g.play(GameTransition::Replay), Err(TransitionError::NoRoundToReplay));
}

#[test]
fn replay_while_awaiting_results_is_rejected() {
    let mut g = started_game();
    play_round(&mut g);
    g.play(GameTransition::Bids([0, 0, 0, 0])).unwrap();
    assert_eq!(g.play(GameTransition::Replay), Err(TransitionError::ReplayAwaitingResults));
    assert_eq!(g.round(), 1);
}

#[test]
fn thirteen_rounds_complete_the_game() {
    let mut g = started_game();
    for round in 0..TOTAL_ROUNDS {
        assert_eq!(g.round(), round);
        let outcome = play_round(&mut g);
        if round + 1 == TOTAL_ROUNDS {
            assert_eq!(outcome, TransitionSuccess::GameOver);
        } else {
            assert_eq!(outcome, TransitionSuccess::RoundComplete);
        }
    }

    assert_eq!(*g.get_state(), State::Completed);
    assert_eq!(g.round(), TOTAL_ROUNDS);
    assert_eq!(g.get_history().len(), TOTAL_ROUNDS);

    // Every round: three players made their zero bid (10 points each), the
    // dealer's seat took the whole hand.
    let totals: i32 = g.get_scores().unwrap().iter().sum();
    let expected: i32 = (0..TOTAL_ROUNDS)
        .map(|round| 30 + i32::from(hand_size(round)))
        .sum();
    assert_eq!(totals, expected);

    // The game is closed to everything but abandon.
    assert_eq!(g.play(GameTransition::Bids([0, 0, 0, 0])), Err(TransitionError::CompletedGame));
    assert_eq!(g.play(GameTransition::Tricks([1, 2, 2, 2])), Err(TransitionError::CompletedGame));
    assert_eq!(g.play(GameTransition::Replay), Err(TransitionError::CompletedGame));
    assert_eq!(g.play(GameTransition::Start), Err(TransitionError::AlreadyStarted));
}

#[test]
fn winners_share_the_top_score() {
    let mut g = started_game();
    for _ in 0..TOTAL_ROUNDS {
        // Everyone bids zero; Campbell and Russell split every hand evenly
        // where possible, so scores stay symmetric between them.
        let cards = hand_size(g.round());
        let half = cards / 2;
        g.play(GameTransition::Bids([0, 0, 0, 0])).unwrap();
        g.play(GameTransition::Tricks([cards - half, half, 0, 0])).unwrap();
    }

    let winners = g.get_winners().unwrap();
    assert!(winners.contains(&"Nathan"));
    assert!(winners.contains(&"Dave"));
}

#[test]
fn abandon_discards_any_phase() {
    // Mid-bidding.
    let mut g = started_game();
    play_round(&mut g);
    assert_eq!(g.play(GameTransition::Abandon), Ok(TransitionSuccess::Abandon));
    assert_eq!(*g.get_state(), State::NotStarted);
    assert_eq!(g.round(), 0);
    assert!(g.get_history().is_empty());
    assert_eq!(g.get_started_at(), None);

    // Mid-round, with bids pending.
    let mut g = started_game();
    g.play(GameTransition::Bids([0, 0, 0, 0])).unwrap();
    g.play(GameTransition::Abandon).unwrap();
    assert_eq!(*g.get_state(), State::NotStarted);

    // After completion.
    let mut g = started_game();
    for _ in 0..TOTAL_ROUNDS {
        play_round(&mut g);
    }
    g.play(GameTransition::Abandon).unwrap();
    assert_eq!(*g.get_state(), State::NotStarted);

    // And the same game can be started again from scratch.
    assert_eq!(g.play(GameTransition::Start), Ok(TransitionSuccess::Start));
    assert_eq!(g.round(), 0);
    assert_eq!(g.get_scores().unwrap(), &[0; 4]);
}

#[test]
fn replay_then_replay_walks_back_one_round_at_a_time() {
    let mut g = started_game();
    play_round(&mut g);
    play_round(&mut g);
    play_round(&mut g);

    g.play(GameTransition::Replay).unwrap();
    g.play(GameTransition::Replay).unwrap();
    g.play(GameTransition::Replay).unwrap();
    assert_eq!(g.round(), 0);
    assert_eq!(g.get_scores().unwrap(), &[0; 4]);
    assert_eq!(g.play(GameTransition::Replay), Err(TransitionError::NoRoundToReplay));
}

#[test]
fn replayed_round_can_be_rescored_differently() {
    let mut g = started_game();
    g.play(GameTransition::Bids([0, 2, 1, 3])).unwrap();
    g.play(GameTransition::Tricks([1, 2, 1, 3])).unwrap();
    assert_eq!(g.get_scores().unwrap(), &[1, 12, 11, 13]);

    g.play(GameTransition::Replay).unwrap();
    g.play(GameTransition::Bids([0, 2, 1, 3])).unwrap();
    g.play(GameTransition::Tricks([0, 2, 2, 3])).unwrap();
    assert_eq!(g.get_scores().unwrap(), &[10, 12, 2, 13]);
    assert_eq!(g.round(), 1);
    assert_eq!(g.get_history().len(), 1);
}
