use uuid::Uuid;
use whist::{
    final_rankings, forbidden_bid, project, roster_order, Game, GameTransition, State,
};

fn main() {
    let mut g = Game::new(Uuid::new_v4(), roster_order());

    g.play(GameTransition::Start).unwrap();

    // Walk the whole schedule with a simple strategy: everyone bids a third
    // of the hand, the dealer sidesteps the forbidden total, and the dealer's
    // seat takes every trick.
    while *g.get_state() != State::Completed {
        let def = g.get_round_definition().unwrap();
        let dealer = g.round() % 4;
        println!(
            "Round {} | {} Cards | {} | Dealer: {}",
            def.index + 1,
            def.hand_size,
            def.trump_suit,
            g.get_dealer().unwrap()
        );

        let mut bids = [def.hand_size / 3; 4];
        let others: u8 = (0..4).filter(|&s| s != dealer).map(|s| bids[s]).sum();
        if forbidden_bid(def.hand_size, others) == Some(bids[dealer]) {
            bids[dealer] = if bids[dealer] == 0 { 1 } else { bids[dealer] - 1 };
        }
        g.play(GameTransition::Bids(bids)).unwrap();

        let mut tricks = [0u8; 4];
        tricks[dealer] = def.hand_size;
        g.play(GameTransition::Tricks(tricks)).unwrap();
    }

    let view = project(&g);
    println!("\nFinal totals:");
    for (name, total) in view.players.iter().zip(view.totals.iter()) {
        println!("  {}: {}", name, total);
    }

    println!("\nFinal rankings:");
    for ranking in final_rankings(&view.players, &view.totals) {
        println!("  {}. {} - {} points", ranking.rank, ranking.player, ranking.score);
    }
}
