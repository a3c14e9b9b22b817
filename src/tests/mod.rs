mod game_robustness_unit;
