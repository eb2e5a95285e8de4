use rummikub_scorer::{GameState, ScoringRule, SolverConfig, parse_tiles, solve, solve_game};

fn main() -> Result<(), String> {
    println!("Rummikub Scorer\n");

    // Tiles in hand
    let hand = parse_tiles("r1 r2 r3 b5 y5 k5 r7 b8 y9 k10 r11 b12 y13")?;
    // Tiles already on the table
    let table = parse_tiles("r4 r5 r6 b1 b2 b3 y7 k7 r7")?;

    let state = GameState::new(hand, table);
    let result = solve_game(&state).map_err(|e| e.to_string())?;

    println!("Solvable:  {}", result.solvable);
    println!("Reason:    {}", result.explanation);
    println!("Max score: {}", result.best_score);
    println!("Suggested moves:");
    for suggestion in &result.suggestions {
        println!("  {}", suggestion);
    }

    // The same tiles under the incremental rule
    let config = SolverConfig::default().with_scoring(ScoringRule::Incremental);
    let incremental = solve(&state.hand_tiles, &state.table_tiles, &config)
        .map_err(|e| e.to_string())?;
    println!(
        "\nIncremental rule: {} of {} ({} states)",
        incremental.best_score, incremental.total_face_value, incremental.states_explored
    );

    Ok(())
}
