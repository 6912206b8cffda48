//! Full games driven through the agent surface.

use kitten_ismcts::agents::{play_game, Agent, FlatAgent, IsmctsAgent, RandomAgent};
use kitten_ismcts::core::PlayerId;
use kitten_ismcts::games::kittens::{new_game, KittensGame};
use kitten_ismcts::mcts::{HeuristicPlayout, IsmctsConfig};

fn search_config(seed: u64) -> IsmctsConfig {
    IsmctsConfig::default()
        .with_seed(seed)
        .with_determinizations(3)
        .with_simulations(10)
        .with_max_playout_moves(150)
}

fn mixed_table(game: &KittensGame) -> Vec<Box<dyn Agent>> {
    vec![
        Box::new(
            IsmctsAgent::new(game.clone(), search_config(1))
                .unwrap()
                .with_playout(HeuristicPlayout),
        ),
        Box::new(RandomAgent::new(2)),
        Box::new(FlatAgent::new(game.clone(), search_config(3)).unwrap()),
    ]
}

#[test]
fn test_mixed_table_plays_to_completion() {
    let (game, mut state) = new_game(3, 2025).unwrap();
    let mut agents = mixed_table(&game);

    let winner = play_game(&game, &mut state, &mut agents, 2_000).unwrap();

    assert!(winner.is_some());
    assert_eq!(state.alive_count(), 1);
    assert!(state.check_invariants().is_ok());
    assert!(!state.history().is_empty());
}

#[test]
fn test_whole_games_are_reproducible() {
    let run = || {
        let (game, mut state) = new_game(3, 404).unwrap();
        let mut agents = mixed_table(&game);
        let winner = play_game(&game, &mut state, &mut agents, 2_000).unwrap();
        (winner, state.history().len())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_move_cap_returns_none() {
    let (game, mut state) = new_game(2, 7).unwrap();
    let mut agents: Vec<Box<dyn Agent>> = vec![
        Box::new(RandomAgent::new(1)),
        Box::new(RandomAgent::new(2)),
    ];

    let winner = play_game(&game, &mut state, &mut agents, 2).unwrap();
    assert_eq!(winner, None);
    assert_eq!(state.history().len(), 2);
    assert_eq!(state.winner(), None::<PlayerId>);
}
