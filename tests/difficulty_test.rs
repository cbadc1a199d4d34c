//! Tests for the difficulty tiers: randomness, the Medium breadth cap,
//! and the Hard tier's unbeatability.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tictactoe_ai::{Board, Difficulty, MEDIUM_BREADTH, Player, Searcher, choose_move};

/// Builds a board from a 9-char layout string of 'X', 'O', and '.'.
fn board_from(layout: &str) -> Board {
    let mut board = Board::new();
    for (pos, c) in layout.chars().enumerate() {
        match c {
            'X' => board.place(pos, Player::Human).expect("valid layout"),
            'O' => board.place(pos, Player::Ai).expect("valid layout"),
            '.' => {}
            other => panic!("bad layout char {other}"),
        }
    }
    board
}

#[test]
fn test_easy_never_searches() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut board = board_from("X........");
    let mut searcher = Searcher::new();

    for _ in 0..50 {
        let pos = choose_move(Difficulty::Easy, &mut board, &mut searcher, &mut rng)
            .expect("non-empty board");
        assert!(board.is_empty(pos), "easy must pick an empty square");
    }
    assert_eq!(searcher.cached_positions(), 0, "easy never calls the search");
}

#[test]
fn test_easy_covers_multiple_positions() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut board = Board::new();
    let mut searcher = Searcher::new();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let pos = choose_move(Difficulty::Easy, &mut board, &mut searcher, &mut rng)
            .expect("non-empty board");
        seen.insert(pos);
    }
    assert!(seen.len() > 1, "uniform choice should spread over positions");
}

#[test]
fn test_medium_breadth_cap_misses_late_block() {
    // X threatens the bottom row at 6, which is the sixth empty
    // position (empties are [0, 1, 2, 3, 4, 6]) - just past the
    // breadth cap. Hard always blocks; Medium can only reach 6
    // through its random branch, never through search.
    let layout = ".....O.XX";
    assert!(board_from(layout).empty_positions()[MEDIUM_BREADTH] == 6);

    let mut rng = StdRng::seed_from_u64(42);
    let mut missed_block = 0;

    for _ in 0..100 {
        let mut board = board_from(layout);
        let mut searcher = Searcher::new();

        let hard = choose_move(Difficulty::Hard, &mut board, &mut searcher, &mut rng)
            .expect("non-empty board");
        assert_eq!(hard, 6, "hard always finds the block");

        searcher.clear();
        let medium = choose_move(Difficulty::Medium, &mut board, &mut searcher, &mut rng)
            .expect("non-empty board");
        if medium != 6 {
            missed_block += 1;
        }
    }

    assert!(
        missed_block > 0,
        "the breadth cap keeps the block out of medium's searched candidates"
    );
}

#[test]
fn test_hard_matches_best_move() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut board = board_from("XX..O....");
    let mut searcher = Searcher::new();

    let chosen = choose_move(Difficulty::Hard, &mut board, &mut searcher, &mut rng)
        .expect("non-empty board");

    searcher.clear();
    assert_eq!(Some(chosen), searcher.best_move(&mut board));
}

#[test]
fn test_all_tiers_return_none_on_full_board() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut board = board_from("XOXXOOOXX");
    let mut searcher = Searcher::new();

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        assert_eq!(
            choose_move(difficulty, &mut board, &mut searcher, &mut rng),
            None
        );
    }
}

#[test]
fn test_hard_never_loses_to_random_play() {
    // Fully random play against the Hard tier: over 10,000 games the
    // human side never wins, whoever moves first.
    let mut rng = StdRng::seed_from_u64(2024);
    let mut searcher = Searcher::new();

    for game in 0..10_000u32 {
        let mut board = Board::new();
        searcher.clear();
        let mut human_to_move = game % 2 == 0;

        loop {
            if human_to_move {
                let empty = board.empty_positions();
                let pos = *empty.choose(&mut rng).expect("non-terminal board");
                board.place(pos, Player::Human).expect("empty position");
                assert!(
                    !board.is_winner(Player::Human),
                    "random play beat the hard tier in game {game}"
                );
            } else {
                let pos = choose_move(Difficulty::Hard, &mut board, &mut searcher, &mut rng)
                    .expect("non-terminal board");
                board.place(pos, Player::Ai).expect("empty position");
                if board.is_winner(Player::Ai) {
                    break;
                }
            }
            if board.is_full() {
                break;
            }
            human_to_move = !human_to_move;
        }
    }
}

#[test]
fn test_medium_blunder_branch_stays_on_the_board() {
    // Whatever branch medium takes, the move must be a legal empty square.
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..200 {
        let mut board = board_from("X...O...X");
        let mut searcher = Searcher::new();
        let pos = choose_move(Difficulty::Medium, &mut board, &mut searcher, &mut rng)
            .expect("non-empty board");
        assert!(board.is_empty(pos));
    }
}

#[test]
fn test_difficulty_display_names() {
    assert_eq!(Difficulty::Easy.to_string(), "Easy");
    assert_eq!(Difficulty::Medium.to_string(), "Medium");
    assert_eq!(Difficulty::Hard.to_string(), "Hard");
}

#[test]
fn test_any_seeded_generator_works() {
    // choose_move is generic over Rng.
    fn pick(rng: &mut impl Rng) -> Option<usize> {
        let mut board = Board::new();
        let mut searcher = Searcher::new();
        choose_move(Difficulty::Easy, &mut board, &mut searcher, rng)
    }
    assert!(pick(&mut StdRng::seed_from_u64(5)).is_some());
}
