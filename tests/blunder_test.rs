/// Batch blunder checks: isolation, ordering and cancellation.
mod common;

use blunder_check::{BlunderEvaluator, EngineConfig, Evaluation};
use chess_core::normalize_batch;
use common::{raw_game, raw_game_as_black, ConstantLauncher, ScriptedLauncher, Session, PLAYER};
use futures::StreamExt;

fn config(sessions: usize) -> EngineConfig {
    EngineConfig {
        sessions,
        ..EngineConfig::default()
    }
}

/// An engine that always says "side to move is up 6 pawns" makes every one of
/// the player's moves look like a 12-pawn swing.
fn pessimist() -> ConstantLauncher {
    ConstantLauncher::new(Evaluation::Centipawns(600))
}

#[tokio::test]
async fn test_corrupt_game_does_not_abort_batch() {
    let mut corrupt = raw_game(2, 1, 1000, "win", "resigned");
    corrupt.pgn = Some("1. e4 e5 2. Qxz9 Nc6".to_string());
    let raws = vec![raw_game(1, 0, 1000, "win", "resigned"), corrupt, raw_game(3, 2, 1000, "win", "resigned")];
    let games = normalize_batch(&raws, PLAYER).games;

    let evaluator = BlunderEvaluator::new(pessimist(), &config(2));
    let report = evaluator.evaluate_batch(&games).await;

    assert_eq!(report.games.len(), 3);
    // Fixture PGN has three moves per side.
    assert_eq!(report.games[0].blunders, 3);
    assert_eq!(report.games[1].blunders, 0);
    assert!(report.games[1].status.is_degraded());
    assert_eq!(report.games[2].blunders, 3);
    assert_eq!(report.total, 6);
    assert_eq!(report.degraded, 1);
}

#[tokio::test]
async fn test_balanced_engine_finds_nothing() {
    let raws = vec![raw_game(1, 0, 1000, "win", "resigned"), raw_game_as_black(2, 1, 1000, "win", "resigned")];
    let games = normalize_batch(&raws, PLAYER).games;

    let evaluator = BlunderEvaluator::new(ConstantLauncher::new(Evaluation::Centipawns(0)), &config(1));
    let report = evaluator.evaluate_batch(&games).await;
    assert_eq!(report.total, 0);
    assert_eq!(report.degraded, 0);
}

#[tokio::test]
async fn test_black_moves_are_judged_from_black() {
    let raws = vec![raw_game_as_black(1, 0, 1000, "win", "resigned")];
    let games = normalize_batch(&raws, PLAYER).games;

    let evaluator = BlunderEvaluator::new(pessimist(), &config(1));
    let report = evaluator.evaluate_batch(&games).await;
    assert_eq!(report.games[0].blunders, 3);
}

#[tokio::test]
async fn test_game_without_moves_needs_no_session() {
    let mut raw = raw_game(1, 0, 1000, "win", "resigned");
    raw.pgn = None;
    let games = normalize_batch(&[raw], PLAYER).games;

    let launcher = pessimist();
    let evaluator = BlunderEvaluator::new(launcher.clone(), &config(1));
    let report = evaluator.evaluate_batch(&games).await;
    assert_eq!(report.total, 0);
    assert!(!report.games[0].status.is_degraded());
    assert_eq!(launcher.launched(), 0);
}

#[tokio::test]
async fn test_results_keep_input_order_and_one_session_per_game() {
    let raws: Vec<_> = (0..6).map(|i| raw_game(i, i as i64, 1000, "win", "resigned")).collect();
    let games = normalize_batch(&raws, PLAYER).games;

    let launcher = pessimist();
    let evaluator = BlunderEvaluator::new(launcher.clone(), &config(4));
    let ids: Vec<String> = evaluator.stream(&games).map(|g| g.game_id).collect().await;
    assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5"]);
    assert_eq!(launcher.launched(), 6);
}

#[tokio::test]
async fn test_abandoning_the_stream_keeps_finished_results() {
    let raws: Vec<_> = (0..5).map(|i| raw_game(i, i as i64, 1000, "win", "resigned")).collect();
    let games = normalize_batch(&raws, PLAYER).games;

    let launcher = pessimist();
    let evaluator = BlunderEvaluator::new(launcher.clone(), &config(1));
    let first_two: Vec<_> = evaluator.stream(&games).take(2).collect().await;
    assert_eq!(first_two.len(), 2);
    assert!(first_two.iter().all(|g| g.blunders == 3));
    // One session at a time: nothing past the second game was started.
    assert_eq!(launcher.launched(), 2);
}

fn three_games() -> Vec<chess_core::NormalizedGame> {
    let raws: Vec<_> = (0..3).map(|i| raw_game(i, i as i64, 1000, "win", "resigned")).collect();
    normalize_batch(&raws, PLAYER).games
}

#[tokio::test]
async fn test_engine_timeout_degrades_only_that_game() {
    let games = three_games();
    let launcher = ScriptedLauncher::new(
        Evaluation::Centipawns(600),
        vec![Session::Healthy, Session::TimesOutAt(2), Session::Healthy],
    );
    let evaluator = BlunderEvaluator::new(launcher.clone(), &config(1));
    let report = evaluator.evaluate_batch(&games).await;

    assert_eq!(report.games.len(), 3);
    assert_eq!(report.games[0].blunders, 3);
    assert_eq!(report.games[1].blunders, 0);
    assert_eq!(report.games[1].status.reason(), Some("Engine gave no answer within 200ms"));
    assert_eq!(report.games[2].blunders, 3);
    assert_eq!((report.total, report.degraded), (6, 1));
    // The stuck session was still released.
    assert_eq!(launcher.shut_down(), 3);
}

#[tokio::test]
async fn test_protocol_error_degrades_only_that_game() {
    let games = three_games();
    let launcher = ScriptedLauncher::new(
        Evaluation::Centipawns(600),
        vec![Session::GarbledAt(0), Session::Healthy, Session::Healthy],
    );
    let evaluator = BlunderEvaluator::new(launcher.clone(), &config(2));
    let report = evaluator.evaluate_batch(&games).await;

    assert!(report.games[0].status.is_degraded());
    assert_eq!(report.games[0].blunders, 0);
    assert!(!report.games[1].status.is_degraded());
    assert!(!report.games[2].status.is_degraded());
    assert_eq!((report.total, report.degraded), (6, 1));
    assert_eq!(launcher.shut_down(), 3);
}

#[tokio::test]
async fn test_failed_launch_degrades_only_that_game() {
    let games = three_games();
    let launcher = ScriptedLauncher::new(
        Evaluation::Centipawns(600),
        vec![Session::Healthy, Session::FailsToLaunch, Session::Healthy],
    );
    let evaluator = BlunderEvaluator::new(launcher.clone(), &config(1));
    let report = evaluator.evaluate_batch(&games).await;

    assert_eq!(report.games[1].blunders, 0);
    assert!(report.games[1].status.reason().unwrap().starts_with("Failed to spawn engine"));
    assert_eq!((report.total, report.degraded), (6, 1));
    assert_eq!(launcher.launched(), 3);
    // Nothing to release for the session that never started.
    assert_eq!(launcher.shut_down(), 2);
}
