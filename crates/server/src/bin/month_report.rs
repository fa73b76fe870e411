//! Print one player's monthly report to the terminal.
//!
//! month-report <username> <year> <month> [--blunders]

use chess_core::stats::{DailyRatingSeries, MonthlyDelta, OpeningCounts};
use server::config::Config;
use server::render::{Chart, ChartBoard};
use server::report::{self, MonthRequest, ReportOutcome, NO_GAMES_MESSAGE};
use server::state::AppState;
use validator::Validate;

fn parse_args() -> anyhow::Result<MonthRequest> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let blunders = args.iter().any(|a| a == "--blunders");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let &[username, year, month] = positional.as_slice() else {
        anyhow::bail!("usage: month-report <username> <year> <month> [--blunders]");
    };

    Ok(MonthRequest {
        username: username.clone(),
        year: year.parse()?,
        month: month.parse()?,
        blunders,
    })
}

fn draw(board: &mut ChartBoard, series: &DailyRatingSeries, openings: &OpeningCounts, deltas: &[MonthlyDelta]) {
    board.replace(Chart::rating(series));
    board.replace(Chart::openings(openings));
    board.replace(Chart::monthly(deltas));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let req = parse_args()?;
    req.validate()?;

    let config = Config::from_env();
    let state = AppState::from_config(&config)?;

    match report::build_month_report(&state.archive, state.evaluator.as_ref(), &req).await {
        ReportOutcome::PlayerNotFound => {
            eprintln!("user doesn't exist: {}", req.username);
            std::process::exit(1);
        }
        ReportOutcome::NoResults => println!("{NO_GAMES_MESSAGE}"),
        ReportOutcome::Report(month) => {
            println!("{}\n", month.summary_text);
            let mut board = ChartBoard::default();
            draw(&mut board, &month.rating_series, &month.openings, &month.monthly_deltas);
            println!("{}", board.render_text());
            if let Some(blunders) = &month.blunders {
                for game in blunders.games.iter().filter(|g| g.blunders > 0 || g.status.is_degraded()) {
                    match game.status.reason() {
                        Some(reason) => println!("{}: not evaluated ({reason})", game.game_id),
                        None => println!("{}: {} blunders", game.game_id, game.blunders),
                    }
                }
            }
        }
    }

    Ok(())
}
