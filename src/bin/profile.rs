//! Random self-play for profiling the move generator and win detector.
//!
//! Usage: `profile [games] [seed]` (defaults: 100000 games, seed 42).
//! Build with `--features hotpath` for per-function timings.

use std::time::Instant;

use rand::prelude::*;
use rand::rngs::StdRng;

use steal_four::env::Environment;
use steal_four::player::Player;
use steal_four::status::Outcome;
use steal_four::zobrist::ZobristTable;

#[derive(Default)]
struct Tally {
    first_wins: u64,
    second_wins: u64,
    ties: u64,
    steals: u64,
    plies: u64,
}

#[cfg_attr(feature = "hotpath", hotpath::main)]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let games: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let table = ZobristTable::standard();
    let mut env = Environment::new(&table);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::default();

    log::info!("playing {} random games (seed {})", games, seed);
    let start = Instant::now();
    for _ in 0..games {
        env.reset();
        let outcome = loop {
            if let Some(outcome) = env.outcome() {
                break outcome;
            }
            let moves = env.available_moves();
            let Some(mv) = moves.get(rng.random_range(0..moves.len())) else {
                log::error!("no legal move in a non-terminal state\n{}", env);
                return;
            };
            if let Err(err) = env.step(mv) {
                log::error!("{}", err);
                return;
            }
            tally.steals += u64::from(mv.is_steal());
            tally.plies += 1;
        };
        match outcome {
            Outcome::Winner(Player::First) => tally.first_wins += 1,
            Outcome::Winner(Player::Second) => tally.second_wins += 1,
            Outcome::Tie => tally.ties += 1,
        }
    }
    let elapsed = start.elapsed();

    log::info!(
        "first {} / second {} / ties {} ({} steals)",
        tally.first_wins,
        tally.second_wins,
        tally.ties,
        tally.steals
    );
    log::info!(
        "{} plies in {:.3}s ({:.0} plies/s)",
        tally.plies,
        elapsed.as_secs_f64(),
        tally.plies as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
}
