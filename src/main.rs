//! Roulette Sim entry point
//!
//! Headless runner: spins the wheel a number of times and prints each result.
//!
//! Usage: `roulette-sim [seed] [spins] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use roulette_sim::{history::SpinHistory, settings::TableSettings, sim::Table};

/// Give up on a round after this much simulated time
#[cfg(not(target_arch = "wasm32"))]
const ROUND_TIMEOUT_MS: f32 = 120_000.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Roulette Sim (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let spins = args
        .get(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(1);
    let settings = match args.get(2) {
        Some(path) => TableSettings::load_or_default(path),
        None => TableSettings::default(),
    };

    let mut table = match Table::new(settings, seed, SpinHistory::new()) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Invalid table settings: {}", e);
            std::process::exit(1);
        }
    };

    for spin in 1..=spins {
        table.start_spin();
        match table.run_to_result(ROUND_TIMEOUT_MS) {
            Some(result) => println!(
                "Spin {:>3}: {:>2} {:<5} (pocket {:>2}) at {:.1}s",
                spin,
                result.number,
                result.color.as_str(),
                result.pocket_index,
                table.clock_ms() / 1000.0
            ),
            None => {
                log::warn!("Spin {} did not settle within {} ms", spin, ROUND_TIMEOUT_MS);
                table.reset();
            }
        }
    }

    let history = table.sink();
    let counts = history.color_counts();
    println!(
        "Seed {} | last {:?} | red {} black {} green {}",
        table.seed(),
        history.numbers(),
        counts.red,
        counts.black,
        counts.green
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm; there is no headless runner
}
