use roulette_sim::consts::{FRAME_MS, SUBSTEP_MS, SURFACE_SIZE};
use roulette_sim::settings::{BallTuning, SettleTuning, TableSettings, WheelTuning};
use roulette_sim::sim::{
    Ball, LaunchDraws, NoOpSink, SpinResult, Table, TableEvent, Wheel, WheelLayout,
};

fn play(seed: u64, spins: u32) -> (Vec<SpinResult>, Vec<TableEvent>) {
    let mut table = Table::new(TableSettings::default(), seed, Vec::new()).unwrap();
    let mut results = Vec::new();
    for _ in 0..spins {
        table.start_spin();
        if let Some(result) = table.run_to_result(120_000.0) {
            results.push(result);
        }
    }
    (results, table.into_sink())
}

#[test]
fn same_seed_same_results() {
    let (first, first_events) = play(7, 3);
    assert_eq!(first.len(), 3);
    for _ in 0..3 {
        let (again, events) = play(7, 3);
        assert_eq!(again, first);
        assert_eq!(events, first_events);
    }
}

#[test]
fn same_seed_same_snapshots() {
    let snapshots: Vec<_> = (0..3)
        .map(|_| {
            let mut table = Table::new(TableSettings::default(), 99, NoOpSink).unwrap();
            table.start_spin();
            let mut frames = Vec::new();
            for i in 0..600 {
                table.advance(FRAME_MS);
                if i % 50 == 0 {
                    frames.push(table.snapshot());
                }
            }
            frames
        })
        .collect();

    for run in &snapshots[1..] {
        assert_eq!(run, &snapshots[0]);
    }
}

#[test]
fn fixed_draws_reproduce_flight() {
    let draws = LaunchDraws {
        start_angle: 2.1,
        speed_scale: 0.9,
    };
    let paths: Vec<_> = (0..5)
        .map(|_| {
            let mut wheel =
                Wheel::new(WheelLayout::european(), WheelTuning::default(), SURFACE_SIZE);
            wheel.spin_with_scale(0.0, 0.85);
            let settle = SettleTuning::default();
            let mut ball = Ball::new(BallTuning::default(), settle, wheel.center());
            ball.launch_with(&wheel, draws, &mut NoOpSink);

            let mut now = 0.0;
            let mut path = Vec::new();
            for _ in 0..1000 {
                now += SUBSTEP_MS;
                wheel.tick(now);
                ball.tick(SUBSTEP_MS, &wheel, &mut NoOpSink);
                path.push(ball.pos);
            }
            path
        })
        .collect();

    for path in &paths[1..] {
        for (a, b) in paths[0].iter().zip(path.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
        }
    }
}
