use glam::Vec2;
use roulette_sim::consts::{SUBSTEP_MS, SURFACE_SIZE};
use roulette_sim::polar_to_cartesian;
use roulette_sim::settings::{BallTuning, SettleTuning, WheelTuning};
use roulette_sim::sim::{
    Ball, BallPhase, LaunchDraws, NoOpSink, PocketLanding, TableEvent, Wheel, WheelLayout, bounce,
    pocket_index_at, reflect,
};

fn wheel() -> Wheel {
    Wheel::new(WheelLayout::european(), WheelTuning::default(), SURFACE_SIZE)
}

#[test]
fn ball_at_five_and_a_half_sections_is_pocket_five() {
    let w = wheel();
    assert_eq!(w.pocket_count(), 37);
    assert_eq!(w.angle(), 0.0);
    let pos = w.center() + polar_to_cartesian(235.0, w.section_angle() * 5.5);
    assert_eq!(pocket_index_at(pos, w.center(), w.angle(), w.pocket_count()), 5);
}

#[test]
fn outer_wall_bounce_with_restitution() {
    let v = bounce(Vec2::new(3.0, 4.0), Vec2::new(1.0, 0.0), 0.6);
    assert!((v - Vec2::new(-1.8, 4.0)).length() < 1e-5);

    // The guarded form agrees when the normal faces the incoming ball
    let v = reflect(Vec2::new(3.0, 4.0), Vec2::new(-1.0, 0.0), 0.6);
    assert!((v - Vec2::new(-1.8, 4.0)).length() < 1e-5);
}

#[test]
fn settle_reaches_pocket_by_500ms() {
    let w = wheel();
    let tuning = SettleTuning::default();
    let mut landing = PocketLanding::commit(w.center() + Vec2::new(230.0, 1.0), &w);
    let mut pos = landing.landed_position + Vec2::new(0.0, 10.0);

    let mut elapsed = 0.0;
    while elapsed < 500.0 {
        pos = landing.settle(pos, SUBSTEP_MS, &tuning);
        elapsed += SUBSTEP_MS;
    }
    assert!(landing.final_position_reached);
    assert!(pos.distance(landing.landed_position) <= 0.5);
}

#[test]
fn settle_reports_result_once_at_800ms() {
    let w = wheel();
    let mut ball = Ball::new(BallTuning::default(), SettleTuning::default(), w.center());
    let draws = LaunchDraws {
        start_angle: 0.0,
        speed_scale: 1.0,
    };
    ball.launch_with(&w, draws, &mut NoOpSink);

    // Resting on the inner rail of a stopped wheel
    let rail = w.inner_radius() + ball.radius();
    ball.pos = w.center() + polar_to_cartesian(rail, w.section_angle() * 12.5);
    ball.vel = Vec2::ZERO;

    let mut events: Vec<TableEvent> = Vec::new();
    ball.tick(SUBSTEP_MS, &w, &mut events);
    assert_eq!(ball.phase(), BallPhase::Settling);
    assert_eq!(ball.pocket_index(), Some(12));

    for _ in 0..159 {
        ball.tick(SUBSTEP_MS, &w, &mut events);
    }
    assert_eq!(ball.phase(), BallPhase::Settling);
    ball.tick(SUBSTEP_MS, &w, &mut events);
    assert_eq!(ball.phase(), BallPhase::Finished);
    assert!(!ball.is_active());

    for _ in 0..100 {
        ball.tick(SUBSTEP_MS, &w, &mut events);
    }
    let results: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TableEvent::Result(r) => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].pocket_index, 12);
    assert_eq!(Some(results[0].number), w.layout().number(12));
    assert_eq!(Some(ball.pos), ball.landed_position());
}
