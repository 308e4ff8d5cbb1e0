use glam::Vec3;
use morph_core::config::MorphConfig;
use morph_core::control::{HandData, NEUTRAL_SPAN};
use morph_core::render::Color;
use morph_core::shapes::dispatcher::ShapeModel;
use morph_core::shapes::glyph::AlphaMask;
use morph_core::shapes::primitives::shape_heart;
use morph_core::solver::Solver;
use morph_core::MorphError;

const DT: f32 = 1.0 / 60.0;

fn seeded(count: usize) -> Solver {
    Solver::new(MorphConfig {
        particle_count: count,
        seed: Some(7),
        ..MorphConfig::default()
    })
    .unwrap()
}

fn run(solver: &mut Solver, frames: u32) {
    for frame in 0..frames {
        solver.step(DT, frame as f32 * DT);
    }
}

fn open_hand(span: f32) -> HandData {
    HandData {
        is_open: span > 0.8,
        span,
        center_x: 0.5,
        center_y: 0.5,
    }
}

#[test]
fn test_heart_end_to_end() {
    let mut solver = seeded(8);
    solver.set_model(ShapeModel::Heart);
    solver.particles.position.fill(Vec3::ZERO);

    let targets = solver.targets();
    assert_eq!(targets.points.len(), 8);
    assert_eq!(targets.points[0], shape_heart(0.0));

    run(&mut solver, 50);

    for (i, p) in solver.particles.position.iter().enumerate() {
        assert!(p.is_finite(), "particle {i} is not finite");
        assert!(p.x.abs() <= 8.0 + 0.2, "particle {i} x = {}", p.x);
        assert!(p.y >= -8.5 - 0.2 && p.y <= 5.97 + 0.2, "particle {i} y = {}", p.y);
        assert!(p.z.abs() < 1e-6, "heart is flat, particle {i} z = {}", p.z);
    }
}

#[test]
fn test_particles_approach_targets() {
    let mut solver = seeded(500);
    solver.set_model(ShapeModel::Flower);
    run(&mut solver, 300);

    let targets = solver.targets();
    let avg_err: f32 = solver
        .particles
        .position
        .iter()
        .zip(targets.points.iter())
        .map(|(p, t)| (*p - *t).length())
        .sum::<f32>()
        / 500.0;
    assert!(avg_err < 0.2, "average distance to target {avg_err}");
}

#[test]
fn test_lengths_hold_across_model_switches() {
    let mut solver = seeded(300);
    for model in ShapeModel::ALL {
        solver.set_model(model);
        run(&mut solver, 3);
        assert_eq!(solver.model(), model);
        assert_eq!(solver.particles.position.len(), 300);
        assert_eq!(solver.targets().points.len(), 300);
        assert_eq!(solver.positions_flat().len(), 900);
        assert!(solver.particles.position.iter().all(|p| p.is_finite()));
    }
}

#[test]
fn test_model_switch_keeps_live_positions() {
    let mut solver = seeded(100);
    run(&mut solver, 10);
    let before = solver.particles.position.clone();
    solver.set_model(ShapeModel::Saturn);
    assert_eq!(solver.particles.position, before);
}

#[test]
fn test_hand_span_expands_shape() {
    let mut solver = seeded(200);
    solver.set_model(ShapeModel::Heart);
    solver.publish_hand(Some(open_hand(2.0)));
    assert_eq!(solver.control_value(), 2.0);
    run(&mut solver, 400);

    let targets = solver.targets();
    for (p, t) in solver.particles.position.iter().zip(targets.points.iter()) {
        assert!((*p - *t * 2.0).length() < 0.2, "{p:?} vs {:?}", *t * 2.0);
    }
}

#[test]
fn test_tracking_dropout_is_neutral() {
    let solver = seeded(10);
    let tracker = solver.control_cell();
    tracker.publish(Some(open_hand(0.3)));
    assert_eq!(solver.control_value(), 0.3);
    tracker.publish(None);
    assert_eq!(solver.control_value(), NEUTRAL_SPAN);
}

#[test]
fn test_text_models_rotate_slower() {
    let mut solver = seeded(50);
    solver.set_model(ShapeModel::Cake);
    run(&mut solver, 100);
    let shape_rotation = solver.rotation_y();

    solver.set_model(ShapeModel::BirthdayTextEn);
    run(&mut solver, 100);
    let text_rotation = solver.rotation_y() - shape_rotation;

    assert!((shape_rotation - 0.2).abs() < 1e-4, "{shape_rotation}");
    assert!((text_rotation - 0.05).abs() < 1e-4, "{text_rotation}");
    assert_eq!(solver.frame_count(), 200);
}

#[test]
fn test_frame_rate_independent_rotation() {
    let mut solver = Solver::new(MorphConfig {
        particle_count: 10,
        seed: Some(1),
        frame_rate_independent: true,
        ..MorphConfig::default()
    })
    .unwrap();
    for frame in 0..30 {
        solver.step(2.0 * DT, frame as f32 * 2.0 * DT);
    }
    assert!((solver.rotation_y() - 0.12).abs() < 1e-4, "{}", solver.rotation_y());
}

#[test]
fn test_missing_glyphs_fall_back_to_origin_then_host_mask_fills() {
    let mut solver = seeded(64);
    solver.set_model(ShapeModel::BirthdayText);
    assert!(solver.targets().points.iter().all(|p| *p == Vec3::ZERO));
    run(&mut solver, 5);
    assert!(solver.particles.position.iter().all(|p| p.is_finite()));

    let mut mask = AlphaMask::new(1200, 400);
    mask.fill_rect(400, 100, 400, 200, 255);
    solver.insert_text_mask(ShapeModel::BirthdayText, &mask).unwrap();
    let targets = solver.targets();
    assert!(targets.points.iter().all(|p| p.x.abs() <= 16.0 && p.y.abs() <= 8.0));
    assert!(targets.points.iter().any(|p| p.x != 0.0));
}

#[test]
fn test_insert_mask_rejects_geometric_model() {
    let mut solver = seeded(8);
    let mask = AlphaMask::new(4, 4);
    assert!(matches!(
        solver.insert_text_mask(ShapeModel::Heart, &mask),
        Err(MorphError::UnknownModel(_))
    ));
}

#[test]
fn test_greeting_change_regenerates_active_model() {
    let mut solver = seeded(256);
    solver.set_model(ShapeModel::GreetingText);
    let before = solver.targets().generation;
    solver.set_greeting("Hello", 90).unwrap();
    assert_eq!(solver.targets().generation, before + 1);
    assert!(solver.set_greeting("Hello", 0).is_err());
}

#[test]
fn test_greeting_edits_do_not_grow_glyph_cache() {
    let mut solver = seeded(32);
    let warmed = solver.glyph_cache().len();

    for (n, name) in ["Ada", "Grace", "Linus", "Ada"].into_iter().enumerate() {
        solver.set_greeting(name, 80 + n as u32).unwrap();
        assert_eq!(solver.glyph_cache().len(), warmed, "after greeting {name:?}");
        assert!(solver.glyph_cache().contains(name, 80 + n as u32));
    }
    assert!(!solver.glyph_cache().contains("Grace", 81));
}

#[test]
fn test_greeting_matching_builtin_text_keeps_builtin_table() {
    let mut solver = seeded(32);
    solver.set_greeting("Happy Birthday", 100).unwrap();
    solver.set_greeting("Bye", 80).unwrap();
    assert!(solver.glyph_cache().contains("Happy Birthday", 100));

    solver.set_model(ShapeModel::BirthdayTextEn);
    assert!(solver.targets().points.iter().any(|p| p.x != 0.0));
}

#[test]
fn test_color_update() {
    let mut solver = seeded(8);
    solver.set_color("#ff8800").unwrap();
    assert_eq!(solver.style.color, Color::from_hex("ff8800").unwrap());
    assert!(solver.set_color("orange").is_err());
    assert_eq!(solver.style.color.to_hex(), "#ff8800");
}

#[test]
fn test_invalid_config_rejected() {
    assert!(Solver::with_particle_count(0).is_err());
}

#[test]
fn test_seeded_runs_repeat() {
    let mut a = seeded(128);
    let mut b = seeded(128);
    a.set_model(ShapeModel::Fireworks);
    b.set_model(ShapeModel::Fireworks);
    run(&mut a, 20);
    run(&mut b, 20);
    assert_eq!(a.particles.position, b.particles.position);
}

#[test]
fn test_startup_scatter_and_reinitialize() {
    let mut solver = seeded(200);
    assert!(solver.particles.position.iter().all(|p| p.abs().max_element() <= 25.0));
    run(&mut solver, 10);
    solver.reinitialize();
    assert_eq!(solver.rotation_y(), 0.0);
    assert!(solver.particles.position.iter().all(|p| p.abs().max_element() <= 25.0));
}
