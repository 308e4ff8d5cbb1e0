use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use morph_core::shapes::dispatcher::{build_targets, ShapeModel};
use morph_core::target::TargetField;
use rand::rngs::StdRng;
use rand::SeedableRng;

const COUNT: usize = 2048;

#[test]
fn test_regenerate_fills_every_slot() {
    let field = TargetField::new(COUNT);
    let mut rng = StdRng::seed_from_u64(1);
    for model in ShapeModel::ALL {
        field.regenerate(model, &[], 1.0, &mut rng);
        let snapshot = field.snapshot();
        assert_eq!(snapshot.model, model);
        assert_eq!(snapshot.points.len(), COUNT);
        assert!(snapshot.points.iter().all(|p| p.is_finite()));
    }
}

#[test]
fn test_reader_never_sees_mixed_models() {
    let mut rng = StdRng::seed_from_u64(2);
    let heart = build_targets(ShapeModel::Heart, COUNT, &[], 1.0, &mut rng);
    let flower = build_targets(ShapeModel::Flower, COUNT, &[], 1.0, &mut rng);

    let field = Arc::new(TargetField::new(COUNT));
    field.regenerate(ShapeModel::Heart, &[], 1.0, &mut rng);
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let field = Arc::clone(&field);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut rng = StdRng::seed_from_u64(3);
            for round in 0..200 {
                let model = if round % 2 == 0 { ShapeModel::Flower } else { ShapeModel::Heart };
                field.regenerate(model, &[], 1.0, &mut rng);
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let mut checked = 0;
    while !done.load(Ordering::SeqCst) || checked == 0 {
        let snapshot = field.snapshot();
        let expected = match snapshot.model {
            ShapeModel::Heart => &heart,
            ShapeModel::Flower => &flower,
            other => panic!("unexpected model {other}"),
        };
        assert_eq!(
            &snapshot.points[..],
            &expected[..],
            "generation {} mixes targets",
            snapshot.generation
        );
        checked += 1;
    }
    writer.join().unwrap();
    assert_eq!(field.snapshot().generation, 201);
}
