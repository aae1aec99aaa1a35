//! Invariants that hold across many inputs.

use fuzzsim_core::prelude::*;

/// Deterministic pseudo-random grid.
fn noise(w: usize, h: usize, seed: u64) -> GrayGrid {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    GrayGrid::from_fn(w, h, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 56) as u8
    })
}

fn sample_pairs() -> Vec<(GrayGrid, GrayGrid)> {
    let mut pairs = Vec::new();
    for seed in 0..12u64 {
        let w1 = 1 + (seed as usize * 7) % 13;
        let h1 = 1 + (seed as usize * 5) % 11;
        let w2 = 2 + (seed as usize * 3) % 9;
        let h2 = 2 + (seed as usize * 11) % 8;
        pairs.push((noise(w1, h1, seed), noise(w2, h2, seed + 100)));
    }
    pairs.push((GrayGrid::uniform(8, 8, 0), GrayGrid::uniform(8, 8, 255)));
    pairs.push((GrayGrid::uniform(3, 3, 10), noise(20, 20, 7)));
    pairs
}

#[test]
fn intensity_difference_is_symmetric() {
    for (a, b) in sample_pairs() {
        let ab = compute_intensity_difference(&a, &b).unwrap();
        let ba = compute_intensity_difference(&b, &a).unwrap();
        assert_eq!(ab, ba);
        assert!((0.0..=255.0).contains(&ab));
    }
}

#[test]
fn edge_similarity_stays_in_range() {
    for (a, b) in sample_pairs() {
        let e = compute_edge_similarity(&a, &b).unwrap();
        assert!((1.0..=100.0).contains(&e), "edge similarity {} out of range", e);
    }
}

#[test]
fn identity_shortcut_for_every_grid() {
    let sys = SimilaritySystem::new();
    for (a, _) in sample_pairs() {
        assert_eq!(compute_edge_similarity(&a, &a).unwrap(), 100.0);
        assert!(sys.compare(&a, &a).unwrap().is_identical());
    }
}

#[test]
fn memberships_stay_in_unit_interval() {
    for var in Variable::ALL {
        let model = MembershipModel::new(var);
        for x in model.universe() {
            for label in Label::ALL {
                let d = model.degree(label, x);
                assert!((0.0..=1.0).contains(&d), "{} {} at {} = {}", var, label, x, d);
            }
        }
    }
}

#[test]
fn scores_stay_in_range() {
    let sys = SimilaritySystem::new();
    for (a, b) in sample_pairs() {
        match sys.compare(&a, &b) {
            Ok(c) => {
                if let Some(s) = c.similarity() {
                    assert!((0.0..=100.0).contains(&s), "score {} out of range", s);
                }
            }
            // a silent rule base is a legitimate outcome, never NaN
            Err(SimilarityError::Defuzzification(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}

#[test]
fn repeated_evaluation_is_bitwise_identical() {
    let sys = SimilaritySystem::new();
    let a = noise(9, 6, 1);
    let b = noise(6, 9, 2);
    let first = sys.compare(&a, &b);
    for _ in 0..5 {
        let again = sys.compare(&a, &b);
        match (&first, &again) {
            (Ok(x), Ok(y)) => assert_eq!(
                x.similarity().map(f64::to_bits),
                y.similarity().map(f64::to_bits)
            ),
            (Err(x), Err(y)) => assert_eq!(x, y),
            _ => panic!("outcome changed between runs"),
        }
    }

    let fresh = SimilaritySystem::new();
    assert_eq!(
        sys.compute_similarity(40.0, 20.0).unwrap().to_bits(),
        fresh.compute_similarity(40.0, 20.0).unwrap().to_bits()
    );
}

#[test]
fn growing_intensity_difference_never_raises_the_score() {
    let sys = SimilaritySystem::new();
    let mut prev = f64::INFINITY;
    for diff in (0..=250).step_by(10) {
        let s = sys.compute_similarity(diff as f64, 30.0).unwrap();
        assert!(s <= prev + 1e-9, "score rose to {} at diff {}", s, diff);
        prev = s;
    }
}

#[test]
fn growing_edge_similarity_follows_rule_base() {
    // The rule base pairs low edge agreement with high similarity, so with
    // the intensity difference held fixed the score falls as edges agree.
    let sys = SimilaritySystem::new();
    let mut prev = f64::INFINITY;
    for edge in (0..=95).step_by(5) {
        let s = sys.compute_similarity(60.0, edge as f64).unwrap();
        assert!(s <= prev + 1e-9, "score rose to {} at edge {}", s, edge);
        prev = s;
    }
}

#[test]
fn zero_distribution_is_rejected() {
    let engine = RuleEngine::new();
    let silent = engine.aggregate(&FiringResult::default());
    assert_eq!(silent.area(), 0.0);
    assert!(matches!(
        centroid(&silent),
        Err(SimilarityError::Defuzzification(_))
    ));
}

#[test]
fn system_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SimilaritySystem>();

    let sys = SimilaritySystem::new();
    let inputs: Vec<(f64, f64)> = (0..8).map(|i| (i as f64 * 20.0, 10.0 + i as f64 * 5.0)).collect();
    let sequential: Vec<_> = inputs
        .iter()
        .map(|&(i, e)| sys.compute_similarity(i, e).ok())
        .collect();

    let parallel: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|&(i, e)| {
                let sys = &sys;
                s.spawn(move || sys.compute_similarity(i, e).ok())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}
