use tonal::{
    Approximation, Cents, ContinuedFractionParams, FractionTree, NeighborhoodParams,
    QuotientWalkParams, Ratio, Superpart, SuperparticularParams, TonalError, TreePathParams,
};

mod common;
use common::{distance, engine, init_logging, semitone, tuples};

#[test]
fn quotient_walk_of_semitone_with_prime_limit() {
    init_logging();

    let set = engine(semitone())
        .by_quotient_walk(&QuotientWalkParams {
            max_prime: Some(89),
            ..QuotientWalkParams::default()
        })
        .unwrap();

    // ascending value, so 17/16 (the widest) reads last
    assert_eq!(
        tuples(&set),
        vec![
            (18, 17),
            (196, 185),
            (89, 84),
            (71, 67),
            (53, 50),
            (35, 33),
            (17, 16),
        ]
    );
}

#[test]
fn fine_superparticulars_of_semitone_pass_64_bits() {
    init_logging();

    let set = engine(semitone())
        .by_superparticular(&SuperparticularParams {
            cents_tolerance: Cents::new(0.1),
            depth: Some(3),
            ..SuperparticularParams::default()
        })
        .unwrap();
    // n = 17312..=17314 times 4771397596969315/4503599627370496
    assert_eq!(set.len(), 3);
    assert!(set.iter().all(|r| r.antecedent() > u128::from(u64::MAX)));
    assert_eq!(
        set.max().map(|r| r.to_tuple()),
        Some((17_313 * 4_771_397_596_969_315, 17_312 * 4_503_599_627_370_496))
    );
    assert!(set.iter().all(|r| distance(r, &semitone()) <= 0.1));
}

#[test]
fn neighborhood_of_semitone_at_large_scales() {
    init_logging();

    let set = engine(semitone())
        .by_neighborhood(&NeighborhoodParams {
            max_prime: Some(23),
            max_boundary: 1,
            max_scale: 5000,
            ..NeighborhoodParams::default()
        })
        .unwrap();
    assert!(set
        .iter()
        .all(|r| r.max_prime().map_or(true, |p| p <= 23)));

    let points = engine(semitone()).neighborhood(5000, 1).unwrap();
    assert_eq!(points.len(), 9);
    assert_eq!(
        points.last().map(|r| r.to_tuple()),
        Some((5000 * 4_771_397_596_969_315 + 1, 5000 * 4_503_599_627_370_496 - 1))
    );
}

#[test]
fn superparticulars_of_fifth() {
    init_logging();

    let upper = engine(Ratio::new(3, 2))
        .by_superparticular(&SuperparticularParams {
            depth: Some(5),
            ..SuperparticularParams::default()
        })
        .unwrap();
    // n = 346..=350, read by ascending value
    assert_eq!(
        tuples(&upper),
        vec![
            (1053, 700),
            (1050, 698),
            (1047, 696),
            (1044, 694),
            (1041, 692)
        ]
    );

    let lower = engine(Ratio::new(3, 2))
        .by_superparticular(&SuperparticularParams {
            depth: Some(5),
            superpart: Superpart::Lower,
            ..SuperparticularParams::default()
        })
        .unwrap();
    assert_eq!(
        tuples(&lower),
        vec![
            (1038, 694),
            (1041, 696),
            (1044, 698),
            (1047, 700),
            (1050, 702)
        ]
    );
}

#[test]
fn neighborhood_of_fifth_with_prime_limit() {
    init_logging();

    let set = engine(Ratio::new(3, 2))
        .by_neighborhood(&NeighborhoodParams {
            max_prime: Some(23),
            cents_tolerance: Cents::new(5.0),
            max_boundary: 10,
            max_scale: 60,
            ..NeighborhoodParams::default()
        })
        .unwrap();
    assert_eq!(tuples(&set), vec![(175, 117), (176, 117)]);
}

#[test]
fn continued_fraction_of_trivial_ratios_is_the_ratio() {
    for ratio in [Ratio::UNISON, Ratio::OCTAVE] {
        let set = engine(ratio)
            .by_continued_fraction(&ContinuedFractionParams::default())
            .unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&ratio));
    }
}

#[test]
fn continued_fraction_of_six_nineteenths() {
    let target = Ratio::ed(19, 6).unwrap();
    let set = engine(target)
        .by_continued_fraction(&ContinuedFractionParams {
            cents_tolerance: Cents::new(10.0),
            ..ContinuedFractionParams::default()
        })
        .unwrap();

    assert_eq!(
        tuples(&set),
        vec![
            (56, 45),
            (117, 94),
            (9029, 7254),
            (2406114, 1933099),
            (2434315, 1955756),
            (28201, 22657),
            (1114, 895),
            (61, 49),
            (5, 4)
        ]
    );
    assert_eq!(
        set.max_primes(),
        [7, 47, 9029, 133673, 44449, 28201, 557, 61, 5].map(Some)
    );
    assert_eq!(set.min_primes(), [2, 2, 2, 2, 2, 139, 2, 7, 2].map(Some));
}

#[test]
fn sort_by_heights() {
    let target = Ratio::ed(19, 6).unwrap();
    let set = engine(target)
        .by_continued_fraction(&ContinuedFractionParams {
            cents_tolerance: Cents::new(10.0),
            ..ContinuedFractionParams::default()
        })
        .unwrap();
    let before = set.to_vec();
    let position = |sorted: &tonal::ApproximationSet| {
        sorted
            .iter()
            .position(|r| r.to_tuple() == (61, 49))
            .unwrap()
    };

    assert_eq!(position(&set.sort_by(|r| r.to_f64())), 7);
    assert_eq!(position(&set.sort_by(|r| r.benedetti_height())), 2);
    assert_eq!(position(&set.sort_by(|r| r.max_prime())), 3);
    assert_eq!(position(&set.sort_by(|r| r.wilson_height())), 3);
    assert_eq!(position(&set.sort_by(|r| r.weil_height())), 2);
    assert_eq!(position(&set.sort_by(|r| r.tenney_height())), 2);

    let by_max_prime = set.sort_by(|r| r.max_prime());
    assert_eq!(by_max_prime.entries()[0].to_tuple(), (5, 4));
    assert_eq!(by_max_prime.entries()[8].to_tuple(), (2406114, 1933099));

    assert_eq!(set.to_vec(), before);
}

#[test]
fn tree_path_and_quotient_walk_agree_on_semitone() {
    let tree = engine(semitone())
        .by_tree_path(&TreePathParams::default())
        .unwrap();
    let walk = engine(semitone())
        .by_quotient_walk(&QuotientWalkParams::default())
        .unwrap();
    assert_eq!(tree.to_vec(), walk.to_vec());
    assert_eq!(
        tuples(&tree),
        vec![
            (18, 17),
            (107, 101),
            (196, 185),
            (481, 454),
            (285, 269),
            (89, 84),
            (71, 67),
            (53, 50),
            (35, 33),
            (17, 16)
        ]
    );
}

#[test]
fn tree_path_brackets_the_target() {
    let target = semitone();
    let path: Vec<_> = FractionTree::path_to(&target).unwrap().collect();
    assert_eq!(path.len(), 204);

    for node in &path {
        assert!(node.lower <= target && target <= node.upper);
        assert!(node.lower < node.weight && node.weight < node.upper);
    }
    for pair in path.windows(2) {
        assert!(pair[0].lower <= pair[1].lower);
        assert!(pair[1].upper <= pair[0].upper);
    }
    assert_eq!(path.last().unwrap().weight, target);

    // distances do not shrink monotonically along a mediant path
    let close = distance(&Ratio::new(18, 17), &target);
    let child = distance(&Ratio::new(35, 33), &target);
    assert!(child > close);
}

#[test]
fn tolerance_is_compared_at_full_precision() {
    let fifth = Ratio::new(3, 2);
    let edge = Ratio::new(347, 346).to_cents();
    assert_eq!(edge.rounded(), 5.0);

    let just_inside = engine(fifth)
        .by_superparticular(&SuperparticularParams {
            depth: Some(1),
            cents_tolerance: edge + Cents::new(1e-9),
            ..SuperparticularParams::default()
        })
        .unwrap();
    assert_eq!(tuples(&just_inside), vec![(1041, 692)]);

    let just_outside = engine(fifth)
        .by_superparticular(&SuperparticularParams {
            depth: Some(1),
            cents_tolerance: edge - Cents::new(1e-9),
            ..SuperparticularParams::default()
        })
        .unwrap();
    assert_eq!((edge - Cents::new(1e-9)).rounded(), 5.0);
    assert_eq!(tuples(&just_outside), vec![(1044, 694)]);
}

#[test]
fn neighbors_of_a_lattice_point() {
    for away in 1..=3 {
        let points = Approximation::neighbors(Ratio::new(30, 20), away).unwrap();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0].to_tuple(), (30, 20));
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert_ne!(a.to_tuple(), b.to_tuple());
            }
        }
    }
}

#[test]
fn plain_neighborhood_is_unfiltered() {
    let points = engine(Ratio::new(3, 2)).neighborhood(256, 1).unwrap();
    assert_eq!(points.len(), 9);
    assert!(points.contains(&Ratio::new(3, 2)));
    assert!(points.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(points[0].to_tuple(), (767, 513));
    assert_eq!(points[8].to_tuple(), (769, 511));
}

#[test]
fn unbounded_superparticular_is_refused() {
    let result = engine(Ratio::new(3, 2)).by_superparticular(&SuperparticularParams {
        depth: None,
        ..SuperparticularParams::default()
    });
    assert!(matches!(result, Err(TonalError::UnboundedSearch { .. })));
}

#[test]
fn targets_from_ratio_like_values() {
    assert_eq!(Approximation::new(1.5).unwrap().ratio(), Ratio::new(3, 2));
    assert_eq!(Approximation::new(2u64).unwrap().ratio(), Ratio::OCTAVE);
    assert_eq!(
        Approximation::new((81u64, 80u64)).unwrap().ratio(),
        Ratio::new(81, 80)
    );
    assert_eq!(
        "1\\12".parse::<Ratio>().unwrap().approximate().unwrap().ratio(),
        semitone()
    );
    assert!(Approximation::new(0u64).is_err());
}
