//! Properties of the dissimilarity index and the district ranking

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use segregation_rank::algorithm::segregation::{EligibilityCriteria, MIN_SCHOOLS};
use segregation_rank::{
    ComparisonMode, District, Selector, SizeThreshold, dissimilarity_index, rank_districts,
    rank_districts_with,
};

use crate::utils::{Counts, district, school};

const EPSILON: f64 = 1e-9;

/// Random school whose total covers every group
fn random_counts(rng: &mut StdRng) -> Counts {
    let hispanic = rng.random_range(0..400);
    let white = rng.random_range(0..400);
    let asian = rng.random_range(0..200);
    let black = rng.random_range(0..200);
    let other = rng.random_range(0..100);
    [hispanic, white, asian, black, hispanic + white + asian + black + other]
}

fn random_district(rng: &mut StdRng, schools: usize) -> Vec<Counts> {
    (0..schools).map(|_| random_counts(rng)).collect()
}

#[test]
fn test_index_is_invariant_under_school_order() {
    let mut rng = StdRng::seed_from_u64(17);
    for trial in 0..50 {
        let id = format!("d{trial}");
        let mut counts = random_district(&mut rng, 6);
        let in_order = district(&id, &counts);
        counts.shuffle(&mut rng);
        let shuffled = district(&id, &counts);

        for mode in ComparisonMode::all() {
            let a = dissimilarity_index(&in_order, *mode);
            let b = dissimilarity_index(&shuffled, *mode);
            match (a, b) {
                (Some(a), Some(b)) => assert!((a - b).abs() < EPSILON, "{mode}: {a} vs {b}"),
                (None, None) => {}
                other => panic!("{mode}: computability changed under permutation: {other:?}"),
            }
        }
    }
}

#[test]
fn test_rest_modes_are_bounded() {
    let mut rng = StdRng::seed_from_u64(99);
    let rest_modes: Vec<ComparisonMode> = ComparisonMode::all()
        .iter()
        .copied()
        .filter(|m| m.is_partition())
        .collect();
    assert_eq!(rest_modes.len(), 4);

    for trial in 0..200 {
        let id = format!("d{trial}");
        let schools = rng.random_range(2..10);
        let d = district(&id, &random_district(&mut rng, schools));
        for mode in &rest_modes {
            if let Some(index) = dissimilarity_index(&d, *mode) {
                assert!((-EPSILON..=1.0 + EPSILON).contains(&index), "{mode}: {index}");
            }
        }
    }
}

#[test]
fn test_direct_modes_compare_two_groups() {
    // White and Hispanic fully separated
    let d = district("direct", &[[0, 100, 0, 0, 100], [100, 0, 0, 0, 100]]);
    let index = dissimilarity_index(&d, ComparisonMode::WhiteVsHispanic).unwrap();
    assert!((index - 1.0).abs() < EPSILON);

    let mut rng = StdRng::seed_from_u64(5);
    for trial in 0..100 {
        let id = format!("d{trial}");
        let d = district(&id, &random_district(&mut rng, 4));
        for mode in [ComparisonMode::AsianVsHispanic, ComparisonMode::WhiteVsHispanic] {
            if let Some(index) = dissimilarity_index(&d, mode) {
                assert!((-EPSILON..=1.0 + EPSILON).contains(&index), "{mode}: {index}");
            }
        }
    }
}

#[test]
fn test_identical_schools_score_zero() {
    let counts: Counts = [120, 80, 40, 30, 300];
    let d = district("twin", &[counts, counts]);
    for mode in ComparisonMode::all() {
        let index = dissimilarity_index(&d, *mode).unwrap();
        assert!(index.abs() < EPSILON, "{mode}: {index}");
    }
}

#[test]
fn test_worked_example() {
    let d = district("D", &[[50, 0, 0, 0, 200], [150, 0, 0, 0, 200]]);
    let index = dissimilarity_index(&d, ComparisonMode::HispanicVsRest).unwrap();
    assert!((index - 0.5).abs() < EPSILON);

    // 400 students is below the small threshold
    let ranked = rank_districts(
        std::slice::from_ref(&d),
        ComparisonMode::HispanicVsRest,
        SizeThreshold::Small,
    );
    assert!(ranked.is_empty());

    let lowered = EligibilityCriteria {
        min_schools: MIN_SCHOOLS,
        min_enrollment: 400,
    };
    let ranked = rank_districts_with(&[d], ComparisonMode::HispanicVsRest, &lowered);
    assert_eq!(ranked.len(), 1);
}

#[test]
fn test_zero_total_is_not_computable() {
    let d = district("empty", &[[0, 0, 0, 0, 0], [0, 0, 0, 0, 0]]);
    for mode in ComparisonMode::all() {
        assert_eq!(dissimilarity_index(&d, *mode), None);
    }
}

#[test]
fn test_single_school_district_never_ranked() {
    let solo = District::try_from_schools(vec![school("solo", [5_000, 5_000, 0, 0, 20_000])])
        .unwrap();
    assert!(dissimilarity_index(&solo, ComparisonMode::HispanicVsRest).is_some());

    for size in SizeThreshold::all() {
        let ranked = rank_districts(
            std::slice::from_ref(&solo),
            ComparisonMode::HispanicVsRest,
            *size,
        );
        assert!(ranked.is_empty());
    }
}

#[test]
fn test_equal_indices_keep_input_order() {
    let criteria = EligibilityCriteria {
        min_schools: MIN_SCHOOLS,
        min_enrollment: 0,
    };
    let ids = ["e", "a", "d", "b", "c"];
    let districts: Vec<District> = ids
        .iter()
        .map(|id| district(id, &[[50, 0, 0, 0, 200], [150, 0, 0, 0, 200]]))
        .collect();

    let ranked = rank_districts_with(&districts, ComparisonMode::HispanicVsRest, &criteria);
    let order: Vec<&str> = ranked.results().iter().map(|r| r.district_id.as_str()).collect();
    assert_eq!(order, ids);
}

#[test]
fn test_ranking_is_descending() {
    let mut rng = StdRng::seed_from_u64(2024);
    let districts: Vec<District> = (0..40)
        .map(|i| {
            let id = format!("d{i}");
            district(&id, &random_district(&mut rng, 5))
        })
        .collect();

    let ranked = rank_districts(
        &districts,
        ComparisonMode::BlackHispanicVsRest,
        SizeThreshold::Small,
    );
    assert!(!ranked.is_empty());
    for pair in ranked.results().windows(2) {
        assert!(pair[0].dissimilarity_index >= pair[1].dissimilarity_index);
    }
}
