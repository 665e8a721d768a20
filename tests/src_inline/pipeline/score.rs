use super::*;

fn spectrum(id: &str, wavelengths: &[f64], absorbances: &[f64]) -> Spectrum {
    Spectrum::new(id, wavelengths.to_vec(), absorbances.to_vec())
}

fn baseline() -> Spectrum {
    spectrum(
        "baseline",
        &[4000.0, 3000.0, 2000.0, 1000.0],
        &[0.1, 0.2, 0.3, 0.4],
    )
}

fn zone(min: f64, max: f64, weight: f64, key: &str) -> Zone {
    Zone {
        min_wavelength: min,
        max_wavelength: max,
        weight_percent: weight,
        label: key.to_uppercase(),
        key: key.to_string(),
    }
}

const ALL_METHODS: [ScoreMethod; 4] = [
    ScoreMethod::Rmse,
    ScoreMethod::Pearson,
    ScoreMethod::Area,
    ScoreMethod::Hybrid,
];

#[test]
fn test_identical_sample_scores_100_all_methods() {
    let b = baseline();
    let mut s = b.clone();
    s.id = "s1".to_string();
    for method in ALL_METHODS {
        let value = score(&b, &s, &[], method, PearsonMapping::Shifted).unwrap();
        assert!(
            (value - 100.0).abs() < 1e-9,
            "{}: got {value}",
            method.as_str()
        );
    }
}

#[test]
fn test_scores_stay_in_range() {
    let b = baseline();
    let samples = [
        spectrum("flat", &[4000.0, 3000.0, 2000.0, 1000.0], &[5.0, 5.0, 5.0, 5.0]),
        spectrum(
            "inverted",
            &[4000.0, 3000.0, 2000.0, 1000.0],
            &[0.4, 0.3, 0.2, 0.1],
        ),
        spectrum(
            "huge",
            &[4000.0, 3000.0, 2000.0, 1000.0],
            &[100.0, -100.0, 100.0, -100.0],
        ),
    ];
    for method in ALL_METHODS {
        for mapping in [PearsonMapping::Shifted, PearsonMapping::Direct] {
            for s in &samples {
                let value = score(&b, s, &[], method, mapping).unwrap();
                assert!(
                    (0.0..=100.0).contains(&value),
                    "{} {} {}: got {value}",
                    method.as_str(),
                    mapping.as_str(),
                    s.id
                );
            }
        }
    }
}

#[test]
fn test_uniform_offset_rmse_tail_score() {
    // +1.0 everywhere at unit weight: weighted RMSE = 1.0, deep in the
    // exponential band: 40 * exp(-(1.0 - 0.5) / 0.3) ~ 7.56.
    let b = baseline();
    let s = spectrum(
        "s1",
        &[4000.0, 3000.0, 2000.0, 1000.0],
        &[1.1, 1.2, 1.3, 1.4],
    );
    let value = score(&b, &s, &[], ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    let expected = 40.0 * (-(1.0 - 0.5) / 0.3f64).exp();
    assert!((value - expected).abs() < 1e-9);
    assert!((value - 7.56).abs() < 0.01);
}

#[test]
fn test_uniform_offset_keeps_correlation_hybrid_equals_rmse() {
    // A constant offset leaves r = 1, so the hybrid penalty is zero and the
    // hybrid score collapses onto the RMSE score.
    let b = baseline();
    let s = spectrum(
        "s1",
        &[4000.0, 3000.0, 2000.0, 1000.0],
        &[1.1, 1.2, 1.3, 1.4],
    );
    let rmse = score(&b, &s, &[], ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    let hybrid = score(&b, &s, &[], ScoreMethod::Hybrid, PearsonMapping::Shifted).unwrap();
    assert_eq!(rmse.to_bits(), hybrid.to_bits());
}

#[test]
fn test_insufficient_overlap_neutral_fallback() {
    let b = baseline();
    let none = spectrum("none", &[9000.0, 8000.0], &[0.1, 0.2]);
    let one = spectrum("one", &[4000.0, 8000.0], &[0.1, 0.2]);
    for method in ALL_METHODS {
        for s in [&none, &one] {
            let outcome = score_outcome(&b, s, &[], method, PearsonMapping::Shifted).unwrap();
            assert_eq!(outcome.score, NEUTRAL_SCORE, "{}", method.as_str());
            assert_eq!(outcome.flags, vec![Flag::InsufficientOverlap]);
        }
    }
}

#[test]
fn test_zero_total_weight_neutral_fallback() {
    let b = baseline();
    let mut s = b.clone();
    s.id = "s1".to_string();
    let zones = vec![zone(500.0, 5000.0, 0.0, "masked")];
    for method in ALL_METHODS {
        let outcome = score_outcome(&b, &s, &zones, method, PearsonMapping::Shifted).unwrap();
        assert_eq!(outcome.score, NEUTRAL_SCORE, "{}", method.as_str());
        assert!(outcome.flags.contains(&Flag::ZeroWeight));
    }
}

#[test]
fn test_zone_weighting_masks_deviation() {
    // All of the deviation sits in a zero-weighted zone, so the weighted
    // RMSE sees nothing.
    let b = spectrum("baseline", &[1000.0, 2000.0], &[0.0, 0.0]);
    let s = spectrum("s1", &[1000.0, 2000.0], &[1.0, 0.0]);
    let zones = vec![zone(900.0, 1100.0, 0.0, "masked")];
    let masked = score(&b, &s, &zones, ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    let unmasked = score(&b, &s, &[], ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    assert_eq!(masked, 100.0);
    assert!(unmasked < masked);
}

#[test]
fn test_pearson_mappings_diverge_on_negative_correlation() {
    let b = spectrum("baseline", &[1.0, 2.0, 3.0], &[0.0, 1.0, 2.0]);
    let s = spectrum("s1", &[1.0, 2.0, 3.0], &[2.0, 2.5, 0.0]);

    let points = align(&b, &s).unwrap();
    let weights = vec![1.0; points.len()];
    let r = weighted_pearson(&points, &weights).unwrap().r;
    assert!(r < 0.0);

    let shifted = score(&b, &s, &[], ScoreMethod::Pearson, PearsonMapping::Shifted).unwrap();
    let direct = score(&b, &s, &[], ScoreMethod::Pearson, PearsonMapping::Direct).unwrap();
    assert!((shifted - (r + 1.0) / 2.0 * 100.0).abs() < 1e-9);
    assert_eq!(direct, 0.0);
    assert!(shifted > direct);
}

#[test]
fn test_pearson_zero_variance_fallback() {
    let b = spectrum("baseline", &[1.0, 2.0, 3.0], &[0.5, 0.5, 0.5]);
    let s = spectrum("s1", &[1.0, 2.0, 3.0], &[0.1, 0.7, 0.3]);
    let outcome = score_outcome(&b, &s, &[], ScoreMethod::Pearson, PearsonMapping::Shifted).unwrap();
    // r = 0 under the shifted mapping is the neutral midpoint.
    assert_eq!(outcome.score, 50.0);
    assert_eq!(outcome.flags, vec![Flag::ZeroVariance]);

    let direct = score(&b, &s, &[], ScoreMethod::Pearson, PearsonMapping::Direct).unwrap();
    assert_eq!(direct, 0.0);
}

#[test]
fn test_area_hand_computed() {
    let b = spectrum("baseline", &[1000.0, 1100.0, 1200.0], &[0.0, 0.0, 0.0]);
    let s = spectrum("s1", &[1000.0, 1100.0, 1200.0], &[0.5, 1.0, 0.5]);
    // Pairs: 1.0 * 100 * avg(0.5, 1.0) + 1.0 * 100 * avg(1.0, 0.5) = 150.
    // 150 sits in the (50, 200] band: 70 + 20 * (1 - 100/150).
    let value = score(&b, &s, &[], ScoreMethod::Area, PearsonMapping::Shifted).unwrap();
    let expected = 70.0 + 20.0 * (1.0 - 100.0 / 150.0);
    assert!((value - expected).abs() < 1e-9);
}

#[test]
fn test_area_direction_independent() {
    let ascending = spectrum("baseline", &[1000.0, 1100.0, 1200.0], &[0.0, 0.0, 0.0]);
    let s_asc = spectrum("s1", &[1000.0, 1100.0, 1200.0], &[0.5, 1.0, 0.5]);
    let descending = spectrum("baseline", &[1200.0, 1100.0, 1000.0], &[0.0, 0.0, 0.0]);
    let s_desc = spectrum("s1", &[1200.0, 1100.0, 1000.0], &[0.5, 1.0, 0.5]);
    let a = score(&ascending, &s_asc, &[], ScoreMethod::Area, PearsonMapping::Shifted).unwrap();
    let b = score(
        &descending,
        &s_desc,
        &[],
        ScoreMethod::Area,
        PearsonMapping::Shifted,
    )
    .unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn test_correlation_penalty_branches() {
    assert_eq!(correlation_penalty(1.0), 0.0);
    assert_eq!(correlation_penalty(0.95), 0.0);
    assert!((correlation_penalty(0.92) - 4.5).abs() < 1e-12);
    // The observed step at the strong knot: 7.5 at r = 0.90, near zero just
    // below it.
    assert!((correlation_penalty(0.90) - 7.5).abs() < 1e-12);
    assert!(correlation_penalty(0.89999) < 0.01);
    assert!((correlation_penalty(0.45) - 7.5).abs() < 1e-12);
    assert!((correlation_penalty(0.0) - 15.0).abs() < 1e-12);
    assert!(correlation_penalty(-1.0) > 15.0);
}

#[test]
fn test_hybrid_applies_penalty() {
    // Shape distortion: low RMSE but imperfect correlation draws a penalty.
    let b = spectrum("baseline", &[1.0, 2.0, 3.0, 4.0], &[0.10, 0.20, 0.10, 0.20]);
    let s = spectrum("s1", &[1.0, 2.0, 3.0, 4.0], &[0.20, 0.10, 0.20, 0.10]);
    let points = align(&b, &s).unwrap();
    let weights = vec![1.0; points.len()];
    let r = weighted_pearson(&points, &weights).unwrap().r;
    assert!(r < 0.90);

    let rmse = score(&b, &s, &[], ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    let hybrid = score(&b, &s, &[], ScoreMethod::Hybrid, PearsonMapping::Shifted).unwrap();
    let expected = (rmse - correlation_penalty(r)).clamp(0.0, 100.0);
    assert!((hybrid - expected).abs() < 1e-9);
    assert!(hybrid < rmse);
}

#[test]
fn test_partial_overlap_flag() {
    let b = baseline();
    let s = spectrum(
        "s1",
        &[4000.0, 3000.0, 7000.0, 8000.0, 9000.0],
        &[0.1, 0.2, 0.3, 0.4, 0.5],
    );
    let outcome = score_outcome(&b, &s, &[], ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    assert!(outcome.flags.contains(&Flag::PartialOverlap));
}

#[test]
fn test_unweighted_region_flag() {
    let b = baseline();
    let mut s = b.clone();
    s.id = "s1".to_string();
    let zones = vec![zone(3500.0, 4500.0, 80.0, "hydroxyl")];
    let outcome = score_outcome(&b, &s, &zones, ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    assert!(outcome.flags.contains(&Flag::UnweightedRegion));

    // Full coverage never raises it.
    let covered = vec![zone(500.0, 5000.0, 80.0, "all")];
    let outcome =
        score_outcome(&b, &s, &covered, ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    assert!(!outcome.flags.contains(&Flag::UnweightedRegion));
}

#[test]
fn test_flags_in_stable_order() {
    let b = baseline();
    // Two matched points out of five, against a masking zone: several flags
    // at once, reported in the declaration order.
    let s = spectrum(
        "s1",
        &[4000.0, 3000.0, 7000.0, 8000.0, 9000.0],
        &[0.1, 0.2, 0.3, 0.4, 0.5],
    );
    let zones = vec![zone(2900.0, 4100.0, 0.0, "masked")];
    let outcome = score_outcome(&b, &s, &zones, ScoreMethod::Rmse, PearsonMapping::Shifted).unwrap();
    assert_eq!(outcome.flags, vec![Flag::PartialOverlap, Flag::ZeroWeight]);
}

#[test]
fn test_compute_scores_batch_skips_invalid_sample() {
    let b = baseline();
    let mut good = b.clone();
    good.id = "good".to_string();
    let bad = Spectrum::new("bad", vec![4000.0, 3000.0], vec![0.1]);
    let mut good2 = b.clone();
    good2.id = "good2".to_string();

    let results = compute_scores(
        &b,
        &[good, bad, good2],
        &[],
        ScoreMethod::Rmse,
        PearsonMapping::Shifted,
    )
    .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].sample_id, "good");
    assert_eq!(results[1].sample_id, "good2");
    assert!((results[0].score - 100.0).abs() < 1e-9);
}

#[test]
fn test_compute_scores_invalid_baseline_is_error() {
    let bad_baseline = Spectrum::new("baseline", vec![4000.0], vec![]);
    let s = spectrum("s1", &[4000.0], &[0.1]);
    assert!(
        compute_scores(
            &bad_baseline,
            &[s],
            &[],
            ScoreMethod::Rmse,
            PearsonMapping::Shifted
        )
        .is_err()
    );
}

#[test]
fn test_determinism_bits() {
    let b = baseline();
    let s = spectrum(
        "s1",
        &[4000.0, 3000.0, 2000.0, 1000.0],
        &[0.13, 0.27, 0.31, 0.49],
    );
    let zones = vec![zone(1500.0, 3500.0, 65.0, "mid")];
    for method in ALL_METHODS {
        let a = score(&b, &s, &zones, method, PearsonMapping::Shifted).unwrap();
        let c = score(&b, &s, &zones, method, PearsonMapping::Shifted).unwrap();
        assert_eq!(a.to_bits(), c.to_bits(), "{}", method.as_str());
    }
}
