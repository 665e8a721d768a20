use super::*;

fn spectrum(id: &str, wavelengths: &[f64], absorbances: &[f64]) -> Spectrum {
    Spectrum::new(id, wavelengths.to_vec(), absorbances.to_vec())
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

#[test]
fn test_baseline_delta_magnitude_for_non_area_methods() {
    let baseline = spectrum("baseline", &[1000.0, 2000.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[1000.0, 2000.0], &[0.5, -1.0]);
    for method in [ScoreMethod::Rmse, ScoreMethod::Pearson, ScoreMethod::Hybrid] {
        let profile = build_profile(&baseline, &[s1.clone()], "s1", &[], method).unwrap();
        assert_eq!(profile.wavelengths, vec![1000.0, 2000.0]);
        assert_eq!(profile.deviations, vec![0.5, 1.0]);
        assert_eq!(profile.max_deviation, 1.0);
        assert!((profile.avg_deviation - 0.75).abs() < 1e-12);
    }
}

#[test]
fn test_zone_weights_scale_deviations() {
    let baseline = spectrum("baseline", &[1000.0, 2000.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[1000.0, 2000.0], &[0.5, -1.0]);
    let zones = vec![zone(1500.0, 2500.0, 50.0, "upper")];
    let profile = build_profile(&baseline, &[s1], "s1", &zones, ScoreMethod::Rmse).unwrap();
    assert_eq!(profile.deviations, vec![0.5, 0.5]);
    assert_eq!(profile.max_deviation, 0.5);
}

#[test]
fn test_area_method_deviates_from_cross_sample_mean() {
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[100.0, 200.0], &[1.0, 3.0]);
    let s2 = spectrum("s2", &[100.0, 200.0], &[3.0, 1.0]);

    // Cross-sample mean delta is 2.0 at both wavelengths.
    let area = build_profile(
        &baseline,
        &[s1.clone(), s2.clone()],
        "s1",
        &[],
        ScoreMethod::Area,
    )
    .unwrap();
    assert_eq!(area.deviations, vec![1.0, 1.0]);

    // The other methods ignore the sibling samples entirely.
    let rmse = build_profile(&baseline, &[s1, s2], "s1", &[], ScoreMethod::Rmse).unwrap();
    assert_eq!(rmse.deviations, vec![1.0, 3.0]);
}

#[test]
fn test_area_method_single_sample_is_flat() {
    // Alone in the set, the selected sample equals the mean: all zeros.
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[100.0, 200.0], &[1.0, 3.0]);
    let profile = build_profile(&baseline, &[s1], "s1", &[], ScoreMethod::Area).unwrap();
    assert_eq!(profile.deviations, vec![0.0, 0.0]);
    assert_eq!(profile.max_deviation, 0.0);
    assert_eq!(profile.avg_deviation, 0.0);
}

#[test]
fn test_area_mean_only_over_samples_present_at_wavelength() {
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[100.0, 200.0], &[1.0, 3.0]);
    // s2 only covers 100: mean at 100 is (1+3)/2 = 2, at 200 it is s1 alone.
    let s2 = spectrum("s2", &[100.0], &[3.0]);
    let profile =
        build_profile(&baseline, &[s1, s2], "s1", &[], ScoreMethod::Area).unwrap();
    assert_eq!(profile.deviations, vec![1.0, 0.0]);
}

#[test]
fn test_empty_sample_set_empty_profile() {
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let profile = build_profile(&baseline, &[], "s1", &[], ScoreMethod::Rmse).unwrap();
    assert!(profile.is_empty());
    assert_eq!(profile.max_deviation, 0.0);
    assert_eq!(profile.avg_deviation, 0.0);
}

#[test]
fn test_unknown_selected_id_empty_profile() {
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[100.0, 200.0], &[1.0, 3.0]);
    let profile = build_profile(&baseline, &[s1], "nope", &[], ScoreMethod::Rmse).unwrap();
    assert!(profile.is_empty());
}

#[test]
fn test_selected_without_overlap_empty_profile() {
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[900.0, 800.0], &[1.0, 3.0]);
    let profile = build_profile(&baseline, &[s1], "s1", &[], ScoreMethod::Area).unwrap();
    assert!(profile.is_empty());
    assert_eq!(profile.max_deviation, 0.0);
}

#[test]
fn test_invalid_baseline_is_error() {
    let baseline = Spectrum::new("baseline", vec![100.0], vec![]);
    let s1 = spectrum("s1", &[100.0], &[1.0]);
    assert!(build_profile(&baseline, &[s1], "s1", &[], ScoreMethod::Rmse).is_err());
}

#[test]
fn test_invalid_selected_sample_is_error() {
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let bad = Spectrum::new("bad", vec![100.0, 200.0], vec![1.0]);
    assert!(build_profile(&baseline, &[bad], "bad", &[], ScoreMethod::Rmse).is_err());
}

#[test]
fn test_invalid_sibling_sample_skipped_from_mean() {
    let baseline = spectrum("baseline", &[100.0, 200.0], &[0.0, 0.0]);
    let s1 = spectrum("s1", &[100.0, 200.0], &[1.0, 3.0]);
    let bad = Spectrum::new("bad", vec![100.0, 200.0], vec![1.0]);
    // With the malformed sibling dropped, s1 is alone and the area-method
    // deviations collapse to zero.
    let profile =
        build_profile(&baseline, &[s1, bad], "s1", &[], ScoreMethod::Area).unwrap();
    assert_eq!(profile.deviations, vec![0.0, 0.0]);
}
