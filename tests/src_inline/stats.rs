use super::*;

#[test]
fn test_mean_std_population() {
    let (mu, sigma) = mean_std(&[10.0, 20.0, 30.0]);
    assert!((mu - 20.0).abs() < 1e-12);
    assert!((sigma - 8.164_965_809_277_26).abs() < 1e-9);
}

#[test]
fn test_mean_std_empty_and_constant() {
    assert_eq!(mean_std(&[]), (0.0, 0.0));
    let (mu, sigma) = mean_std(&[4.0, 4.0, 4.0]);
    assert_eq!(mu, 4.0);
    assert_eq!(sigma, 0.0);
}

#[test]
fn test_mean_std_at_f64_extremes() {
    let (mu, sigma) = mean_std(&[1e308, 1.5e308]);
    assert_eq!(mu, 1.25e308);
    assert!((sigma / 2.5e307 - 1.0).abs() < 1e-12);

    let (mu, sigma) = mean_std(&[1e-320, 2e-320]);
    assert!(mu > 0.0 && sigma > 0.0);
    assert!((sigma / mu - 1.0 / 3.0).abs() < 1e-3);
}

#[test]
fn test_range_scale_only_touches_extremes() {
    assert_eq!(range_scale(&[10.0, -20.0, 30.0]), 1.0);
    assert_eq!(range_scale(&[0.0, 0.0]), 1.0);
    assert_eq!(range_scale(&[1.0, f64::INFINITY]), 1.0);
    assert!(range_scale(&[1e308]) < 1.0);
    assert!(range_scale(&[1e-320]) > 1.0);
    let scaled = 1e-320 * range_scale(&[1e-320]);
    assert!(scaled.is_normal());
}

#[test]
fn test_weighted_mean() {
    let v = weighted_mean(&[1.0, 3.0], &[0.75, 0.25]).unwrap();
    assert!((v - 1.5).abs() < 1e-12);
    // Unnormalized weights divide by their own sum.
    let v = weighted_mean(&[1.0, 3.0], &[3.0, 1.0]).unwrap();
    assert!((v - 1.5).abs() < 1e-12);
    assert_eq!(weighted_mean(&[1.0, 3.0], &[0.0, 0.0]), None);
}

#[test]
fn test_normal_cdf_reference_values() {
    assert_eq!(normal_cdf(0.0), 0.5);
    assert_eq!(percentile(0.0), 50.0);
    assert!((normal_cdf(1.0) - 0.841_344_746_068_543).abs() < 1e-12);
    assert!((normal_cdf(-1.0) - 0.158_655_253_931_457).abs() < 1e-12);
    assert!((normal_cdf(1.959_963_984_540_054) - 0.975).abs() < 1e-12);
    assert!((normal_cdf(-3.0) - 0.001_349_898_031_630_1).abs() < 1e-12);
    assert!((normal_cdf(8.0) - 1.0).abs() < 1e-14);
    assert_eq!(normal_cdf(-40.0), 0.0);
    assert_eq!(normal_cdf(40.0), 1.0);
}

#[test]
fn test_normal_cdf_symmetry() {
    for &z in &[0.1, 0.5, 1.2247, 2.0, 3.3, 6.9, 7.5] {
        let sum = normal_cdf(z) + normal_cdf(-z);
        assert!((sum - 1.0).abs() < 1e-14, "z={z}");
    }
}

#[test]
fn test_percentile_strictly_increasing() {
    let zs = [-3.0, -1.5, -0.2, 0.0, 0.3, 1.1, 2.9];
    let ps: Vec<f64> = zs.iter().map(|&z| percentile(z)).collect();
    for pair in ps.windows(2) {
        assert!(pair[0] < pair[1], "{pair:?}");
    }
}

#[test]
fn test_percentile_three_point_scenario() {
    let z = 10.0 / 8.164_965_809_277_26;
    assert!((percentile(-z) - 11.0).abs() < 0.05);
    assert!((percentile(z) - 89.0).abs() < 0.05);
}
