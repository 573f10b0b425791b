/// Population mean and standard deviation. Empty input yields `(0.0, 0.0)`.
///
/// Values are first brought into a safe magnitude range by an exact power-of-two factor,
/// so huge inputs do not overflow the sums and subnormal ones do not underflow the squares.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let scale = range_scale(values);
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v * scale).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| {
            let d = v * scale - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean / scale, var.sqrt() / scale)
}

const SAFE_MAGNITUDE_EXP: i32 = 256;
const RESCALE_EXP: i32 = 600;

/// Power of two that moves the largest magnitude of `values` into
/// `[2^-256, 2^256]` when it lies outside. Returns `1.0` for values already in range,
/// all zeros, or non-finite input.
pub fn range_scale(values: &[f64]) -> f64 {
    let max = values.iter().fold(0.0f64, |m, &v| m.max(v.abs()));
    if !max.is_finite() || max == 0.0 {
        return 1.0;
    }
    if max > 2f64.powi(SAFE_MAGNITUDE_EXP) {
        1.0 / 2f64.powi(RESCALE_EXP)
    } else if max < 1.0 / 2f64.powi(SAFE_MAGNITUDE_EXP) {
        2f64.powi(RESCALE_EXP)
    } else {
        1.0
    }
}

/// Weighted arithmetic mean. Returns `None` when the weights sum to zero.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Option<f64> {
    debug_assert_eq!(values.len(), weights.len());
    let mut num = 0.0f64;
    let mut den = 0.0f64;
    for (&v, &w) in values.iter().zip(weights) {
        num += v * w;
        den += w;
    }
    if den == 0.0 { None } else { Some(num / den) }
}

const SQRT_2PI: f64 = 2.506628274631;

/// Standard normal cumulative distribution function.
///
/// Hart's double precision rational approximation (as given by West, 2005); absolute
/// error is below 1e-14 over the whole real line and `normal_cdf(0.0)` is exactly `0.5`.
pub fn normal_cdf(z: f64) -> f64 {
    let x = z.abs();
    let tail = if x > 37.0 {
        0.0
    } else {
        let e = (-x * x / 2.0).exp();
        if x < 7.071_067_811_865_47 {
            let mut num = 3.526_249_659_989_11e-2 * x + 0.700_383_064_443_688;
            num = num * x + 6.373_962_203_531_65;
            num = num * x + 33.912_866_078_383;
            num = num * x + 112.079_291_497_871;
            num = num * x + 221.213_596_169_931;
            num = num * x + 220.206_867_912_376;

            let mut den = 8.838_834_764_831_84e-2 * x + 1.755_667_163_182_64;
            den = den * x + 16.064_177_579_207;
            den = den * x + 86.780_732_202_946_1;
            den = den * x + 296.564_248_779_674;
            den = den * x + 637.333_633_378_831;
            den = den * x + 793.826_512_519_948;
            den = den * x + 440.413_735_824_752;

            e * num / den
        } else {
            let mut frac = x + 0.65;
            frac = x + 4.0 / frac;
            frac = x + 3.0 / frac;
            frac = x + 2.0 / frac;
            frac = x + 1.0 / frac;
            e / frac / SQRT_2PI
        }
    };
    if z > 0.0 { 1.0 - tail } else { tail }
}

/// Maps a z-score onto 0..=100 through the standard normal CDF.
pub fn percentile(z: f64) -> f64 {
    100.0 * normal_cdf(z)
}

#[cfg(test)]
#[path = "../tests/src_inline/stats.rs"]
mod tests;
