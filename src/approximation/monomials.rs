use nalgebra::DVector;

/// Powers of a single variable: `[x^0, x^1, ..., x^deg]`.
///
/// `x = 0` follows the `powi` convention `0^0 = 1`, so the constant term is
/// always present.
pub fn monomial_powers(x: f64, deg: u32) -> DVector<f64> {
    let mut powers = DVector::zeros(deg as usize + 1);
    for j in 0..=deg {
        powers[j as usize] = x.powi(j as i32);
    }
    powers
}

/// Term-by-term derivative of the power sequence: entry `j` is
/// `j * x^(j-1)` for `j >= 1` and `0` for `j = 0`.
///
/// This is the analytic derivative, not a finite-difference approximation.
pub fn monomial_powers_diff(x: f64, deg: u32) -> DVector<f64> {
    let mut powers = DVector::zeros(deg as usize + 1);
    for j in 1..=deg {
        powers[j as usize] = j as f64 * x.powi(j as i32 - 1);
    }
    powers
}
