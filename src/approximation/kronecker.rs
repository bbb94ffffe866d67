use crate::approximation::errors::ApproxError;
use nalgebra::DVector;

/// Kronecker product of two dense vectors. Entries of the first factor vary
/// slowest: `out[i * b.len() + j] = a[i] * b[j]`.
pub fn kronecker_product(a: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
    let mut out = DVector::zeros(a.len() * b.len());
    for i in 0..a.len() {
        for j in 0..b.len() {
            out[i * b.len() + j] = a[i] * b[j];
        }
    }
    out
}

/// Left fold of [`kronecker_product`] over an ordered list of vectors:
/// `kron(kron(v0, v1), v2)...`, so variable 0 varies slowest and the last
/// variable varies fastest. The output length is the product of the input
/// lengths. All call sites evaluating or differentiating the basis must use
/// this same enumeration order for coefficient indices to line up.
pub fn kronecker_product_vectors(vectors: &[DVector<f64>]) -> Result<DVector<f64>, ApproxError> {
    let (first, rest) = vectors.split_first().ok_or_else(|| {
        ApproxError::InvalidArgument("kronecker product of an empty list of vectors".to_string())
    })?;
    let mut acc = first.clone();
    for v in rest {
        acc = kronecker_product(&acc, v);
    }
    Ok(acc)
}
