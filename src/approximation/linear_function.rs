use crate::approximation::errors::ApproxError;
use nalgebra::DVector;

/// Linear combination of basis functions with a stored coefficient vector.
///
/// This is the base capability the polynomial approximant composes: it knows
/// nothing about monomials, only that evaluation is a dot product of some
/// basis vector with the coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFunction {
    num_variables: usize,
    coefficients: DVector<f64>,
}

impl LinearFunction {
    /// `expected_len` is the basis size derived by the caller; a coefficient
    /// vector of any other length is rejected at construction time.
    pub fn new(
        num_variables: usize,
        coefficients: DVector<f64>,
        expected_len: usize,
    ) -> Result<Self, ApproxError> {
        if coefficients.len() != expected_len {
            return Err(ApproxError::DimensionMismatch(format!(
                "coefficient vector has length {} but the basis has {} functions",
                coefficients.len(),
                expected_len
            )));
        }
        Ok(LinearFunction {
            num_variables,
            coefficients,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    /// Dot product of an evaluated basis vector with the stored coefficients.
    pub fn eval_with_basis(&self, basis: &DVector<f64>) -> Result<f64, ApproxError> {
        if basis.len() != self.coefficients.len() {
            return Err(ApproxError::DimensionMismatch(format!(
                "basis vector has length {} but {} coefficients are stored",
                basis.len(),
                self.coefficients.len()
            )));
        }
        Ok(self.coefficients.dot(basis))
    }
}
