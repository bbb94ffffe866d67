use crate::approximation::errors::ApproxError;

/// Per-variable maximum exponents of a tensor-product monomial basis.
///
/// Immutable after construction. A degree of 0 contributes a constant term
/// in that variable (factor of 1 in the basis size).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeProfile {
    degrees: Vec<u32>,
}

impl DegreeProfile {
    pub fn new(degrees: Vec<u32>) -> Result<Self, ApproxError> {
        if degrees.is_empty() {
            return Err(ApproxError::InvalidArgument(
                "degree profile must cover at least one variable".to_string(),
            ));
        }
        Ok(DegreeProfile { degrees })
    }

    /// Same maximum exponent for every variable.
    pub fn uniform(num_variables: usize, degree: u32) -> Result<Self, ApproxError> {
        Self::new(vec![degree; num_variables])
    }

    pub fn num_variables(&self) -> usize {
        self.degrees.len()
    }

    pub fn degrees(&self) -> &[u32] {
        &self.degrees
    }

    /// Size of the tensor-product basis: prod over variables of (degree + 1).
    ///
    /// The product grows combinatorially with dimension and degree, so it is
    /// computed with checked arithmetic and fails loudly instead of wrapping.
    pub fn num_basis_functions(&self) -> Result<usize, ApproxError> {
        self.degrees.iter().try_fold(1usize, |acc, &deg| {
            acc.checked_mul(deg as usize + 1).ok_or_else(|| {
                ApproxError::Overflow(format!(
                    "basis size for degree profile {:?} does not fit in usize",
                    self.degrees
                ))
            })
        })
    }
}
