use crate::approximation::degrees::DegreeProfile;
use crate::approximation::errors::ApproxError;
use crate::approximation::kronecker::kronecker_product_vectors;
use crate::approximation::linear_function::LinearFunction;
use crate::approximation::monomials::{monomial_powers, monomial_powers_diff};
use crate::approximation::serializer;
use itertools::Itertools;
use log::info;
use nalgebra::{DMatrix, DVector, RowDVector};
use sprs::CsVec;
use std::path::Path;

/// Multivariate polynomial approximant over a tensor-product monomial basis.
///
/// Monomials are enumerated in Kronecker order: variable 0 varies slowest,
/// the last variable fastest, so the monomial `x0^a0 * ... * xn^an` sits at
/// index `a0*(d1+1)*...*(dn+1) + ... + an`. The coefficient vector is stored
/// in the same order, and the Jacobian columns are built with the identical
/// ordering so they align row-for-row with the basis vector.
///
/// Evaluation never mutates state. The only mutating operations are the
/// constructors and [`Polynomial::load`], which replaces the degree profile
/// and the coefficients together.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    degrees: DegreeProfile,
    linear: LinearFunction,
}

impl Polynomial {
    /// Approximant with the given per-variable degrees and zero coefficients.
    pub fn new(degrees: Vec<u32>) -> Result<Self, ApproxError> {
        let profile = DegreeProfile::new(degrees)?;
        let n = profile.num_basis_functions()?;
        let linear = LinearFunction::new(profile.num_variables(), DVector::zeros(n), n)?;
        Ok(Polynomial {
            degrees: profile,
            linear,
        })
    }

    /// Approximant with the same degree in every variable.
    pub fn uniform(num_variables: usize, degree: u32) -> Result<Self, ApproxError> {
        Self::new(vec![degree; num_variables])
    }

    /// Approximant with caller-supplied coefficients. The coefficient vector
    /// must already have the basis size derived from the degrees.
    pub fn with_coefficients(
        degrees: Vec<u32>,
        coefficients: DVector<f64>,
    ) -> Result<Self, ApproxError> {
        let profile = DegreeProfile::new(degrees)?;
        let n = profile.num_basis_functions()?;
        let linear = LinearFunction::new(profile.num_variables(), coefficients, n)?;
        Ok(Polynomial {
            degrees: profile,
            linear,
        })
    }

    /// Restore an approximant persisted with [`Polynomial::save`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ApproxError> {
        let (degrees, coefficients) = serializer::read_approximant(path.as_ref())?;
        let poly = Self::with_coefficients(degrees, coefficients)?;
        info!(
            "loaded {} from {}",
            poly.description(),
            path.as_ref().display()
        );
        Ok(poly)
    }

    pub fn num_variables(&self) -> usize {
        self.degrees.num_variables()
    }

    pub fn num_coefficients(&self) -> usize {
        self.linear.num_coefficients()
    }

    pub fn degrees(&self) -> &[u32] {
        self.degrees.degrees()
    }

    pub fn coefficients(&self) -> &DVector<f64> {
        self.linear.coefficients()
    }

    /// Evaluate all basis monomials at `x`.
    ///
    /// The result is a sparse vector purely as an interchange format, kept
    /// for callers assembling design matrices in sparse form: monomial
    /// values are generically nonzero, so no storage is actually saved.
    pub fn eval_basis_functions(&self, x: &DVector<f64>) -> Result<CsVec<f64>, ApproxError> {
        let monomials = self.eval_monomials(x, None)?;
        let mut indices = Vec::new();
        let mut data = Vec::new();
        for (i, v) in monomials.iter().enumerate() {
            if *v != 0.0 {
                indices.push(i);
                data.push(*v);
            }
        }
        Ok(CsVec::new(monomials.len(), indices, data))
    }

    /// Jacobian of the basis vector at `x`: `num_coefficients` rows,
    /// one column per variable, rows aligned with [`eval_basis_functions`].
    ///
    /// [`eval_basis_functions`]: Polynomial::eval_basis_functions
    pub fn eval_basis_functions_jacobian(
        &self,
        x: &DVector<f64>,
    ) -> Result<DMatrix<f64>, ApproxError> {
        let mut jac = DMatrix::zeros(self.num_coefficients(), self.num_variables());
        for var in 0..self.num_variables() {
            let column = self.eval_differentiated_monomials(x, var)?;
            jac.set_column(var, &column);
        }
        Ok(jac)
    }

    /// Basis monomials differentiated with respect to variable `var`.
    pub fn eval_differentiated_monomials(
        &self,
        x: &DVector<f64>,
        var: usize,
    ) -> Result<DVector<f64>, ApproxError> {
        if var >= self.num_variables() {
            return Err(ApproxError::InvalidArgument(format!(
                "derivative variable {} out of range for {} variables",
                var,
                self.num_variables()
            )));
        }
        self.eval_monomials(x, Some(var))
    }

    // Shared core of the basis and Jacobian paths. `diff_var` selects the
    // variable whose power sequence is replaced by its derivative.
    fn eval_monomials(
        &self,
        x: &DVector<f64>,
        diff_var: Option<usize>,
    ) -> Result<DVector<f64>, ApproxError> {
        if x.len() != self.num_variables() {
            return Err(ApproxError::DimensionMismatch(format!(
                "evaluation point has length {} but the approximant has {} variables",
                x.len(),
                self.num_variables()
            )));
        }

        let mut powers = Vec::with_capacity(self.num_variables());
        for (i, &deg) in self.degrees.degrees().iter().enumerate() {
            let powi = if diff_var == Some(i) {
                monomial_powers_diff(x[i], deg)
            } else {
                monomial_powers(x[i], deg)
            };
            powers.push(powi);
        }

        let monomials = kronecker_product_vectors(&powers)?;
        if monomials.len() != self.num_coefficients() {
            return Err(ApproxError::DimensionMismatch(format!(
                "monomial vector has length {} but {} coefficients are stored",
                monomials.len(),
                self.num_coefficients()
            )));
        }
        Ok(monomials)
    }

    /// Evaluate the approximant at `x`: dot product of the basis vector with
    /// the stored coefficients.
    pub fn eval(&self, x: &DVector<f64>) -> Result<f64, ApproxError> {
        let monomials = self.eval_monomials(x, None)?;
        self.linear.eval_with_basis(&monomials)
    }

    /// Gradient row of the approximant at `x`: entry `v` is the dot product
    /// of Jacobian column `v` with the coefficients.
    pub fn eval_jacobian(&self, x: &DVector<f64>) -> Result<RowDVector<f64>, ApproxError> {
        let jac = self.eval_basis_functions_jacobian(x)?;
        let mut grad = RowDVector::zeros(self.num_variables());
        for var in 0..self.num_variables() {
            grad[var] = self.linear.eval_with_basis(&jac.column(var).into_owned())?;
        }
        Ok(grad)
    }

    /// Human-readable summary: compact when every variable has the same
    /// degree, enumerated otherwise.
    pub fn description(&self) -> String {
        let degs = self.degrees.degrees();
        let all_equal = degs.windows(2).all(|pair| pair[0] == pair[1]);
        if all_equal {
            format!("polynomial approximant of degree {}", degs[0])
        } else {
            format!(
                "polynomial approximant of degrees ({})",
                degs.iter().join(", ")
            )
        }
    }

    /// Persist the degree profile and coefficients.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ApproxError> {
        serializer::write_approximant(path.as_ref(), self.degrees(), self.coefficients())?;
        info!("saved {} to {}", self.description(), path.as_ref().display());
        Ok(())
    }

    /// Restore state from a file, replacing the degree profile and the
    /// coefficients together. The file is parsed fully before any field is
    /// touched, so a failed load leaves the approximant unchanged.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ApproxError> {
        let restored = Self::from_file(path)?;
        *self = restored;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn test_unit_coefficients_scenario() {
        // degrees [1, 2] -> 6 monomials x0^a * x1^b, a in {0,1}, b in {0,1,2};
        // at (2, 3) with unit coefficients: (1+2)*(1+3+9) = 39
        let poly = Polynomial::with_coefficients(vec![1, 2], DVector::from_element(6, 1.0)).unwrap();
        assert_eq!(poly.num_coefficients(), 6);
        let x = DVector::from_vec(vec![2.0, 3.0]);
        assert_relative_eq!(poly.eval(&x).unwrap(), 39.0, epsilon = 1e-12);
    }

    #[test]
    fn test_basis_at_all_ones_sums_to_basis_size() {
        for degrees in [vec![3], vec![1, 2], vec![2, 2, 2], vec![0, 4, 1]] {
            let poly = Polynomial::new(degrees).unwrap();
            let x = DVector::from_element(poly.num_variables(), 1.0);
            let basis = poly.eval_basis_functions(&x).unwrap();
            let sum: f64 = basis.iter().map(|(_, v)| *v).sum();
            assert_relative_eq!(sum, poly.num_coefficients() as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_basis_enumeration_order() {
        // variable 0 varies slowest: [1, x1, x1^2, x0, x0*x1, x0*x1^2]
        let poly = Polynomial::new(vec![1, 2]).unwrap();
        let x = DVector::from_vec(vec![2.0, 3.0]);
        let basis = poly.eval_basis_functions(&x).unwrap().to_dense();
        let expected = [1.0, 3.0, 9.0, 2.0, 6.0, 18.0];
        for (b, e) in basis.iter().zip(expected.iter()) {
            assert_relative_eq!(b, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_univariate_derivative_basis() {
        let poly = Polynomial::new(vec![5]).unwrap();
        for &x in &[0.0, -2.0, 0.25, 1.7] {
            let point = DVector::from_vec(vec![x]);
            let diff = poly.eval_differentiated_monomials(&point, 0).unwrap();
            assert_eq!(diff[0], 0.0);
            for j in 1..=5usize {
                assert_relative_eq!(
                    diff[j],
                    j as f64 * x.powi(j as i32 - 1),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_jacobian_matches_finite_differences() {
        let poly = Polynomial::new(vec![2, 3]).unwrap();
        let x = DVector::from_vec(vec![1.2, -0.7]);
        let jac = poly.eval_basis_functions_jacobian(&x).unwrap();
        assert_eq!(jac.nrows(), poly.num_coefficients());
        assert_eq!(jac.ncols(), 2);

        let h = 1e-6;
        for var in 0..2 {
            let mut x_plus = x.clone();
            let mut x_minus = x.clone();
            x_plus[var] += h;
            x_minus[var] -= h;
            let b_plus = poly.eval_basis_functions(&x_plus).unwrap().to_dense();
            let b_minus = poly.eval_basis_functions(&x_minus).unwrap().to_dense();
            for row in 0..poly.num_coefficients() {
                let fd = (b_plus[row] - b_minus[row]) / (2.0 * h);
                assert_relative_eq!(jac[(row, var)], fd, epsilon = 1e-5, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_gradient_of_known_function() {
        // f(x0, x1) = 2 * x0 * x1^2, i.e. coefficient 2.0 on the monomial at
        // index a0*(d1+1) + a1 = 1*3 + 2 = 5 for degrees [1, 2]
        let mut coeffs = DVector::zeros(6);
        coeffs[5] = 2.0;
        let poly = Polynomial::with_coefficients(vec![1, 2], coeffs).unwrap();
        let x = DVector::from_vec(vec![2.0, 3.0]);
        assert_relative_eq!(poly.eval(&x).unwrap(), 36.0, epsilon = 1e-12);
        let grad = poly.eval_jacobian(&x).unwrap();
        // df/dx0 = 2*x1^2 = 18, df/dx1 = 4*x0*x1 = 24
        assert_relative_eq!(grad[0], 18.0, epsilon = 1e-12);
        assert_relative_eq!(grad[1], 24.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_derivative_variable() {
        let poly = Polynomial::new(vec![2, 2]).unwrap();
        let x = DVector::from_vec(vec![1.0, 1.0]);
        let before = poly.clone();
        let result = poly.eval_differentiated_monomials(&x, 2);
        assert!(matches!(result, Err(ApproxError::InvalidArgument(_))));
        // failed evaluation leaves state untouched
        assert_eq!(poly, before);
    }

    #[test]
    fn test_point_length_mismatch() {
        let poly = Polynomial::new(vec![2, 2]).unwrap();
        let x = DVector::from_vec(vec![1.0]);
        assert!(matches!(
            poly.eval(&x),
            Err(ApproxError::DimensionMismatch(_))
        ));
        assert!(matches!(
            poly.eval_jacobian(&x),
            Err(ApproxError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_coefficient_length_checked_at_construction() {
        let result = Polynomial::with_coefficients(vec![1, 2], DVector::zeros(5));
        assert!(matches!(result, Err(ApproxError::DimensionMismatch(_))));
    }

    #[test]
    fn test_description_formats() {
        let poly = Polynomial::new(vec![3, 3, 3]).unwrap();
        assert_eq!(poly.description(), "polynomial approximant of degree 3");
        let poly = Polynomial::new(vec![2, 4]).unwrap();
        assert_eq!(
            poly.description(),
            "polynomial approximant of degrees (2, 4)"
        );
        let poly = Polynomial::uniform(2, 5).unwrap();
        assert_eq!(poly.description(), "polynomial approximant of degree 5");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poly.txt");
        let coeffs = DVector::from_vec(vec![0.5, -1.25, 3.0, 0.1, 7.0, -0.75]);
        let original = Polynomial::with_coefficients(vec![1, 2], coeffs).unwrap();
        original.save(&path).unwrap();

        let restored = Polynomial::from_file(&path).unwrap();
        assert_eq!(restored.description(), original.description());
        assert_eq!(restored.coefficients(), original.coefficients());
        for point in [
            DVector::from_vec(vec![0.0, 0.0]),
            DVector::from_vec(vec![2.0, 3.0]),
            DVector::from_vec(vec![-1.5, 0.25]),
        ] {
            assert_relative_eq!(
                restored.eval(&point).unwrap(),
                original.eval(&point).unwrap(),
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_round_trip_degenerate_profile() {
        // single variable of degree 0: one constant coefficient
        let dir = tempdir().unwrap();
        let path = dir.path().join("constant.txt");
        let original =
            Polynomial::with_coefficients(vec![0], DVector::from_vec(vec![42.0])).unwrap();
        original.save(&path).unwrap();
        let restored = Polynomial::from_file(&path).unwrap();
        assert_eq!(restored, original);
        let x = DVector::from_vec(vec![123.0]);
        assert_relative_eq!(restored.eval(&x).unwrap(), 42.0, epsilon = 1e-14);
    }

    #[test]
    fn test_load_resets_existing_approximant() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poly.txt");
        let saved =
            Polynomial::with_coefficients(vec![2], DVector::from_vec(vec![1.0, 2.0, 3.0])).unwrap();
        saved.save(&path).unwrap();

        let mut poly = Polynomial::new(vec![1, 1]).unwrap();
        poly.load(&path).unwrap();
        assert_eq!(poly, saved);
    }

    #[test]
    fn test_failed_load_leaves_state_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.txt");
        std::fs::write(&path, "not a polynomial\n").unwrap();

        let mut poly = Polynomial::new(vec![1, 1]).unwrap();
        let before = poly.clone();
        let result = poly.load(&path);
        assert!(matches!(result, Err(ApproxError::Deserialization(_))));
        assert_eq!(poly, before);
    }

    #[test]
    fn test_evaluation_at_zero_point() {
        // only the constant monomial survives at the origin
        let mut coeffs = DVector::zeros(6);
        coeffs[0] = 5.0;
        coeffs[5] = 100.0;
        let poly = Polynomial::with_coefficients(vec![1, 2], coeffs).unwrap();
        let x = DVector::from_vec(vec![0.0, 0.0]);
        assert_relative_eq!(poly.eval(&x).unwrap(), 5.0, epsilon = 1e-14);
        let basis = poly.eval_basis_functions(&x).unwrap();
        assert_eq!(basis.nnz(), 1);
    }
}
