/// per-variable degree profile and basis-size bookkeeping
pub mod degrees;
/// error types shared by the approximation modules
pub mod errors;
/// Kronecker-style combinatorial product of per-variable power sequences
pub mod kronecker;
/// coefficient storage and linear-combination evaluation
pub mod linear_function;
/// monovariable monomial power sequences and their analytic derivatives
pub mod monomials;
/// multivariate polynomial approximant on the tensor-product monomial basis
pub mod polynomial;
/// text persistence of degree profile and coefficients
pub mod serializer;
