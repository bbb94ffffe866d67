//! Text persistence of a polynomial approximant.
//!
//! Schema, line oriented:
//! 1. header: `polyapprox v1`
//! 2. space-separated per-variable degrees
//! 3. coefficient count
//! 4... one coefficient per line
//!
//! Floats are written with Rust's shortest round-trip formatting, so a
//! save-then-load cycle restores the coefficient vector exactly. Reading
//! validates the full file before returning; malformed or truncated input
//! never produces a partial result.

use crate::approximation::degrees::DegreeProfile;
use crate::approximation::errors::ApproxError;
use itertools::Itertools;
use log::debug;
use nalgebra::DVector;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const HEADER: &str = "polyapprox v1";

pub fn write_approximant(
    path: &Path,
    degrees: &[u32],
    coefficients: &DVector<f64>,
) -> Result<(), ApproxError> {
    let mut file = File::create(path)?;
    writeln!(file, "{}", HEADER)?;
    writeln!(file, "{}", degrees.iter().join(" "))?;
    writeln!(file, "{}", coefficients.len())?;
    for c in coefficients.iter() {
        writeln!(file, "{}", c)?;
    }
    debug!(
        "wrote {} degrees and {} coefficients to {}",
        degrees.len(),
        coefficients.len(),
        path.display()
    );
    Ok(())
}

pub fn read_approximant(path: &Path) -> Result<(Vec<u32>, DVector<f64>), ApproxError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();

    let header = lines
        .next()
        .ok_or_else(|| malformed("file is empty".to_string()))?;
    if header.trim() != HEADER {
        return Err(malformed(format!("unrecognized header {:?}", header)));
    }

    let degree_line = lines
        .next()
        .ok_or_else(|| malformed("missing degree line".to_string()))?;
    let degrees: Vec<u32> = degree_line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| malformed(format!("bad degree token {:?}", token)))
        })
        .collect::<Result<_, _>>()?;
    if degrees.is_empty() {
        return Err(malformed("degree line is empty".to_string()));
    }

    let count_line = lines
        .next()
        .ok_or_else(|| malformed("missing coefficient count".to_string()))?;
    let count: usize = count_line
        .trim()
        .parse()
        .map_err(|_| malformed(format!("bad coefficient count {:?}", count_line)))?;

    // The count must be consistent with the degree profile, otherwise the
    // restored approximant would violate its own basis-size invariant.
    let expected = DegreeProfile::new(degrees.clone())
        .and_then(|p| p.num_basis_functions())
        .map_err(|e| malformed(format!("invalid degree profile: {}", e)))?;
    if count != expected {
        return Err(malformed(format!(
            "coefficient count {} does not match basis size {} of the degree profile",
            count, expected
        )));
    }

    let mut coefficients = Vec::with_capacity(count);
    for _ in 0..count {
        let line = lines
            .next()
            .ok_or_else(|| malformed("truncated coefficient block".to_string()))?;
        let value = line
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(format!("bad coefficient {:?}", line)))?;
        coefficients.push(value);
    }
    if lines.any(|l| !l.trim().is_empty()) {
        return Err(malformed(
            "trailing data after coefficient block".to_string(),
        ));
    }

    Ok((degrees, DVector::from_vec(coefficients)))
}

fn malformed(msg: String) -> ApproxError {
    ApproxError::Deserialization(msg)
}
