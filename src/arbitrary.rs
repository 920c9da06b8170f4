//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::Poly;

fn check_finite(f: f64) -> Result<f64, arbitrary::Error> {
    if f.is_finite() {
        Ok(f)
    } else {
        Err(arbitrary::Error::IncorrectFormat)
    }
}

pub fn finite_float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    check_finite(u.arbitrary()?)
}

/// Generate a float, but give it a chance to be close to another float.
fn another_finite_float(orig: f64, u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    let close: bool = u.arbitrary()?;
    if close {
        let ulps: i32 = u.int_in_range(-32..=32)?;
        let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
        check_finite(orig * scale)
    } else {
        finite_float(u)
    }
}

/// Generate a polynomial of degree at most `max_degree`, with arbitrary
/// finite coefficients.
///
/// The coefficients can have wild magnitudes, and neighboring coefficients
/// have a good chance of being almost equal.
pub fn poly(u: &mut Unstructured<'_>, max_degree: usize) -> Result<Poly, arbitrary::Error> {
    let len = u.int_in_range(1..=max_degree + 1)?;
    let mut coeffs = Vec::with_capacity(len);
    coeffs.push(finite_float(u)?);
    for i in 1..len {
        coeffs.push(another_finite_float(coeffs[i - 1], u)?);
    }
    Ok(Poly::new(coeffs))
}

/// Generate a polynomial of degree at most `max_degree` with small integer
/// coefficients, in `-10..=10`.
///
/// Some of these are zero, including possibly the leading ones.
pub fn small_int_poly(
    u: &mut Unstructured<'_>,
    max_degree: usize,
) -> Result<Poly, arbitrary::Error> {
    let len = u.int_in_range(1..=max_degree + 1)?;
    let mut coeffs = Vec::with_capacity(len);
    for _ in 0..len {
        coeffs.push(f64::from(u.int_in_range::<i32>(-10..=10)?));
    }
    Ok(Poly::new(coeffs))
}

/// Generate a polynomial with between 1 and `max_roots` distinct integer
/// roots in `-6..=6`, and no other roots.
///
/// Returns the polynomial along with its roots, in increasing order.
pub fn separated_roots(
    u: &mut Unstructured<'_>,
    max_roots: usize,
) -> Result<(Poly, Vec<f64>), arbitrary::Error> {
    let n = u.int_in_range(1..=max_roots)?;
    let mut roots = Vec::with_capacity(n);
    for _ in 0..n {
        roots.push(u.int_in_range::<i32>(-6..=6)?);
    }
    roots.sort_unstable();
    roots.dedup();
    let roots: Vec<f64> = roots.into_iter().map(f64::from).collect();

    let mut scale = f64::from(u.int_in_range::<i32>(1..=4)?);
    if u.arbitrary()? {
        scale = -scale;
    }
    Ok((Poly::from_roots(roots.iter().copied()) * scale, roots))
}
