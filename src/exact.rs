//! Exact-but-slow polynomial evaluation using arbitrary-precision arithmetic.
//!
//! Root finding in this crate is all done in `f64`. This module is the
//! yardstick we check it against: every `f64` is exactly representable as an
//! `FBig`, and so is every sum and product of them, so the sign of a
//! polynomial at a point can be decided without any rounding at all.

use std::cmp::Ordering;

use dashu_float::{round::Rounded, FBig};

use crate::Poly;

#[derive(Clone, Debug)]
pub struct ExactPoly {
    coeffs: Vec<FBig>,
}

/// Converts a finite `f64` to an `FBig` of unlimited precision.
///
/// # Panics
///
/// Panics if `x` is infinite or NaN.
pub fn exact(x: f64) -> FBig {
    let Rounded::Exact(x) = FBig::try_from(x).unwrap().with_precision(0) else {
        unreachable!()
    };
    x
}

impl ExactPoly {
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Self {
        let mut ret = Self {
            coeffs: coeffs.into_iter().map(exact).collect(),
        };
        ret.remove_zeros();
        ret
    }

    fn remove_zeros(&mut self) {
        let zero = exact(0.0);
        while let Some(last) = self.coeffs.last() {
            if last == &zero {
                self.coeffs.pop();
            } else {
                return;
            }
        }
    }

    /// Evaluate this polynomial at the given point, as a correctly-rounded
    /// `f64`.
    pub fn eval(&self, x: f64) -> f64 {
        self.eval_exact(x).to_f64().value()
    }

    /// Evaluate this polynomial at the given point, exactly and very slowly.
    pub fn eval_exact(&self, x: f64) -> FBig {
        // Exact products of f64s have at most a few thousand bits, so this is
        // wasteful but never huge.
        let mut coeffs = self.coeffs.iter().rev();
        let Some(c) = coeffs.next() else {
            return exact(0.0);
        };
        let mut ret = c.clone();
        let x = exact(x);
        for c in coeffs {
            ret *= &x;
            ret += c;
        }

        ret
    }

    /// The exact sign of this polynomial at `x`, as a comparison with zero.
    pub fn sign(&self, x: f64) -> Ordering {
        let val = self.eval_exact(x);
        let zero = exact(0.0);
        if val > zero {
            Ordering::Greater
        } else if val < zero {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Is there a root of this polynomial in the closed interval
    /// `[lower, upper]`, as witnessed by a zero or a change of sign at the
    /// endpoints?
    pub fn brackets_root(&self, lower: f64, upper: f64) -> bool {
        let lo = self.sign(lower);
        let hi = self.sign(upper);
        lo == Ordering::Equal || hi == Ordering::Equal || lo != hi
    }
}

impl From<&Poly> for ExactPoly {
    fn from(p: &Poly) -> ExactPoly {
        ExactPoly::new(p.coeffs().iter().copied())
    }
}
