//! Sturm sequences, for counting the real roots of a polynomial in an
//! interval.
//!
//! The Sturm sequence of `P` is `p0 = P`, `p1 = P'` and then
//! `p(i+2) = -(p(i) mod p(i+1))`, stopping at the first constant remainder.
//! If `V(x)` is the number of sign changes in `p0(x), p1(x), ...`, then by
//! Sturm's theorem `V(a) - V(b)` is the number of distinct real roots of `P`
//! in `(a, b]`. This needs `P` to have no repeated roots. When it has one,
//! `P` and `P'` share a factor and in exact arithmetic some remainder
//! vanishes identically, which we report as [`Error::RepeatedRoot`]. In
//! floating point that remainder is often a tiny nonzero constant instead,
//! and then the counts near the repeated root are simply wrong: it can be
//! missed entirely or counted as two nearby roots.

use tracing::trace;

use crate::{different_signs, Error, Poly, Result};

/// Lazily computes the terms of a Sturm sequence that come after the first
/// two.
///
/// Each call to `next` divides the previous two terms and yields the negated
/// remainder. A remainder of degree zero (or the zero polynomial) yields the
/// one-term constant `[-r0]` and ends the sequence.
#[derive(Clone, Debug)]
pub struct Remainders {
    prev: Poly,
    cur: Poly,
    done: bool,
}

impl Remainders {
    /// Starts the continuation of the sequence whose first two terms are
    /// `p0` and `p1`.
    pub fn new(p0: Poly, p1: Poly) -> Remainders {
        Remainders {
            prev: p0,
            cur: p1,
            done: false,
        }
    }
}

impl Iterator for Remainders {
    type Item = Result<Poly>;

    fn next(&mut self) -> Option<Result<Poly>> {
        if self.done {
            return None;
        }

        let rem = match self.prev.div_rem(&self.cur) {
            Ok((_, rem)) => rem,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        match rem.degree() {
            Some(d) if d > 0 => {
                let next = -rem;
                self.prev = std::mem::replace(&mut self.cur, next.clone());
                Some(Ok(next))
            }
            deg => {
                self.done = true;
                // An exact division by something non-constant means that
                // `cur` divides every earlier term, P and P' included.
                if let (None, Some(common)) = (deg, self.cur.degree()) {
                    if common > 0 {
                        return Some(Err(Error::RepeatedRoot { degree: common }));
                    }
                }
                let r0 = rem.coeffs().first().copied().unwrap_or(0.0);
                Some(Ok(Poly::new([-r0])))
            }
        }
    }
}

/// The complete Sturm sequence of a polynomial.
///
/// Building it costs a sequence of polynomial divisions, after which every
/// root count is just two passes of polynomial evaluation. So if you're
/// going to count roots in many intervals, build this once and reuse it.
#[derive(Clone, Debug, PartialEq)]
pub struct SturmSequence {
    terms: Vec<Poly>,
}

impl SturmSequence {
    /// Builds the Sturm sequence of `p`.
    ///
    /// A polynomial of degree zero (or the zero polynomial) has no roots to
    /// count, and gets a sequence that always counts zero of them. Otherwise,
    /// the sequence has at most `degree + 1` terms.
    ///
    /// Fails with [`Error::NonFiniteCoefficient`] if `p` has an infinite or
    /// NaN coefficient, since its sign variations would be meaningless.
    pub fn new(p: &Poly) -> Result<SturmSequence> {
        if !p.is_finite() {
            return Err(Error::NonFiniteCoefficient);
        }
        let degree = match p.degree() {
            Some(d) if d > 0 => d,
            _ => {
                return Ok(SturmSequence {
                    terms: vec![p.clone()],
                })
            }
        };

        let deriv = p.deriv();
        let mut terms = Vec::with_capacity(degree + 1);
        terms.push(p.clone());
        terms.push(deriv.clone());
        for term in Remainders::new(p.clone(), deriv).take(degree - 1) {
            terms.push(term?);
        }
        trace!(degree, len = terms.len(), "built sturm sequence");
        Ok(SturmSequence { terms })
    }

    /// The polynomials making up this sequence, starting with `P` and `P'`.
    pub fn terms(&self) -> &[Poly] {
        &self.terms
    }

    /// The number of sign changes in the sequence evaluated at `x`.
    ///
    /// `x` may be infinite.
    pub fn sign_variations(&self, x: f64) -> usize {
        sign_changes(self.terms.iter().map(|p| p.eval(x)))
    }

    /// Counts the distinct real roots in `(lower, upper]`.
    ///
    /// Returns zero if `lower >= upper`.
    pub fn count_roots(&self, lower: f64, upper: f64) -> usize {
        self.sign_variations(lower)
            .saturating_sub(self.sign_variations(upper))
    }
}

/// Counts the sign changes in a sequence of numbers, skipping zeros.
///
/// A zero neither counts as a sign nor breaks a run, so `[1, 0, -1]` has one
/// sign change and `[1, 0, 1]` has none. NaN is skipped like zero.
pub fn sign_changes(values: impl IntoIterator<Item = f64>) -> usize {
    let mut last = None;
    let mut changes = 0;
    for v in values {
        if v == 0.0 || v.is_nan() {
            continue;
        }
        if last.is_some_and(|l| different_signs(l, v)) {
            changes += 1;
        }
        last = Some(v);
    }
    changes
}

/// Counts the distinct real roots of `p` in `(lower, upper]`, where either
/// bound may be infinite.
///
/// This builds a fresh [`SturmSequence`] every time.
pub fn count_real_roots(p: &Poly, lower: f64, upper: f64) -> Result<usize> {
    Ok(SturmSequence::new(p)?.count_roots(lower, upper))
}
