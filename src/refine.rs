//! Narrowing an isolated root down to a number.
//!
//! [`refine`] is bisection driven by Sturm root counts. It's slow but can't
//! fail to converge (given enough iterations), because every step keeps
//! exactly one root inside the bracket. [`polish`] is Newton-Raphson, which
//! converges quadratically but only once it's already close to a root, so it's
//! meant to run on the output of [`refine`].

use crate::{Bracket, Error, Poly, Result, Stage, SturmSequence};

/// Bisects `bracket`, which must hold exactly one root of `p`, until it's
/// narrower than `tol` relative to its upper end. Returns the midpoint of the
/// final bracket.
///
/// Relative tolerance is meaningless for a root at zero, so brackets that
/// contain zero use `tol` as an absolute tolerance instead.
pub fn refine(p: &Poly, bracket: Bracket, tol: f64, max_iterations: usize) -> Result<f64> {
    let seq = SturmSequence::new(p)?;
    refine_with(&seq, bracket, tol, max_iterations)
}

/// Like [`refine`], but with an already-built Sturm sequence.
pub fn refine_with(
    seq: &SturmSequence,
    bracket: Bracket,
    tol: f64,
    max_iterations: usize,
) -> Result<f64> {
    let Bracket { mut low, mut high } = bracket;
    let mut v_low = seq.sign_variations(low);

    for _ in 0..max_iterations {
        if is_converged(low, high, tol) {
            return Ok(crate::midpoint(low, high));
        }

        let mid = crate::midpoint(low, high);
        let v_mid = seq.sign_variations(mid);
        if v_low.saturating_sub(v_mid) == 1 {
            high = mid;
        } else {
            low = mid;
            v_low = v_mid;
        }
    }

    if is_converged(low, high, tol) {
        Ok(crate::midpoint(low, high))
    } else {
        Err(Error::IterationLimit {
            stage: Stage::Refining,
            last_x: crate::midpoint(low, high),
        })
    }
}

fn is_converged(low: f64, high: f64, tol: f64) -> bool {
    let width = high - low;
    if low <= 0.0 && 0.0 <= high {
        width < tol
    } else {
        width / high.abs() < tol
    }
}

/// Root finding using Newton-Raphson, starting from `root`.
///
/// Stops once a step is smaller than `tol` relative to the estimate (or to
/// one, for estimates smaller than one), or after `max_iterations` steps,
/// returning the latest estimate either way.
///
/// Newton's method is only safe close to a root: far from one it can wander
/// off or land on a different root. Use it to polish the output of
/// [`refine`].
pub fn polish(p: &Poly, root: f64, tol: f64, max_iterations: usize) -> Result<f64> {
    let deriv = p.deriv();
    let mut x = root;

    for _ in 0..max_iterations {
        let denom = deriv.eval(x);
        if denom == 0.0 {
            return Err(Error::DerivativeVanished { x });
        }
        let delta = p.eval(x) / denom;
        let x_new = x - delta;
        if !x_new.is_finite() {
            return Err(Error::IteratedToNaN { x });
        }
        x = x_new;

        if delta.abs() / x.abs().max(1.0) < tol {
            break;
        }
    }
    Ok(x)
}
