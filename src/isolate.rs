//! Isolating intervals for the real roots of a polynomial.
//!
//! Isolation happens in three steps, all of them driven by the root counts of
//! a [`SturmSequence`]:
//!
//! 1. grow a symmetric window `[-w, w]` until it holds every real root,
//! 2. pull each end of the window inwards for as long as that doesn't lose
//!    a root,
//! 3. split the window, left to right, into adjacent brackets that each hold
//!    exactly one root.
//!
//! Every step has an iteration budget, and running out of it is an error.
//! Closely clustered roots are the usual way to run out: separating roots that
//! are `d` apart takes about `log2(width / d)` bisections.

use tracing::{debug, trace};

use crate::{midpoint, Error, Poly, Result, Stage, SturmSequence};

/// An interval `(low, high]` containing exactly one real root.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bracket {
    pub low: f64,
    pub high: f64,
}

impl Bracket {
    /// Makes the bracket `(low, high]`.
    ///
    /// `low` must be strictly less than `high`. This is only checked in debug
    /// builds: the refinement functions assume it, and given an empty or
    /// inverted bracket they return its midpoint without complaint.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `low >= high`.
    pub fn new(low: f64, high: f64) -> Bracket {
        debug_assert!(low < high);
        Bracket { low, high }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn middle(&self) -> f64 {
        midpoint(self.low, self.high)
    }

    /// Does `x` belong to the half-open interval `(low, high]`?
    pub fn contains(&self, x: f64) -> bool {
        self.low < x && x <= self.high
    }
}

/// Finds one bracket per distinct real root of `p`, in increasing order.
///
/// The search for a window containing all the roots starts at
/// `[-initial_width, initial_width]` and doubles the width each step;
/// `initial_width` should be positive and finite. Each stage gets
/// `max_iterations` steps.
pub fn isolate_roots(p: &Poly, initial_width: f64, max_iterations: usize) -> Result<Vec<Bracket>> {
    let seq = SturmSequence::new(p)?;
    isolate_with(&seq, initial_width, max_iterations)
}

/// Like [`isolate_roots`], but with an already-built Sturm sequence.
pub fn isolate_with(
    seq: &SturmSequence,
    initial_width: f64,
    max_iterations: usize,
) -> Result<Vec<Bracket>> {
    let total = seq.count_roots(f64::NEG_INFINITY, f64::INFINITY);
    debug!(total, "counted real roots");
    if total == 0 {
        return Ok(Vec::new());
    }

    let w = bounding_width(seq, total, initial_width, max_iterations)?;
    let (lower, upper) = tighten(seq, -w, w, max_iterations)?;
    debug!(lower, upper, "bounded real roots");
    partition(seq, total, lower, upper, max_iterations)
}

fn bounding_width(
    seq: &SturmSequence,
    total: usize,
    initial_width: f64,
    max_iterations: usize,
) -> Result<f64> {
    let mut w = initial_width;
    for _ in 0..max_iterations {
        // Doubling eventually overflows; the tightening step can't bisect an
        // infinite window.
        if !w.is_finite() {
            break;
        }
        if seq.count_roots(-w, w) == total {
            return Ok(w);
        }
        trace!(width = w, "window misses some roots");
        w *= 2.0;
    }
    Err(Error::IterationLimit {
        stage: Stage::Bounding,
        last_x: w,
    })
}

// Moves `lower` up while (lower, mid] is empty, then `upper` down while
// (mid, upper] is empty. The roots all stay in (lower, upper].
fn tighten(
    seq: &SturmSequence,
    mut lower: f64,
    mut upper: f64,
    max_iterations: usize,
) -> Result<(f64, f64)> {
    let limit = |x| Error::IterationLimit {
        stage: Stage::Tightening,
        last_x: x,
    };

    let mut done = false;
    for _ in 0..max_iterations {
        let mid = midpoint(lower, upper);
        if mid <= lower || mid >= upper || seq.count_roots(lower, mid) != 0 {
            done = true;
            break;
        }
        lower = mid;
    }
    if !done {
        return Err(limit(lower));
    }

    done = false;
    for _ in 0..max_iterations {
        let mid = midpoint(lower, upper);
        if mid <= lower || mid >= upper || seq.count_roots(mid, upper) != 0 {
            done = true;
            break;
        }
        upper = mid;
    }
    if !done {
        return Err(limit(upper));
    }
    Ok((lower, upper))
}

// Splits (lower, upper], which holds `total` roots, into `total` adjacent
// brackets. From the left end `left` of what's still unsplit, we bisect a
// probe interval (lo, hi) with (left, lo] empty and (left, hi] holding at
// least two roots, until some midpoint has exactly one root to its left.
fn partition(
    seq: &SturmSequence,
    total: usize,
    lower: f64,
    upper: f64,
    max_iterations: usize,
) -> Result<Vec<Bracket>> {
    let mut brackets = Vec::with_capacity(total);
    let mut left = lower;
    let mut iterations = 0;

    for remaining in (2..=total).rev() {
        let v_left = seq.sign_variations(left);
        let (mut lo, mut hi) = (left, upper);
        let boundary = loop {
            let mid = midpoint(lo, hi);
            if iterations == max_iterations || mid <= lo || mid >= hi {
                return Err(Error::IterationLimit {
                    stage: Stage::Partitioning,
                    last_x: mid,
                });
            }
            iterations += 1;

            match v_left.saturating_sub(seq.sign_variations(mid)) {
                0 => lo = mid,
                1 => break mid,
                _ => hi = mid,
            }
        };
        trace!(boundary, remaining, "split off a root");
        brackets.push(Bracket::new(left, boundary));
        left = boundary;
    }
    brackets.push(Bracket::new(left, upper));
    Ok(brackets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::ExactPoly;

    #[test]
    fn three_roots() {
        let p = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        let brackets = isolate_roots(&p, 20.0, 2000).unwrap();
        assert_eq!(brackets.len(), 3);
        for (b, r) in brackets.iter().zip([1.0, 2.0, 3.0]) {
            assert!(b.contains(r), "{b:?} should contain {r}");
            assert_eq!(count_in(&p, b), 1);
        }
        // Adjacent, and in increasing order.
        assert_eq!(brackets[0].high, brackets[1].low);
        assert_eq!(brackets[1].high, brackets[2].low);
    }

    fn count_in(p: &Poly, b: &Bracket) -> usize {
        crate::count_real_roots(p, b.low, b.high).unwrap()
    }

    #[test]
    fn bracket_basics() {
        let b = Bracket::new(-1.0, 3.0);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.middle(), 1.0);
        assert!(b.contains(3.0));
        assert!(!b.contains(-1.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn inverted_bracket() {
        Bracket::new(2.0, 1.0);
    }

    #[test]
    fn no_roots() {
        assert!(isolate_roots(&Poly::new([2.0, 3.0, 4.0]), 20.0, 2000)
            .unwrap()
            .is_empty());
        assert!(isolate_roots(&Poly::new([0.0]), 20.0, 2000)
            .unwrap()
            .is_empty());
        assert!(isolate_roots(&Poly::new([7.0, 0.0]), 20.0, 2000)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn root_on_window_edge() {
        let brackets = isolate_roots(&Poly::new([-20.0, 1.0]), 20.0, 2000).unwrap();
        assert_eq!(brackets.len(), 1);
        assert!(brackets[0].contains(20.0));

        let brackets = isolate_roots(&Poly::new([20.0, 1.0]), 20.0, 2000).unwrap();
        assert_eq!(brackets.len(), 1);
        assert!(brackets[0].contains(-20.0));
    }

    #[test]
    fn far_roots() {
        let roots = [-1000.0, 3.0, 5000.0];
        let p = Poly::from_roots(roots);
        let brackets = isolate_roots(&p, 20.0, 2000).unwrap();
        assert_eq!(brackets.len(), 3);
        for (b, r) in brackets.iter().zip(roots) {
            assert!(b.contains(r), "{b:?} should contain {r}");
        }
    }

    #[test]
    fn bounding_budget() {
        let p = Poly::new([-1e6, 1.0]);
        assert_eq!(
            isolate_roots(&p, 20.0, 5),
            Err(Error::IterationLimit {
                stage: Stage::Bounding,
                last_x: 640.0,
            })
        );
        assert_eq!(isolate_roots(&p, 20.0, 20).unwrap().len(), 1);
    }

    #[test]
    fn tightening_budget() {
        // The window [-20, 20] holds the root right away, but pulling in its
        // lower end takes more than one step.
        assert_eq!(
            isolate_roots(&Poly::new([-1.0, 1.0]), 20.0, 1),
            Err(Error::IterationLimit {
                stage: Stage::Tightening,
                last_x: 0.0,
            })
        );
    }

    #[test]
    fn clustered_roots_budget() {
        let p = Poly::from_roots([1.0, 1.0 + 1e-6]);
        let err = isolate_roots(&p, 20.0, 10).unwrap_err();
        assert!(
            matches!(
                err,
                Error::IterationLimit {
                    stage: Stage::Partitioning,
                    ..
                }
            ),
            "{err:?}"
        );

        let brackets = isolate_roots(&p, 20.0, 2000).unwrap();
        assert_eq!(brackets.len(), 2);
        assert!(brackets[0].contains(1.0));
        assert!(brackets[1].contains(1.0 + 1e-6));
    }

    #[test]
    fn repeated_root() {
        let p = Poly::new([1.0, -2.0, 1.0]);
        assert_eq!(
            isolate_roots(&p, 20.0, 2000),
            Err(Error::RepeatedRoot { degree: 1 })
        );
    }

    #[test]
    fn brackets_hold_one_root_each() {
        arbtest::arbtest(|u| {
            let (p, roots) = crate::arbitrary::separated_roots(u, 4)?;
            let brackets = isolate_roots(&p, 20.0, 2000).unwrap();
            assert_eq!(brackets.len(), roots.len());

            let exact = ExactPoly::from(&p);
            for (b, &r) in brackets.iter().zip(&roots) {
                assert!(b.low < b.high);
                assert!(b.contains(r), "{p:?}: {b:?} should contain {r}");
                assert!(exact.brackets_root(b.low, b.high));
            }
            for w in brackets.windows(2) {
                assert_eq!(w[0].high, w[1].low);
            }
            Ok(())
        })
        .budget_ms(2_000);
    }
}
