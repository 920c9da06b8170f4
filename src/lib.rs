//! This is a crate for finding all the real roots of a polynomial.
//!
//! Roots are counted exactly (up to floating-point evaluation) with Sturm
//! sequences, isolated into brackets holding one root each, and then refined
//! by bisection and optionally polished with Newton's method. Everything is
//! done in `f64`.
//!
//! ```
//! use poly_sturm::Poly;
//!
//! // x^3 - 6x^2 + 11x - 6 = (x - 1)(x - 2)(x - 3)
//! let p = Poly::new([-6.0, 11.0, -6.0, 1.0]);
//! assert_eq!(p.count_roots_between(f64::NEG_INFINITY, f64::INFINITY), Ok(3));
//!
//! let roots = p.real_roots().unwrap();
//! assert!((roots[0] - 1.0).abs() < 1e-10);
//! assert!((roots[1] - 2.0).abs() < 1e-10);
//! assert!((roots[2] - 3.0).abs() < 1e-10);
//! ```
//!
//! Polynomials with repeated roots share a factor with their derivative,
//! which breaks Sturm's theorem. When the division chain cancels exactly we
//! notice and fail with [`Error::RepeatedRoot`]. That only happens when the
//! arithmetic is exact (small integer or dyadic coefficients, say). Rounding
//! usually leaves a tiny nonzero remainder instead, and then a repeated or
//! nearly repeated root may be dropped or split in two without any error.
//! Reduce such polynomials to square-free form before calling in.

mod error;
mod finder;
mod isolate;
mod poly;
mod refine;
mod sturm;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

#[cfg(any(test, feature = "dashu-float"))]
pub mod exact;

pub use error::{Error, Result, Stage};
pub use finder::{Config, PolishConfig, Root, RootFinder};
pub use isolate::{isolate_roots, isolate_with, Bracket};
pub use poly::Poly;
pub use refine::{polish, refine, refine_with};
pub use sturm::{count_real_roots, sign_changes, Remainders, SturmSequence};

fn different_signs(x: f64, y: f64) -> bool {
    (x < 0.0) != (y < 0.0)
}

// Overflow-proof midpoint between two numbers.
fn midpoint(x: f64, y: f64) -> f64 {
    if (x > 0.0) == (y > 0.0) {
        x + (y - x) / 2.0
    } else {
        (x + y) / 2.0
    }
}
