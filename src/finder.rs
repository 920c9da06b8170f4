use tracing::{debug, warn};

use crate::{isolate_with, polish, refine_with, Bracket, Poly, Result, SturmSequence};

/// Settings for Newton polishing of bisected roots.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolishConfig {
    /// Stop once a Newton step is smaller than this, relative to the root
    /// (or to one, for roots smaller than one).
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for PolishConfig {
    fn default() -> Self {
        PolishConfig {
            tolerance: 1e-15,
            max_iterations: 500,
        }
    }
}

/// Settings for [`RootFinder`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Half-width of the first window searched for roots. The window doubles
    /// until it holds all of them.
    pub initial_width: f64,
    /// Relative width at which bisection stops (absolute, for brackets
    /// containing zero).
    pub tolerance: f64,
    /// Iteration budget for each stage of isolation and for each bisection.
    pub max_iterations: usize,
    /// Newton polishing after bisection, or `None` to skip it.
    pub polish: Option<PolishConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_width: 20.0,
            tolerance: 1e-10,
            max_iterations: 2000,
            polish: Some(PolishConfig::default()),
        }
    }
}

/// A real root of a polynomial.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Root {
    /// The estimated root.
    pub x: f64,
    /// The polynomial evaluated at `x`.
    pub residual: f64,
    /// The isolating interval that `x` was found in.
    pub bracket: Bracket,
}

/// Finds all the real roots of polynomials: isolation, then bisection, then
/// (optionally) Newton polishing.
#[derive(Clone, Debug, Default)]
pub struct RootFinder {
    config: Config,
}

impl RootFinder {
    pub fn new(config: Config) -> RootFinder {
        RootFinder { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Finds all the distinct real roots of `p`, in increasing order.
    ///
    /// Isolation and bisection failures are returned as errors. Polishing is
    /// best effort: if Newton's method fails or wanders out of the root's
    /// bracket, we keep the bisection estimate.
    pub fn find(&self, p: &Poly) -> Result<Vec<Root>> {
        let c = &self.config;
        let seq = SturmSequence::new(p)?;
        let brackets = isolate_with(&seq, c.initial_width, c.max_iterations)?;

        let roots = brackets
            .into_iter()
            .map(|bracket| {
                let estimate = refine_with(&seq, bracket, c.tolerance, c.max_iterations)?;
                let x = match c.polish {
                    Some(pc) => polished(p, bracket, estimate, pc),
                    None => estimate,
                };
                Ok(Root {
                    x,
                    residual: p.eval(x),
                    bracket,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(count = roots.len(), "found real roots");
        Ok(roots)
    }
}

fn polished(p: &Poly, bracket: Bracket, estimate: f64, pc: PolishConfig) -> f64 {
    match polish(p, estimate, pc.tolerance, pc.max_iterations) {
        Ok(x) if bracket.contains(x) => x,
        Ok(x) => {
            warn!(x, estimate, "polished root left its bracket, keeping bisection estimate");
            estimate
        }
        Err(e) => {
            warn!(error = %e, estimate, "polishing failed, keeping bisection estimate");
            estimate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn three_roots() {
        let p = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        let roots = p.real_roots().unwrap();
        assert_eq!(roots.len(), 3);
        assert!((roots[0] - 1.0).abs() <= 1e-10);
        assert!((roots[1] - 2.0).abs() <= 1e-10);
        assert!((roots[2] - 3.0).abs() <= 1e-10);

        let p = Poly::from_roots([1.0, 2.0, 3.0, 4.0]);
        let roots = RootFinder::default().find(&p).unwrap();
        assert_eq!(roots.len(), 4);
        for (root, r) in roots.iter().zip([1.0, 2.0, 3.0, 4.0]) {
            assert!((root.x - r).abs() <= 1e-10);
            assert!(root.residual.abs() <= 1e-10);
            assert!(root.bracket.contains(root.x));
        }
    }

    #[test]
    fn no_roots() {
        assert_eq!(Poly::new([2.0, 3.0, 4.0]).real_roots(), Ok(vec![]));
        assert_eq!(Poly::new([0.0]).real_roots(), Ok(vec![]));
        assert_eq!(Poly::zero().real_roots(), Ok(vec![]));
    }

    #[test]
    fn repeated_root() {
        assert_eq!(
            Poly::new([1.0, -2.0, 1.0]).real_roots(),
            Err(Error::RepeatedRoot { degree: 1 })
        );
    }

    #[test]
    fn inexact_repeated_roots_go_unnoticed() {
        // Rounding spoils the exact cancellation, so there's no error, and the
        // double root is either lost or split in two.
        let roots = Poly::from_roots([0.1, 0.1, 5.0]).real_roots().unwrap();
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 5.0).abs() <= 1e-10);

        let third = 1.0 / 3.0;
        let roots = Poly::from_roots([third, third, 2.0]).real_roots().unwrap();
        assert_eq!(roots.len(), 3);
        assert!((roots[0] - third).abs() <= 1e-6);
        assert!((roots[1] - third).abs() <= 1e-6);
        assert!((roots[2] - 2.0).abs() <= 1e-10);

        // With nothing else to divide by, the cancellation happens to be exact.
        assert_eq!(
            Poly::from_roots([0.1, 0.1]).real_roots(),
            Err(Error::RepeatedRoot { degree: 1 })
        );
    }

    #[test]
    fn non_finite_coefficients() {
        assert_eq!(
            Poly::new([f64::NAN, 1.0]).real_roots(),
            Err(Error::NonFiniteCoefficient)
        );
        assert_eq!(
            RootFinder::default().find(&Poly::new([1.0, f64::INFINITY, 2.0])),
            Err(Error::NonFiniteCoefficient)
        );
    }

    #[test]
    fn without_polishing() {
        let finder = RootFinder::new(Config {
            tolerance: 1e-6,
            polish: None,
            ..Config::default()
        });
        let p = Poly::new([-2.0, 0.0, 1.0]);
        let roots = finder.find(&p).unwrap();
        assert_eq!(roots.len(), 2);
        let s = 2.0f64.sqrt();
        assert!((roots[0].x + s).abs() <= 1e-5);
        assert!((roots[1].x - s).abs() <= 1e-5);
        assert!(roots[1].residual.abs() > 0.0);

        // Polishing takes it the rest of the way.
        let roots = RootFinder::new(Config {
            tolerance: 1e-6,
            ..Config::default()
        })
        .find(&p)
        .unwrap();
        assert!((roots[1].x - s).abs() <= 1e-15);
    }

    #[test]
    fn polishing_falls_back() {
        let pc = PolishConfig::default();

        // x^2 + 1 has a flat spot at zero.
        let p = Poly::new([1.0, 0.0, 1.0]);
        assert_eq!(polished(&p, Bracket::new(-1.0, 1.0), 0.0, pc), 0.0);

        // Newton heads for sqrt(2), which isn't in the bracket.
        let p = Poly::new([-2.0, 0.0, 1.0]);
        assert_eq!(polished(&p, Bracket::new(1.0, 1.1), 1.05, pc), 1.05);
    }

    #[test]
    fn budget_errors_surface() {
        let finder = RootFinder::new(Config {
            max_iterations: 5,
            ..Config::default()
        });
        let err = finder.find(&Poly::new([-1e6, 1.0])).unwrap_err();
        assert!(matches!(err, Error::IterationLimit { .. }));
    }

    #[test]
    fn zero_and_wide_roots() {
        let p = Poly::from_roots([-300.0, 0.0, 0.5, 1e4]);
        let roots = p.real_roots().unwrap();
        assert_eq!(roots.len(), 4);
        assert!((roots[0] + 300.0).abs() <= 1e-8);
        assert!(roots[1].abs() <= 1e-10);
        assert!((roots[2] - 0.5).abs() <= 1e-10);
        assert!((roots[3] - 1e4).abs() <= 1e-6);
    }
}
