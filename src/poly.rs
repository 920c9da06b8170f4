use crate::{Error, Result};

/// A polynomial with real coefficients, of dynamic degree.
///
/// Coefficients are stored in increasing order of degree, so `coeffs[0]` is
/// the constant term. High-order zero coefficients are allowed and are never
/// trimmed: the [degree](Poly::degree) is computed from the coefficient
/// values, not from how many there are.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Poly {
    coeffs: Vec<f64>,
}

impl Poly {
    /// Creates a new polynomial with the provided coefficients.
    ///
    /// The constant coefficient comes first, then the linear coefficient, and
    /// so on. So if you pass `[c, b, a]` you'll get the polynomial
    /// `a x^2 + b x + c`.
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Poly {
        Poly {
            coeffs: coeffs.into_iter().collect(),
        }
    }

    /// The zero polynomial, with no coefficients at all.
    pub fn zero() -> Poly {
        Poly { coeffs: Vec::new() }
    }

    /// The monic polynomial with exactly the given roots.
    pub fn from_roots(roots: impl IntoIterator<Item = f64>) -> Poly {
        let mut coeffs = vec![1.0];
        for r in roots {
            // Multiply by (x - r), in place.
            coeffs.push(0.0);
            for i in (1..coeffs.len()).rev() {
                coeffs[i] = coeffs[i - 1] - r * coeffs[i];
            }
            coeffs[0] *= -r;
        }
        Poly { coeffs }
    }

    /// The coefficients of this polynomial.
    ///
    /// In the returned slice, the coefficient of `x^i` is at index `i`.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// The index of the highest nonzero coefficient.
    ///
    /// Returns `None` for the zero polynomial, which has no roots and no
    /// sign.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|&c| c != 0.0)
    }

    /// The coefficient of the highest nonzero power, or zero.
    pub fn leading_coeff(&self) -> f64 {
        self.degree().map_or(0.0, |d| self.coeffs[d])
    }

    /// Returns the largest absolute value of any coefficient.
    ///
    /// Always returns a non-negative number, or NaN if some coefficient is NaN.
    pub fn magnitude(&self) -> f64 {
        let mut max = 0.0f64;
        for c in &self.coeffs {
            max = max.max(c.abs());
        }
        max
    }

    /// Are all the coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }

    /// Evaluates this polynomial at a point.
    ///
    /// Finite points use Horner's method. At `±inf` only the leading term
    /// matters, and evaluating it directly avoids the `0 * inf = NaN` that
    /// Horner's method would run into: the result is the constant term for
    /// a constant polynomial, and otherwise an infinity with the sign of the
    /// polynomial's tail in that direction.
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_infinite() {
            return match self.degree() {
                None => 0.0,
                Some(0) => self.coeffs[0],
                Some(d) if d % 2 == 0 => self.coeffs[d].signum() * f64::INFINITY,
                Some(d) => self.coeffs[d].signum() * x,
            };
        }

        let mut acc = 0.0;
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Returns the polynomial that's the derivative of this polynomial, with
    /// one less coefficient.
    pub fn deriv(&self) -> Poly {
        // The zero polynomial (no coefficients) just comes back as itself.
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * i as f64)
            .collect();
        Poly { coeffs }
    }

    /// Polynomial long division, returning `(quotient, remainder)`.
    ///
    /// High-order zeros of `divisor` are ignored; if nothing is left, this
    /// fails with [`Error::DivisionByZero`]. The remainder keeps as many
    /// coefficient slots as `self`, but every coefficient at or above the
    /// divisor's degree is exactly zero. Without that, rounding would leave
    /// tiny nonzero values there and [`Poly::degree`] would see through them.
    pub fn div_rem(&self, divisor: &Poly) -> Result<(Poly, Poly)> {
        let Some(d_deg) = divisor.degree() else {
            return Err(Error::DivisionByZero);
        };
        let lead = divisor.coeffs[d_deg];
        let mut rem = self.coeffs.clone();
        if rem.len() <= d_deg {
            return Ok((Poly::zero(), Poly { coeffs: rem }));
        }

        let mut quot = vec![0.0; rem.len() - d_deg];
        for k in (0..quot.len()).rev() {
            let q = rem[k + d_deg] / lead;
            quot[k] = q;
            for (r, d) in rem[k..=k + d_deg].iter_mut().zip(&divisor.coeffs) {
                *r -= q * d;
            }
        }
        for r in &mut rem[d_deg..] {
            *r = 0.0;
        }

        Ok((Poly { coeffs: quot }, Poly { coeffs: rem }))
    }

    /// Counts the distinct real roots in `(lower, upper]`.
    ///
    /// Either bound may be infinite. See [`SturmSequence`](crate::SturmSequence)
    /// for the details and failure modes.
    pub fn count_roots_between(&self, lower: f64, upper: f64) -> Result<usize> {
        crate::count_real_roots(self, lower, upper)
    }

    /// Finds all the real roots of this polynomial, in increasing order, using
    /// the default [`Config`](crate::Config).
    pub fn real_roots(&self) -> Result<Vec<f64>> {
        let roots = crate::RootFinder::default().find(self)?;
        Ok(roots.into_iter().map(|r| r.x).collect())
    }
}

impl From<Vec<f64>> for Poly {
    fn from(coeffs: Vec<f64>) -> Poly {
        Poly { coeffs }
    }
}

impl<const N: usize> From<[f64; N]> for Poly {
    fn from(coeffs: [f64; N]) -> Poly {
        Poly::new(coeffs)
    }
}

impl std::ops::Neg for Poly {
    type Output = Poly;

    fn neg(mut self) -> Poly {
        for c in &mut self.coeffs {
            *c = -*c;
        }
        self
    }
}

impl std::ops::Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        -self.clone()
    }
}

impl std::ops::Mul<f64> for Poly {
    type Output = Poly;

    fn mul(mut self, scale: f64) -> Poly {
        self *= scale;
        self
    }
}

impl std::ops::MulAssign<f64> for Poly {
    fn mul_assign(&mut self, scale: f64) {
        for c in &mut self.coeffs {
            *c *= scale;
        }
    }
}

impl std::ops::Mul<f64> for &Poly {
    type Output = Poly;

    fn mul(self, scale: f64) -> Poly {
        self.clone() * scale
    }
}

impl<'a> std::ops::Mul<&'a Poly> for &'a Poly {
    type Output = Poly;

    fn mul(self, rhs: &'a Poly) -> Poly {
        let mut coeffs = vec![0.0; (self.coeffs.len() + rhs.coeffs.len()).saturating_sub(1)];

        for (i, c) in self.coeffs.iter().enumerate() {
            for (j, d) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += c * d;
            }
        }
        Poly { coeffs }
    }
}

impl std::ops::Mul<&Poly> for Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        (&self) * rhs
    }
}
