use std::fmt;

/// The iterative stage that ran out of its iteration budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Growing the symmetric window `[-w, w]` until it holds every real root.
    Bounding,
    /// Shrinking the window ends while no roots are discarded.
    Tightening,
    /// Splitting the window into one bracket per root.
    Partitioning,
    /// Bisecting a single bracket down to the requested tolerance.
    Refining,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Bounding => "bounding the real roots",
            Stage::Tightening => "tightening the root window",
            Stage::Partitioning => "partitioning the root window",
            Stage::Refining => "refining a root bracket",
        };
        f.write_str(name)
    }
}

/// Errors from polynomial arithmetic and root finding.
///
/// Like the iteration errors of most root finders, these carry the last
/// relevant `x` position where there is one, to help with diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The divisor was the zero polynomial (after dropping high-order zeros).
    #[error("division by the zero polynomial")]
    DivisionByZero,

    /// Some coefficient is infinite or NaN.
    #[error("polynomial has a non-finite coefficient")]
    NonFiniteCoefficient,

    /// An iterative stage did not converge within its budget.
    #[error("iteration limit exceeded while {stage} (last x = {last_x})")]
    IterationLimit { stage: Stage, last_x: f64 },

    /// Newton polishing hit a point where the derivative is exactly zero.
    ///
    /// `x` is the best estimate obtained before the derivative vanished.
    #[error("derivative vanished at x = {x}")]
    DerivativeVanished { x: f64 },

    /// Newton polishing stepped to an infinite or NaN estimate.
    ///
    /// `x` is the last finite estimate.
    #[error("iterated to a non-finite value from x = {x}")]
    IteratedToNaN { x: f64 },

    /// The polynomial shares a non-constant factor with its derivative, so it
    /// has a repeated root and Sturm counting can't be trusted.
    ///
    /// This is only reported when the remainder sequence cancels exactly.
    /// With rounding in the way, a repeated root usually goes unnoticed and
    /// gets dropped or split.
    #[error("polynomial has a repeated root (common factor of degree {degree} with its derivative)")]
    RepeatedRoot { degree: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
