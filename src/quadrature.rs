// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Numerical quadrature -- the integration backend for the pricing engine.
//!
//! Integration is an injected capability behind the [`Quadrature`] trait so
//! alternative backends can be substituted and unit-tested against
//! closed-form integrals. The default backend is [`AdaptiveSimpson`], which
//! refines recursively until the Richardson error estimate of each panel
//! falls under the requested tolerance.

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by a quadrature backend.
///
/// These are fatal: a non-convergent or non-finite integral recurs
/// identically on retry, so failures surface once and are never masked
/// behind a silent `NaN`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    #[error("integrand returned a non-finite value at t = {at}")]
    NonFiniteSample { at: f64 },

    #[error("quadrature failed to converge on [{lo}, {hi}] within the depth limit")]
    DepthExhausted { lo: f64, hi: f64 },

    #[error("invalid integration interval [{lo}, {hi}]")]
    InvalidInterval { lo: f64, hi: f64 },
}

// ---------------------------------------------------------------------------
// Quadrature trait
// ---------------------------------------------------------------------------

/// A definite-integral strategy over `[lo, hi]`.
pub trait Quadrature {
    /// Integrate `integrand` over `[lo, hi]`.
    ///
    /// An empty interval (`lo == hi`) integrates to zero. A reversed
    /// interval (`hi < lo`) is an error rather than a sign convention.
    fn integrate(
        &self,
        integrand: &dyn Fn(f64) -> f64,
        lo: f64,
        hi: f64,
    ) -> Result<f64, IntegrationError>;
}

// ---------------------------------------------------------------------------
// Adaptive Simpson
// ---------------------------------------------------------------------------

/// Default absolute tolerance for [`AdaptiveSimpson`].
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default recursion depth limit for [`AdaptiveSimpson`].
pub const DEFAULT_MAX_DEPTH: u32 = 48;

/// Adaptive Simpson quadrature with a Richardson error estimate.
///
/// Each panel `[a, b]` is split at its midpoint; when the two half-panel
/// estimates agree with the whole-panel estimate to within `15 * tolerance`
/// the panel is accepted with the standard `delta / 15` correction,
/// otherwise both halves are refined with the tolerance split between them.
/// Handles integrands that are merely callable, not necessarily smooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveSimpson {
    /// Absolute tolerance on the final integral.
    pub tolerance: f64,
    /// Maximum recursion depth before the panel is declared non-convergent.
    pub max_depth: u32,
}

impl Default for AdaptiveSimpson {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AdaptiveSimpson {
    /// Create a backend with a custom tolerance and the default depth limit.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance, ..Self::default() }
    }
}

impl Quadrature for AdaptiveSimpson {
    fn integrate(
        &self,
        integrand: &dyn Fn(f64) -> f64,
        lo: f64,
        hi: f64,
    ) -> Result<f64, IntegrationError> {
        if !lo.is_finite() || !hi.is_finite() || hi < lo {
            return Err(IntegrationError::InvalidInterval { lo, hi });
        }
        if lo == hi {
            return Ok(0.0);
        }

        let mid = 0.5 * (lo + hi);
        let f_lo = sample(integrand, lo)?;
        let f_mid = sample(integrand, mid)?;
        let f_hi = sample(integrand, hi)?;
        let whole = simpson_panel(lo, hi, f_lo, f_mid, f_hi);

        refine(
            integrand,
            Panel { lo, hi, f_lo, f_mid, f_hi, estimate: whole },
            self.tolerance,
            self.max_depth,
        )
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// One Simpson panel with its endpoint/midpoint samples and estimate.
struct Panel {
    lo: f64,
    hi: f64,
    f_lo: f64,
    f_mid: f64,
    f_hi: f64,
    estimate: f64,
}

fn sample(integrand: &dyn Fn(f64) -> f64, t: f64) -> Result<f64, IntegrationError> {
    let v = integrand(t);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(IntegrationError::NonFiniteSample { at: t })
    }
}

fn simpson_panel(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

fn refine(
    integrand: &dyn Fn(f64) -> f64,
    panel: Panel,
    tolerance: f64,
    depth: u32,
) -> Result<f64, IntegrationError> {
    let mid = 0.5 * (panel.lo + panel.hi);
    let lm = 0.5 * (panel.lo + mid);
    let rm = 0.5 * (mid + panel.hi);
    let f_lm = sample(integrand, lm)?;
    let f_rm = sample(integrand, rm)?;

    let left = simpson_panel(panel.lo, mid, panel.f_lo, f_lm, panel.f_mid);
    let right = simpson_panel(mid, panel.hi, panel.f_mid, f_rm, panel.f_hi);
    let delta = left + right - panel.estimate;

    if delta.abs() <= 15.0 * tolerance {
        return Ok(left + right + delta / 15.0);
    }
    if depth == 0 {
        return Err(IntegrationError::DepthExhausted { lo: panel.lo, hi: panel.hi });
    }

    let half_tol = 0.5 * tolerance;
    let l = refine(
        integrand,
        Panel {
            lo: panel.lo, hi: mid,
            f_lo: panel.f_lo, f_mid: f_lm, f_hi: panel.f_mid,
            estimate: left,
        },
        half_tol,
        depth - 1,
    )?;
    let r = refine(
        integrand,
        Panel {
            lo: mid, hi: panel.hi,
            f_lo: panel.f_mid, f_mid: f_rm, f_hi: panel.f_hi,
            estimate: right,
        },
        half_tol,
        depth - 1,
    )?;
    Ok(l + r)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
