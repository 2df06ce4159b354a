// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Freshness Pricing Engine - Pricing Model

//! The immutable pricing model: a time horizon, an Age-of-Information (AoI)
//! cost-rate function, an operational cost function, and the aggregate AoI
//! cost integrals `F` and `DF` built on an injected quadrature backend.

use crate::quadrature::{AdaptiveSimpson, IntegrationError, Quadrature};
use std::fmt;

/// Default bound on the exhaustive update-count search.
pub const DEFAULT_MAX_UPDATES: u32 = 20;

/// AoI cost rate `f`: cost accrued per unit time at a given elapsed age.
pub type AgeCostFn = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Operational cost `C`: cost of producing `K` updates over the horizon.
/// Assumed non-decreasing in `K`.
pub type UpdateCostFn = Box<dyn Fn(u32) -> f64 + Send + Sync>;

// ---------------------------------------------------------------------------
// PricingModel
// ---------------------------------------------------------------------------

/// Immutable configuration for one pricing problem.
///
/// Constructed once, read-only thereafter. Both optimizers and the
/// comparator take it by shared reference; nothing in the engine mutates it.
pub struct PricingModel {
    horizon: f64,
    age_cost: AgeCostFn,
    update_cost: UpdateCostFn,
    max_updates: u32,
    quadrature: Box<dyn Quadrature + Send + Sync>,
}

impl PricingModel {
    /// Create a model over horizon `T` with AoI cost rate `f` and
    /// operational cost `C`. The search bound defaults to
    /// [`DEFAULT_MAX_UPDATES`] and integration to [`AdaptiveSimpson`].
    pub fn new(
        horizon: f64,
        age_cost: impl Fn(f64) -> f64 + Send + Sync + 'static,
        update_cost: impl Fn(u32) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            horizon,
            age_cost: Box::new(age_cost),
            update_cost: Box::new(update_cost),
            max_updates: DEFAULT_MAX_UPDATES,
            quadrature: Box::new(AdaptiveSimpson::default()),
        }
    }

    /// Override the exhaustive search bound `max_K`. A bound of zero is
    /// valid and degrades the quantity-based scheme to the no-update case.
    pub fn with_max_updates(mut self, max_updates: u32) -> Self {
        self.max_updates = max_updates;
        self
    }

    /// Substitute the quadrature backend.
    pub fn with_quadrature(mut self, quadrature: impl Quadrature + Send + Sync + 'static) -> Self {
        self.quadrature = Box::new(quadrature);
        self
    }

    /// Time horizon `T`.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Search bound `max_K`.
    pub fn max_updates(&self) -> u32 {
        self.max_updates
    }

    /// Evaluate the AoI cost rate `f` at elapsed age `age`.
    pub fn age_cost(&self, age: f64) -> f64 {
        (self.age_cost)(age)
    }

    /// Evaluate the operational cost `C(K)`.
    pub fn update_cost(&self, updates: u32) -> f64 {
        (self.update_cost)(updates)
    }

    /// Aggregate AoI cost `F(x)`: the integral of `f` over `[0, x]`.
    ///
    /// `F(0) = 0`, and `F` is non-decreasing for any non-negative cost rate.
    pub fn aggregate_cost(&self, x: f64) -> Result<f64, IntegrationError> {
        if x == 0.0 {
            return Ok(0.0);
        }
        self.quadrature.integrate(&self.age_cost, 0.0, x)
    }

    /// Differential aggregate AoI cost `DF(x, y)`: the integral over
    /// `[0, x]` of `t -> f(t + y) - f(t)`.
    ///
    /// The marginal AoI cost of delaying an update by `y` over a window of
    /// length `x`. May be negative; zero at `x = 0`. No closed form is
    /// assumed -- always computed by the same quadrature family as `F`.
    pub fn differential_cost(&self, x: f64, y: f64) -> Result<f64, IntegrationError> {
        if x == 0.0 {
            return Ok(0.0);
        }
        let f = &self.age_cost;
        self.quadrature.integrate(&|t| f(t + y) - f(t), 0.0, x)
    }
}

impl fmt::Debug for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingModel")
            .field("horizon", &self.horizon)
            .field("max_updates", &self.max_updates)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> PricingModel {
        PricingModel::new(30.0, |age| age.powf(1.5), |k| 6.0 * (k as f64).powi(3))
    }

    #[test]
    fn aggregate_cost_zero_at_origin() {
        let m = model();
        assert_eq!(m.aggregate_cost(0.0).expect("test: F(0)"), 0.0);
    }

    #[test]
    fn aggregate_cost_matches_closed_form() {
        let m = model();
        // F(x) = x^2.5 / 2.5 for f = age^1.5
        let got = m.aggregate_cost(15.0).expect("test: F(15)");
        let want = 15.0_f64.powf(2.5) / 2.5;
        assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
    }

    #[test]
    fn aggregate_cost_non_decreasing() {
        let m = model();
        let mut previous = 0.0;
        for step in 0..=30 {
            let x = step as f64;
            let value = m.aggregate_cost(x).expect("test: F grid");
            assert!(
                value >= previous,
                "F must be non-decreasing: F({x}) = {value} < {previous}"
            );
            previous = value;
        }
    }

    #[test]
    fn differential_cost_zero_delay_is_zero() {
        let m = model();
        for x in [0.0, 1.0, 7.5, 30.0] {
            let got = m.differential_cost(x, 0.0).expect("test: DF(x, 0)");
            assert!(got.abs() < 1e-9, "DF({x}, 0) = {got}, want 0");
        }
    }

    #[test]
    fn differential_cost_zero_window_is_zero() {
        let m = model();
        assert_eq!(m.differential_cost(0.0, 10.0).expect("test: DF(0, y)"), 0.0);
    }

    #[test]
    fn differential_cost_shift_identity() {
        let m = model();
        // DF(x, y) = F(x + y) - F(y) - F(x)
        let (x, y) = (12.0, 7.0);
        let df = m.differential_cost(x, y).expect("test: DF");
        let want = m.aggregate_cost(x + y).expect("test: F(x+y)")
            - m.aggregate_cost(y).expect("test: F(y)")
            - m.aggregate_cost(x).expect("test: F(x)");
        assert!((df - want).abs() < 1e-6, "got {df}, want {want}");
    }

    #[test]
    fn differential_cost_can_be_negative() {
        // A decreasing cost rate makes delayed ages cheaper
        let m = PricingModel::new(10.0, |age| (-age).exp(), |_| 0.0);
        let df = m.differential_cost(2.0, 3.0).expect("test: DF negative");
        assert!(df < 0.0, "expected negative differential, got {df}");
    }

    #[test]
    fn update_cost_passthrough() {
        let m = model();
        assert_eq!(m.update_cost(0), 0.0);
        assert_eq!(m.update_cost(3), 162.0);
    }

    #[test]
    fn builder_overrides() {
        let m = model().with_max_updates(5);
        assert_eq!(m.max_updates(), 5);
        assert_eq!(model().max_updates(), DEFAULT_MAX_UPDATES);
    }

    #[test]
    fn injected_quadrature_is_used() {
        struct Stub;
        impl Quadrature for Stub {
            fn integrate(
                &self,
                _integrand: &dyn Fn(f64) -> f64,
                _lo: f64,
                _hi: f64,
            ) -> Result<f64, IntegrationError> {
                Ok(123.0)
            }
        }
        let m = model().with_quadrature(Stub);
        assert_eq!(m.aggregate_cost(1.0).expect("test: stub F"), 123.0);
        assert_eq!(m.differential_cost(1.0, 1.0).expect("test: stub DF"), 123.0);
    }

    #[test]
    fn non_finite_cost_rate_propagates() {
        let m = PricingModel::new(10.0, |age| 1.0 / (age - 5.0), |_| 0.0);
        let err = m.aggregate_cost(10.0);
        assert!(
            matches!(err, Err(IntegrationError::NonFiniteSample { .. })),
            "expected NonFiniteSample, got {err:?}"
        );
    }
}
