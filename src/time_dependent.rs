// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Freshness Pricing Engine - Time-Dependent Optimizer

//! Time-dependent pricing: the closed-form optimum with exactly one update
//! at the midpoint of the horizon. The midpoint is the known optimal
//! single-update policy for this cost structure, not derived by search.

use crate::model::PricingModel;
use crate::quadrature::IntegrationError;
use crate::types::{PriceFunction, PricingResult, Scheme};

/// Compute the optimal time-dependent pricing scheme.
///
/// The update is scheduled at `T/2` and priced at `DF(T/2, T/2)` -- the
/// destination's marginal willingness to pay for receiving the update at
/// the midpoint versus not at all. The only error path is a propagated
/// integration failure.
pub fn optimize(model: &PricingModel) -> Result<PricingResult, IntegrationError> {
    let midpoint = model.horizon() / 2.0;
    let price = model.differential_cost(midpoint, midpoint)?;
    let residual_aoi = 2.0 * model.aggregate_cost(midpoint)?;
    let operational = model.update_cost(1);

    Ok(PricingResult {
        scheme: Scheme::TimeDependent,
        price_function: PriceFunction::Constant(price),
        update_times: vec![midpoint],
        update_count: 1,
        destination_cost: residual_aoi + price,
        source_profit: price - operational,
        social_cost: residual_aoi + operational,
    })
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
    fn single_update_at_midpoint() {
        let result = optimize(&model()).expect("test: optimize");
        assert_eq!(result.scheme, Scheme::TimeDependent);
        assert_eq!(result.update_count, 1);
        assert_eq!(result.update_times, vec![15.0]);
    }

    #[test]
    fn price_is_midpoint_differential() {
        let m = model();
        let result = optimize(&m).expect("test: optimize");
        let want = m.differential_cost(15.0, 15.0).expect("test: DF");
        let got = result.price_function.price(0);
        assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
    }

    #[test]
    fn price_function_is_constant() {
        let result = optimize(&model()).expect("test: optimize");
        assert_eq!(result.price_function.price(0), result.price_function.price(9));
    }

    #[test]
    fn cost_accounting_identities() {
        let m = model();
        let result = optimize(&m).expect("test: optimize");
        let price = result.price_function.price(0);
        let residual = 2.0 * m.aggregate_cost(15.0).expect("test: F(T/2)");

        assert!((result.destination_cost - (residual + price)).abs() < 1e-9);
        assert!((result.source_profit - (price - m.update_cost(1))).abs() < 1e-9);
        assert!((result.social_cost - (residual + m.update_cost(1))).abs() < 1e-9);
    }

    #[test]
    fn integration_failure_propagates() {
        let m = PricingModel::new(30.0, |age| (age - 10.0).ln(), |_| 0.0);
        let err = optimize(&m);
        assert!(err.is_err(), "log of a non-positive age must fail integration");
    }
}
