// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Freshness Pricing Engine - Quantity-Based Optimizer

//! Quantity-based pricing in two phases.
//!
//! Phase A exhaustively evaluates every update count `K` in `0..=max_K`,
//! spacing updates evenly at `x = T / (K + 1)`, and selects the count
//! minimizing social cost `(K + 1) * F(x) + C(K)`. The search is brute
//! force and correct regardless of the cost curve's shape; candidates are
//! independent, so the map over the range could be evaluated in parallel as
//! long as the merge preserves the first-minimum tie break.
//!
//! Phase B allocates a price to each update `k = 1..=K*` by a sequential
//! recurrence: update `k` is priced at the destination's marginal benefit
//! of receiving updates `k..=K*` rather than stopping after `k - 1`, net of
//! prices already charged, plus a strictly positive increment. The final
//! index absorbs the remainder so the vector sums exactly to the
//! destination's total benefit. The increment and the asymmetric last term
//! are a heuristic carried for output compatibility, not a proven
//! incentive-compatible mechanism.

use crate::model::PricingModel;
use crate::quadrature::IntegrationError;
use crate::types::{PriceFunction, PricingResult, Scheme};

/// Default tie-breaking increment added to each non-final price.
pub const DEFAULT_PRICE_INCREMENT: f64 = 0.01;

// ---------------------------------------------------------------------------
// QuantityOptimizer
// ---------------------------------------------------------------------------

/// Stateless quantity-based optimizer -- holds the allocation increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityOptimizer {
    /// Strictly positive increment keeping every non-final price above its
    /// incentive bound.
    pub price_increment: f64,
}

impl Default for QuantityOptimizer {
    fn default() -> Self {
        Self { price_increment: DEFAULT_PRICE_INCREMENT }
    }
}

impl QuantityOptimizer {
    /// Optimizer with the reference increment of `0.01`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimizer with a custom tie-breaking increment.
    pub fn with_increment(price_increment: f64) -> Self {
        Self { price_increment }
    }

    /// Compute the optimal quantity-based pricing scheme.
    pub fn optimize(&self, model: &PricingModel) -> Result<PricingResult, IntegrationError> {
        let (best_count, _) = self.optimal_update_count(model)?;
        let prices = self.allocate_prices(model, best_count)?;

        let interval = model.horizon() / f64::from(best_count + 1);
        let update_times: Vec<f64> =
            (1..=best_count).map(|i| f64::from(i) * interval).collect();

        let residual_aoi = f64::from(best_count + 1) * model.aggregate_cost(interval)?;
        let revenue: f64 = prices.iter().sum();
        let operational = model.update_cost(best_count);

        Ok(PricingResult {
            scheme: Scheme::QuantityBased,
            price_function: PriceFunction::PerUpdate(prices),
            update_times,
            update_count: best_count,
            destination_cost: residual_aoi + revenue,
            source_profit: revenue - operational,
            social_cost: residual_aoi + operational,
        })
    }

    /// Phase A: the social-cost-minimizing update count and its cost.
    ///
    /// A pure map over `0..=max_K` reduced by [`first_minimum`]. Ties keep
    /// the smaller count.
    pub fn optimal_update_count(
        &self,
        model: &PricingModel,
    ) -> Result<(u32, f64), IntegrationError> {
        let candidates = (0..=model.max_updates())
            .map(|count| Ok((count, social_cost_for(model, count)?)))
            .collect::<Result<Vec<_>, IntegrationError>>()?;
        // The candidate range always contains K = 0
        Ok(first_minimum(&candidates).unwrap_or(candidates[0]))
    }

    /// Phase B: the per-update price vector for a chosen count.
    ///
    /// Returns an empty vector when `best_count` is zero.
    pub fn allocate_prices(
        &self,
        model: &PricingModel,
        best_count: u32,
    ) -> Result<Vec<f64>, IntegrationError> {
        if best_count == 0 {
            return Ok(Vec::new());
        }

        let total_benefit = model.aggregate_cost(model.horizon())?;
        let mut prices = Vec::with_capacity(best_count as usize);
        let mut cumulative = 0.0;

        for count in 1..best_count {
            let price = total_benefit - residual_for(model, count)? - cumulative
                + self.price_increment;
            cumulative += price;
            prices.push(price);
        }

        // Final index absorbs the remainder: no increment, so the vector
        // reconciles exactly to total_benefit - residual(K*)
        prices.push(total_benefit - residual_for(model, best_count)? - cumulative);
        Ok(prices)
    }
}

// ---------------------------------------------------------------------------
// Candidate evaluation
// ---------------------------------------------------------------------------

/// Social cost of scheduling `count` evenly spaced updates:
/// `(count + 1) * F(T / (count + 1)) + C(count)`.
pub fn social_cost_for(model: &PricingModel, count: u32) -> Result<f64, IntegrationError> {
    Ok(residual_for(model, count)? + model.update_cost(count))
}

/// Residual AoI cost of `count` evenly spaced updates.
fn residual_for(model: &PricingModel, count: u32) -> Result<f64, IntegrationError> {
    let segments = f64::from(count + 1);
    let interval = model.horizon() / segments;
    Ok(segments * model.aggregate_cost(interval)?)
}

/// First strict minimum over `(candidate, cost)` pairs.
///
/// The tie-break rule of the exhaustive search: an equal cost never
/// displaces an earlier candidate, so on exact ties the lowest count wins.
/// Any parallel merge of Phase A partitions must preserve this ordering.
fn first_minimum(candidates: &[(u32, f64)]) -> Option<(u32, f64)> {
    candidates
        .iter()
        .copied()
        .reduce(|best, candidate| if candidate.1 < best.1 { candidate } else { best })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
