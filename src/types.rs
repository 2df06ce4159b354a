// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Freshness Pricing Engine - Boundary Records

//! Value objects crossing the engine boundary: the scheme identifier, the
//! price function, and the full pricing result. These are plain data -- a
//! reporting or plotting layer consumes them as-is.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scheme
// ---------------------------------------------------------------------------

/// Which pricing scheme produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    TimeDependent,
    QuantityBased,
}

impl Scheme {
    /// Human-readable scheme label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TimeDependent => "time-dependent",
            Self::QuantityBased => "quantity-based",
        }
    }
}

// ---------------------------------------------------------------------------
// PriceFunction
// ---------------------------------------------------------------------------

/// Maps an update index to the price charged for that update.
///
/// Index `0` is the no-update option and always costs nothing. Indices
/// outside `[0, K]` are infeasible and priced at `f64::INFINITY` rather than
/// a silent numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PriceFunction {
    /// Constant price regardless of index (time-dependent scheme).
    Constant(f64),
    /// One price per update index `1..=K` (quantity-based scheme).
    PerUpdate(Vec<f64>),
}

impl PriceFunction {
    /// Price for update index `k`.
    pub fn price(&self, k: u32) -> f64 {
        match self {
            Self::Constant(price) => *price,
            Self::PerUpdate(prices) => {
                if k == 0 {
                    0.0
                } else if (k as usize) <= prices.len() {
                    prices[k as usize - 1]
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    /// Total revenue if every scheduled update is purchased.
    pub fn total(&self) -> f64 {
        match self {
            Self::Constant(price) => *price,
            Self::PerUpdate(prices) => prices.iter().sum(),
        }
    }

    /// The per-update price vector; empty for the constant scheme.
    pub fn prices(&self) -> &[f64] {
        match self {
            Self::Constant(_) => &[],
            Self::PerUpdate(prices) => prices,
        }
    }
}

// ---------------------------------------------------------------------------
// PricingResult
// ---------------------------------------------------------------------------

/// Output of one scheme optimizer. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Which optimizer produced this result.
    pub scheme: Scheme,
    /// Price charged per update index.
    pub price_function: PriceFunction,
    /// Scheduled update instants, strictly increasing within `(0, T]`.
    pub update_times: Vec<f64>,
    /// Chosen update count `K`.
    pub update_count: u32,
    /// Destination's total cost: residual AoI cost plus prices paid.
    pub destination_cost: f64,
    /// Source's profit: prices collected minus operational cost.
    pub source_profit: f64,
    /// Social cost: residual AoI cost plus operational cost.
    pub social_cost: f64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_price_ignores_index() {
        let pf = PriceFunction::Constant(42.5);
        assert_eq!(pf.price(0), 42.5);
        assert_eq!(pf.price(7), 42.5);
        assert_eq!(pf.total(), 42.5);
        assert!(pf.prices().is_empty());
    }

    #[test]
    fn per_update_indexing() {
        let pf = PriceFunction::PerUpdate(vec![10.0, 20.0, 30.0]);
        assert_eq!(pf.price(0), 0.0, "no-update option is free");
        assert_eq!(pf.price(1), 10.0);
        assert_eq!(pf.price(3), 30.0);
        assert_eq!(pf.total(), 60.0);
        assert_eq!(pf.prices(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn out_of_range_index_is_infeasible() {
        let pf = PriceFunction::PerUpdate(vec![10.0]);
        assert_eq!(pf.price(2), f64::INFINITY);

        let empty = PriceFunction::PerUpdate(Vec::new());
        assert_eq!(empty.price(0), 0.0);
        assert_eq!(empty.price(1), f64::INFINITY);
    }

    #[test]
    fn scheme_labels() {
        assert_eq!(Scheme::TimeDependent.label(), "time-dependent");
        assert_eq!(Scheme::QuantityBased.label(), "quantity-based");
    }

    #[test]
    fn result_serde_roundtrip() {
        let result = PricingResult {
            scheme: Scheme::QuantityBased,
            price_function: PriceFunction::PerUpdate(vec![5.0, 2.5]),
            update_times: vec![10.0, 20.0],
            update_count: 2,
            destination_cost: 100.0,
            source_profit: 7.5,
            social_cost: 92.5,
        };
        let json = serde_json::to_string(&result).expect("test: serialize");
        let back: PricingResult = serde_json::from_str(&json).expect("test: deserialize");
        assert_eq!(back, result);
        assert!(json.contains("quantity-based"), "scheme tag is kebab-case: {json}");
    }
}
