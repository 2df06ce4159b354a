// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Freshness Pricing Engine - Scheme Comparator

//! Differential comparison of the two pricing schemes. A stateless
//! transformation: given both optimizer outputs it reports profit and
//! social-cost differences and ratios, substituting the infinity sentinel
//! for a zero denominator instead of raising.

use serde::{Deserialize, Serialize};

use crate::model::PricingModel;
use crate::quadrature::IntegrationError;
use crate::quantity_based::QuantityOptimizer;
use crate::time_dependent;
use crate::types::PricingResult;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Four-scalar differential report over the two schemes.
///
/// Differences are oriented so a positive value favors quantity-based
/// pricing: it earns more profit and removes more social cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// `quantity_based.source_profit - time_dependent.source_profit`.
    pub profit_difference: f64,
    /// `quantity_based.source_profit / time_dependent.source_profit`;
    /// `f64::INFINITY` when the baseline profit is exactly zero.
    pub profit_ratio: f64,
    /// `time_dependent.social_cost - quantity_based.social_cost`.
    pub social_cost_difference: f64,
    /// `time_dependent.social_cost / quantity_based.social_cost`;
    /// `f64::INFINITY` when the quantity-based cost is exactly zero.
    pub social_cost_ratio: f64,
}

/// Both optimizer outputs plus their differential report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeComparison {
    pub time_dependent: PricingResult,
    pub quantity_based: PricingResult,
    pub report: ComparisonReport,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Build the differential report from two pricing results.
pub fn compare(time_dependent: &PricingResult, quantity_based: &PricingResult) -> ComparisonReport {
    ComparisonReport {
        profit_difference: quantity_based.source_profit - time_dependent.source_profit,
        profit_ratio: guarded_ratio(quantity_based.source_profit, time_dependent.source_profit),
        social_cost_difference: time_dependent.social_cost - quantity_based.social_cost,
        social_cost_ratio: guarded_ratio(time_dependent.social_cost, quantity_based.social_cost),
    }
}

/// Run both optimizers over one model and compose the full comparison.
pub fn compare_schemes(
    model: &PricingModel,
    optimizer: &QuantityOptimizer,
) -> Result<SchemeComparison, IntegrationError> {
    let time_dependent = time_dependent::optimize(model)?;
    let quantity_based = optimizer.optimize(model)?;
    let report = compare(&time_dependent, &quantity_based);
    Ok(SchemeComparison { time_dependent, quantity_based, report })
}

/// Ratio with an explicit infinity sentinel for an exactly-zero denominator.
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::INFINITY
    } else {
        numerator / denominator
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
