// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Freshness Pricing Engine

//! Optimal pricing schemes for freshness of data updates.
//!
//! A source sends updates to a destination over a fixed horizon `T`. The
//! destination accrues Age-of-Information (AoI) staleness cost at rate `f`
//! per unit of elapsed age; the source pays operational cost `C(K)` for
//! producing `K` updates. The engine computes two pricing schemes over this
//! trade-off and a differential comparison:
//!
//! - [`time_dependent::optimize`] -- closed-form single update at `T/2`.
//! - [`QuantityOptimizer`] -- exhaustive search for the optimal update
//!   count plus a per-update price allocation.
//! - [`compare_schemes`] -- both results and their differential report.
//!
//! All computation is synchronous, deterministic, and free of I/O; the only
//! fatal failure is [`IntegrationError`] from the quadrature backend.

pub mod comparator;
pub mod model;
pub mod quadrature;
pub mod quantity_based;
pub mod time_dependent;
pub mod types;

pub use comparator::{compare, compare_schemes, ComparisonReport, SchemeComparison};
pub use model::{AgeCostFn, PricingModel, UpdateCostFn, DEFAULT_MAX_UPDATES};
pub use quadrature::{AdaptiveSimpson, IntegrationError, Quadrature};
pub use quantity_based::{QuantityOptimizer, DEFAULT_PRICE_INCREMENT};
pub use types::{PriceFunction, PricingResult, Scheme};
