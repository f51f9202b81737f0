//! Customer lifetime value heuristic
//!
//! `value = average order value × order frequency × 24`, reported with a
//! fixed confidence. Both constants are unvalidated heuristics kept as-is.

use forecast_spi::{CustomerAggregate, LifetimeValue};

/// Number of periods the order frequency is projected over
pub const LIFETIME_HORIZON_PERIODS: f64 = 24.0;

/// Confidence reported with every estimate
pub const LIFETIME_VALUE_CONFIDENCE: f64 = 0.8;

/// Estimate a customer's lifetime value from aggregate order statistics
pub fn estimate_lifetime_value(customer: &CustomerAggregate) -> LifetimeValue {
    LifetimeValue {
        predicted_lifetime_value: customer.average_order_value
            * customer.order_frequency
            * LIFETIME_HORIZON_PERIODS,
        confidence: LIFETIME_VALUE_CONFIDENCE,
    }
}
