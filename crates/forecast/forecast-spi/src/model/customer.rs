//! Customer lifetime value models

use serde::{Deserialize, Serialize};

/// Aggregate purchase statistics for one customer.
///
/// Missing fields deserialize to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerAggregate {
    pub average_order_value: f64,
    pub order_frequency: f64,
}

/// Heuristic lifetime value estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifetimeValue {
    pub predicted_lifetime_value: f64,
    pub confidence: f64,
}
