//! Model module containing data structures

mod artifact_bundle;
mod customer;
mod feature_vector;
mod sales_prediction;
mod sales_record;

pub use artifact_bundle::ArtifactBundle;
pub use customer::{CustomerAggregate, LifetimeValue};
pub use feature_vector::{FeatureVector, FEATURE_COUNT};
pub use sales_prediction::SalesPrediction;
pub use sales_record::SalesRecord;
