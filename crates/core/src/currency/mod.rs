//! Currency conversion and revaluation.

pub mod conversion;
pub mod revaluation;

pub use conversion::convert_amount;
pub use revaluation::{revalue, RevaluationDirection, RevaluationOutcome};
