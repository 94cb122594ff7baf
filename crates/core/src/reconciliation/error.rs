//! Reconciliation error types.

use thiserror::Error;

/// Errors that can occur during reconciliation operations.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// Reconciliation not found.
    #[error("Reconciliation not found: {0}")]
    NotFound(String),

    /// Adjustment amounts must be positive.
    #[error("Adjustment amount must be positive")]
    InvalidAmount,
}

impl ReconciliationError {
    /// Returns the stable error code for API consumers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "RECONCILIATION_NOT_FOUND",
            Self::InvalidAmount => "INVALID_ADJUSTMENT_AMOUNT",
        }
    }
}
