//! Fiscal period error types.

use thiserror::Error;

/// Errors that can occur managing fiscal periods.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Fiscal period not found.
    #[error("Fiscal period not found: {0}")]
    NotFound(String),

    /// The new period's date range overlaps an existing period.
    #[error("Period date range overlaps an existing fiscal period")]
    Overlap,

    /// The period is already closed.
    #[error("Period is already closed")]
    AlreadyClosed,

    /// Locked periods cannot be closed (they already are).
    #[error("Cannot close a locked period")]
    CloseLocked,

    /// The period is already locked.
    #[error("Period is already locked")]
    AlreadyLocked,

    /// Only closed periods may be locked.
    #[error("Period must be closed before it can be locked")]
    LockOpen,

    /// The period is not locked.
    #[error("Period is not locked")]
    NotLocked,

    /// Locked periods cannot be reopened.
    #[error("Cannot reopen a locked period")]
    ReopenLocked,

    /// Only closed periods may be reopened.
    #[error("Period is not closed")]
    NotClosed,
}

impl FiscalError {
    /// Returns the stable error code for API consumers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PERIOD_NOT_FOUND",
            Self::Overlap => "PERIOD_OVERLAP",
            Self::AlreadyClosed => "PERIOD_ALREADY_CLOSED",
            Self::CloseLocked => "PERIOD_CLOSE_LOCKED",
            Self::AlreadyLocked => "PERIOD_ALREADY_LOCKED",
            Self::LockOpen => "PERIOD_LOCK_OPEN",
            Self::NotLocked => "PERIOD_NOT_LOCKED",
            Self::ReopenLocked => "PERIOD_REOPEN_LOCKED",
            Self::NotClosed => "PERIOD_NOT_CLOSED",
        }
    }
}
