//! Store error model.

use thiserror::Error;

use factureclair_core::DomainError;

/// Result type used by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error: a domain failure surfaced through a store operation, or
/// an infrastructure failure of the store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A thread panicked while holding the store lock. The store may be in an
    /// inconsistent state; callers should treat this as fatal.
    #[error("store lock poisoned")]
    LockPoisoned,
}
