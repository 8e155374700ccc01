//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., [`crate::WorldError`], [`crate::EngineError`])
//! live next to the code that raises them. Spatial lookups never use these
//! types: a missing entity or an out-of-bounds coordinate is an ordinary
//! `None`/`false`. Errors are reserved for requests that name something that
//! does not exist and for registry invariant violations.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unknown map handle, entity already registered elsewhere
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: entity back-reference disagrees with the registry holding it
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// Provides a uniform interface for error classification across the crate,
/// so hosts can pick a logging level without matching every variant.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
