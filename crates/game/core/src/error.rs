//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`ActionError`, `EffectError`, `SetupError`, ...)
//! live next to the rules they guard. This module only provides the shared
//! classification used by the runtime to decide how loudly to report them.

/// Severity level of an error, used for categorization and reporting.
///
/// - **Validation**: illegal action for the current actor/phase or a malformed
///   request. Never mutates state, always logged as an invalid attempt.
/// - **Resource**: something the request refers to does not exist (session,
///   catalog card, player). Fatal to the request only.
/// - **Soft**: a single triggered effect that could not resolve. Skipped without
///   failing the enclosing action.
/// - **Internal**: a broken invariant. Indicates a bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Resource,
    Soft,
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Resource => "resource",
            Self::Soft => "soft",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to act on it, not by impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; clients and tests match on it.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
