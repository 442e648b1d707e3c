//! Common error infrastructure for spell-core.
//!
//! Domain-specific errors (`BuildError`, `EvalError`, `Shortfall`,
//! `SynthesisError`) are defined next to the component that produces them.
//! This module provides the shared classification used by all of them.
//!
//! # Severity
//!
//! Spell failures fall into two very different groups:
//!
//! - **Expected outcomes**: the caster lacks tokens, the synthesizer ran out of
//!   attempts, or a spell has no sink. Callers turn these into a message (or
//!   silently retry for AI casters).
//! - **Contract violations**: a malformed spell graph (bad source index, cycle,
//!   wrong arity). These must never be swallowed.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Ordinary gameplay outcome; report it to the player and carry on.
    ///
    /// Examples: missing tokens, synthesis budget exhausted
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: spell book entry with a dangling connection
    Validation,

    /// A malformed spell reached evaluation. Indicates a bug upstream.
    ///
    /// Examples: cycle in a hand-built graph, processing function arity mismatch
    Internal,

    /// Unrecoverable state corruption.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all spell-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait MagicError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Recoverable.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
