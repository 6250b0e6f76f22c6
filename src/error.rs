//! Error types surfaced by the physics core.
//!
//! Every fallible entry point (gravity step, collision sweep, analyzer)
//! validates its inputs on entry and returns one of these variants instead
//! of letting a NaN or a division by zero propagate through the math.

/// Failures detected at the boundaries of the physics routines.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("invalid state for body '{name}': {reason}")]
    InvalidEntityState { name: String, reason: String },

    #[error("degenerate geometry between '{a}' and '{b}': zero separation where a direction is required")]
    DegenerateGeometry { a: String, b: String },

    #[error("orbital element '{element}' undefined for '{control}' around '{reference}': {reason}")]
    UndefinedOrbitalElement {
        element: &'static str,
        control: String,
        reference: String,
        reason: String,
    },

    #[error("no body named '{name}'")]
    LookupFailure { name: String },
}

impl PhysicsError {
    /// Shorthand for the invalid-state variant.
    pub fn invalid_state(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntityState {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for the degenerate-geometry variant.
    pub fn degenerate(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            a: a.into(),
            b: b.into(),
        }
    }
}
