use crate::die::DieState;

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A die was asked to move to a state it cannot reach from its current one.
    #[error("die {die}: illegal transition {from} -> {to}")]
    IllegalTransition {
        /// Index of the die.
        die: usize,
        /// The die's current state.
        from: DieState,
        /// The requested state.
        to: DieState,
    },

    /// A configuration value is out of range.
    #[error("invalid simulator config: {0}")]
    InvalidConfig(String),
}
