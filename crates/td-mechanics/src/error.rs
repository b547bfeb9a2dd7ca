//! Error types for the mechanics engine.

/// Errors that can occur while authoring or parsing roll definitions.
///
/// Resolution itself never fails; these are only produced when a caller asks
/// for a definition to be validated or parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A component must roll at least one die.
    #[error("component {index}: dice count must be at least 1 (got {count})")]
    InvalidCount {
        /// Position of the component in its roll.
        index: usize,
        /// The offending count.
        count: i32,
    },

    /// A die needs at least two faces.
    #[error("component {index}: dice need at least 2 faces (got {faces})")]
    InvalidFaces {
        /// Position of the component in its roll.
        index: usize,
        /// The offending face count.
        faces: i32,
    },

    /// The crit range start lies outside the die's faces.
    #[error("component {index}: crit range start {start} is outside 1..={faces}")]
    InvalidCritRange {
        /// Position of the component in its roll.
        index: usize,
        /// The offending range start.
        start: i32,
        /// Face count of the component's dice.
        faces: i32,
    },

    /// A composite roll has no dice groups.
    #[error("roll '{0}' has no dice components")]
    EmptyRoll(String),

    /// Dice notation could not be parsed.
    #[error("invalid dice notation '{input}': {reason}")]
    InvalidNotation {
        /// The text that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A serialized roll definition could not be decoded.
    #[error("invalid roll definition: {0}")]
    InvalidDefinition(String),
}

impl From<serde_json::Error> for MechError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDefinition(err.to_string())
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
