//! Roll requests built by the UI layer.

use serde::{Deserialize, Serialize};

use super::CompositeRoll;
use crate::sheet::Attributes;

/// Faces of the single die used by standard rolls.
pub const STANDARD_DIE_FACES: u32 = 6;

/// A plain attribute + skill check on one d6.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardRoll {
    /// Situational bonus.
    pub bonus: i32,
    /// The tested attribute's value (doubled on a crit).
    pub attribute_value: i32,
    /// The skill's value.
    pub skill_value: i32,
    /// Label shown for the attribute in the breakdown.
    pub attribute_label: String,
}

impl StandardRoll {
    /// Create a check on the named attribute.
    pub fn new(label: impl Into<String>, attribute_value: i32, skill_value: i32) -> Self {
        Self {
            attribute_label: label.into(),
            attribute_value,
            skill_value,
            bonus: 0,
        }
    }

    /// Set the situational bonus.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }
}

/// What kind of roll is being requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollKind {
    /// A standard attribute + skill check.
    Standard(StandardRoll),
    /// A user-authored composite roll.
    Custom {
        /// The roll definition.
        roll: CompositeRoll,
        /// The character's attribute values at the time of the roll.
        attributes: Attributes,
    },
}

/// A request to resolve a roll, optionally carrying physical face values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// The roll to resolve.
    pub kind: RollKind,
    /// Face values to consume before generating any, in draw order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<u32>>,
}

impl RollRequest {
    /// Request a standard roll.
    pub fn standard(roll: StandardRoll) -> Self {
        Self {
            kind: RollKind::Standard(roll),
            faces: None,
        }
    }

    /// Request a composite roll against a snapshot of attribute values.
    pub fn custom(roll: CompositeRoll, attributes: Attributes) -> Self {
        Self {
            kind: RollKind::Custom { roll, attributes },
            faces: None,
        }
    }

    /// Attach pre-rolled face values.
    pub fn with_faces(mut self, faces: Vec<u32>) -> Self {
        self.faces = Some(faces);
        self
    }

    /// Faces of every die the request consumes, in draw order.
    ///
    /// The host asks the simulator for exactly these dice.
    pub fn die_faces(&self) -> Vec<u32> {
        match &self.kind {
            RollKind::Standard(_) => vec![STANDARD_DIE_FACES],
            RollKind::Custom { roll, .. } => roll.die_faces(),
        }
    }

    /// Short label for history lists.
    pub fn label(&self) -> &str {
        match &self.kind {
            RollKind::Standard(roll) => &roll.attribute_label,
            RollKind::Custom { roll, .. } => &roll.name,
        }
    }
}
