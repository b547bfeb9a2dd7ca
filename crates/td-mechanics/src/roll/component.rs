//! A group of identical dice inside a composite roll.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Crit multiplier recorded on a component unless overridden.
pub const DEFAULT_CRIT_MULTIPLIER: i32 = 2;

/// One group of identical dice, e.g. `2d6+1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceRollComponent {
    /// How many dice to roll.
    pub count: i32,
    /// Faces on each die.
    pub faces_per_die: i32,
    /// Flat bonus added to the group's subtotal.
    pub flat_bonus: i32,
    /// Whether the dice sum is subtracted from the total.
    pub is_subtracted: bool,
    /// Whether dice in this group can score crits.
    pub can_crit: bool,
    /// Lowest face that counts as a crit; the top face when unset.
    pub crit_range_start: Option<i32>,
    /// Multiplier stored with the group for editors.
    pub crit_multiplier_override: i32,
}

impl Default for DiceRollComponent {
    fn default() -> Self {
        Self {
            count: 1,
            faces_per_die: 6,
            flat_bonus: 0,
            is_subtracted: false,
            can_crit: false,
            crit_range_start: None,
            crit_multiplier_override: DEFAULT_CRIT_MULTIPLIER,
        }
    }
}

impl DiceRollComponent {
    /// Create a group of `count` dice with `faces` sides.
    pub fn new(count: i32, faces: i32) -> Self {
        Self {
            count,
            faces_per_die: faces,
            ..Self::default()
        }
    }

    /// Set the flat bonus.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.flat_bonus = bonus;
        self
    }

    /// Mark the dice sum as subtracted.
    pub fn subtracted(mut self) -> Self {
        self.is_subtracted = true;
        self
    }

    /// Allow crits on the top face.
    pub fn with_crit(mut self) -> Self {
        self.can_crit = true;
        self
    }

    /// Allow crits on `start` or higher.
    pub fn with_crit_range(mut self, start: i32) -> Self {
        self.can_crit = true;
        self.crit_range_start = Some(start);
        self
    }

    /// Set the stored crit multiplier.
    pub fn with_crit_multiplier(mut self, multiplier: i32) -> Self {
        self.crit_multiplier_override = multiplier;
        self
    }

    /// `-1` for subtracted groups, `1` otherwise.
    pub fn sign(&self) -> i64 {
        if self.is_subtracted { -1 } else { 1 }
    }

    /// Copy with `count` and `faces_per_die` clamped to at least 1.
    pub fn normalized(&self) -> Self {
        Self {
            count: self.count.max(1),
            faces_per_die: self.faces_per_die.max(1),
            ..self.clone()
        }
    }

    /// Whether a face value counts as a crit for this group.
    pub fn is_crit(&self, face: u32) -> bool {
        if !self.can_crit {
            return false;
        }
        let face = i64::from(face);
        match self.crit_range_start {
            Some(start) => face >= i64::from(start),
            None => face == i64::from(self.faces_per_die),
        }
    }

    /// Check the group's invariants. `index` is used in error messages.
    pub fn validate(&self, index: usize) -> MechResult<()> {
        if self.count < 1 {
            return Err(MechError::InvalidCount {
                index,
                count: self.count,
            });
        }
        if self.faces_per_die < 2 {
            return Err(MechError::InvalidFaces {
                index,
                faces: self.faces_per_die,
            });
        }
        match self.crit_range_start {
            Some(start) if !(1..=self.faces_per_die).contains(&start) => {
                Err(MechError::InvalidCritRange {
                    index,
                    start,
                    faces: self.faces_per_die,
                })
            }
            _ => Ok(()),
        }
    }

    /// The group without its sign, e.g. `2d6+1` or `1d20!19`.
    pub fn notation(&self) -> String {
        let mut out = format!("{}d{}", self.count, self.faces_per_die);
        if self.can_crit {
            out.push('!');
            if let Some(start) = self.crit_range_start {
                out.push_str(&start.to_string());
            }
        }
        if self.flat_bonus > 0 {
            out.push_str(&format!("+{}", self.flat_bonus));
        } else if self.flat_bonus < 0 {
            out.push_str(&self.flat_bonus.to_string());
        }
        out
    }
}

impl std::fmt::Display for DiceRollComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_subtracted {
            write!(f, "-{}", self.notation())
        } else {
            write!(f, "{}", self.notation())
        }
    }
}
