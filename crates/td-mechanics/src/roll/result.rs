//! Resolved roll results and their breakdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One term of a result's breakdown, in the order it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// A standard roll's attribute, doubled on a crit.
    Attribute {
        /// Attribute label.
        label: String,
        /// Attribute value before doubling.
        value: i32,
        /// Whether the die crit and doubled the value.
        critical: bool,
    },
    /// A standard roll's skill value.
    Skill {
        /// Skill value.
        value: i32,
    },
    /// A standard roll's d6.
    Die {
        /// The face rolled.
        value: u32,
    },
    /// A standard roll's situational bonus.
    Bonus {
        /// Bonus value.
        value: i32,
    },
    /// One dice group of a composite roll.
    Dice {
        /// Whether the group's sum was subtracted.
        subtracted: bool,
        /// Number of dice rolled.
        count: i32,
        /// Faces per die.
        faces: i32,
        /// The faces drawn, in order.
        values: Vec<u32>,
        /// The group's flat bonus.
        bonus: i32,
    },
    /// The crit-multiplied attribute of a composite roll.
    PrimaryAttribute {
        /// Attribute key.
        key: String,
        /// Attribute value before multiplying.
        value: i32,
        /// Crit multiplier applied (1 without crits).
        multiplier: i32,
    },
    /// The unmultiplied attribute of a composite roll.
    SecondaryAttribute {
        /// Attribute key.
        key: String,
        /// Attribute value.
        value: i32,
    },
    /// A composite roll's global modifier.
    Modifier {
        /// Modifier value.
        value: i32,
    },
}

impl Segment {
    /// What this term contributed to the total.
    pub fn contribution(&self) -> i64 {
        match self {
            Self::Attribute {
                value, critical, ..
            } => i64::from(*value) * if *critical { 2 } else { 1 },
            Self::Skill { value } | Self::Bonus { value } | Self::Modifier { value } => {
                i64::from(*value)
            }
            Self::SecondaryAttribute { value, .. } => i64::from(*value),
            Self::Die { value } => i64::from(*value),
            Self::Dice {
                subtracted,
                values,
                bonus,
                ..
            } => {
                let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
                let sign = if *subtracted { -1 } else { 1 };
                sign * sum + i64::from(*bonus)
            }
            Self::PrimaryAttribute {
                value, multiplier, ..
            } => i64::from(*value) * i64::from(*multiplier),
        }
    }
}

fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute {
                label,
                value,
                critical,
            } => {
                if *critical {
                    write!(f, "{label} {value} ×2 CRIT")
                } else {
                    write!(f, "{label} {value}")
                }
            }
            Self::Skill { value } => write!(f, "Skill {value}"),
            Self::Die { value } => write!(f, "d6 [{value}]"),
            Self::Bonus { value } => write!(f, "Bonus {}", signed(*value)),
            Self::Dice {
                subtracted,
                count,
                faces,
                values,
                bonus,
            } => {
                let sign = if *subtracted { '-' } else { '+' };
                let rolled: Vec<String> = values.iter().map(u32::to_string).collect();
                write!(f, "{sign} {count}d{faces} [{}]", rolled.join(", "))?;
                if *bonus != 0 {
                    write!(f, " {}", signed(*bonus))?;
                }
                Ok(())
            }
            Self::PrimaryAttribute {
                key,
                value,
                multiplier,
            } => {
                if *multiplier > 1 {
                    write!(f, "+ {key} {value} ×{multiplier} CRIT")
                } else {
                    write!(f, "+ {key} {value}")
                }
            }
            Self::SecondaryAttribute { key, value } => write!(f, "+ {key} {value}"),
            Self::Modifier { value } => write!(f, "{}", signed(*value)),
        }
    }
}

/// The outcome of resolving a roll. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    total: i64,
    raw_dice: Vec<u32>,
    is_critical: bool,
    breakdown: Vec<Segment>,
    timestamp: DateTime<Utc>,
}

impl RollResult {
    pub(crate) fn new(
        total: i64,
        raw_dice: Vec<u32>,
        is_critical: bool,
        breakdown: Vec<Segment>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            total,
            raw_dice,
            is_critical,
            breakdown,
            timestamp,
        }
    }

    /// The final total.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Every face used, in draw order.
    pub fn raw_dice(&self) -> &[u32] {
        &self.raw_dice
    }

    /// Whether any die scored a crit.
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Terms explaining the total, in order.
    pub fn breakdown(&self) -> &[Segment] {
        &self.breakdown
    }

    /// The breakdown rendered as text, one line per term.
    pub fn breakdown_lines(&self) -> Vec<String> {
        self.breakdown.iter().map(Segment::to_string).collect()
    }

    /// When the roll was resolved.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.raw_dice.iter().map(u32::to_string).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total)?;
        if self.is_critical {
            write!(f, " CRIT")?;
        }
        Ok(())
    }
}
