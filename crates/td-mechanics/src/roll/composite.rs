//! User-authored composite rolls.

use serde::{Deserialize, Serialize};

use super::DiceRollComponent;
use crate::dice::parse_formula;
use crate::error::{MechError, MechResult};

/// A named formula combining several dice groups with attribute modifiers.
///
/// Crits across all groups multiply the primary attribute: exactly once
/// (×2) by default, or `1 + crits` times when `accumulate_crits` is set.
/// The secondary attribute is never multiplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeRoll {
    /// Display name of the roll (e.g., "Greatsword").
    pub name: String,
    /// Dice groups in declared order.
    pub components: Vec<DiceRollComponent>,
    /// Flat modifier added after everything else.
    pub global_modifier: i32,
    /// Attribute multiplied by crits. Empty for none.
    pub primary_attribute_key: String,
    /// Attribute added as-is. Empty for none.
    pub secondary_attribute_key: String,
    /// Whether each crit adds another multiple of the primary attribute.
    pub accumulate_crits: bool,
}

impl CompositeRoll {
    /// Create an empty roll with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a roll from dice notation such as `2d6+1 - 1d4 + 3`.
    pub fn parse(name: impl Into<String>, formula: &str) -> MechResult<Self> {
        let (components, global_modifier) = parse_formula(formula)?;
        let roll = Self {
            name: name.into(),
            components,
            global_modifier,
            ..Self::default()
        };
        if roll.components.is_empty() {
            return Err(MechError::EmptyRoll(roll.name));
        }
        Ok(roll)
    }

    /// Decode a roll definition from JSON.
    pub fn from_json(json: &str) -> MechResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a dice group.
    pub fn with_component(mut self, component: DiceRollComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Set the global modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.global_modifier = modifier;
        self
    }

    /// Set the crit-multiplied attribute.
    pub fn with_primary(mut self, key: impl Into<String>) -> Self {
        self.primary_attribute_key = key.into();
        self
    }

    /// Set the unmultiplied attribute.
    pub fn with_secondary(mut self, key: impl Into<String>) -> Self {
        self.secondary_attribute_key = key.into();
        self
    }

    /// Let every crit add another multiple of the primary attribute.
    pub fn accumulating_crits(mut self) -> Self {
        self.accumulate_crits = true;
        self
    }

    /// Check every component's invariants and that at least one exists.
    pub fn validate(&self) -> MechResult<()> {
        if self.components.is_empty() {
            return Err(MechError::EmptyRoll(self.name.clone()));
        }
        for (index, component) in self.components.iter().enumerate() {
            component.validate(index)?;
        }
        Ok(())
    }

    /// Faces of every die the roll consumes, in draw order.
    pub fn die_faces(&self) -> Vec<u32> {
        self.components
            .iter()
            .map(DiceRollComponent::normalized)
            .flat_map(|c| std::iter::repeat_n(c.faces_per_die.unsigned_abs(), c.count as usize))
            .collect()
    }

    /// Total number of dice the roll consumes.
    pub fn dice_count(&self) -> usize {
        self.components
            .iter()
            .map(|c| c.normalized().count as usize)
            .sum()
    }

    /// The roll rendered as a formula, e.g. `3 + 2d6+1 - 1d4`.
    ///
    /// The global modifier leads so that [`parse`](Self::parse) reads it back
    /// as the global modifier rather than as the last group's bonus.
    pub fn formula(&self) -> String {
        let mut out = String::new();
        if self.global_modifier != 0 {
            out.push_str(&self.global_modifier.to_string());
        }
        for component in &self.components {
            match (out.is_empty(), component.is_subtracted) {
                (true, true) => out.push('-'),
                (true, false) => {}
                (false, true) => out.push_str(" - "),
                (false, false) => out.push_str(" + "),
            }
            out.push_str(&component.notation());
        }
        out
    }
}

impl std::fmt::Display for CompositeRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.formula())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greatsword() -> CompositeRoll {
        CompositeRoll::new("Greatsword")
            .with_component(DiceRollComponent::new(2, 6).with_crit())
            .with_component(DiceRollComponent::new(1, 4).subtracted())
            .with_modifier(3)
            .with_primary("STR")
            .with_secondary("DEX")
    }

    #[test]
    fn builder_sets_fields() {
        let roll = greatsword();
        assert_eq!(roll.name, "Greatsword");
        assert_eq!(roll.components.len(), 2);
        assert_eq!(roll.global_modifier, 3);
        assert_eq!(roll.primary_attribute_key, "STR");
        assert_eq!(roll.secondary_attribute_key, "DEX");
        assert!(!roll.accumulate_crits);
        assert!(roll.clone().accumulating_crits().accumulate_crits);
    }

    #[test]
    fn die_faces_in_draw_order() {
        assert_eq!(greatsword().die_faces(), vec![6, 6, 4]);
        assert_eq!(greatsword().dice_count(), 3);
    }

    #[test]
    fn die_faces_clamps_malformed_groups() {
        let roll = CompositeRoll::new("odd").with_component(DiceRollComponent::new(0, 0));
        assert_eq!(roll.die_faces(), vec![1]);
    }

    #[test]
    fn validate() {
        assert!(greatsword().validate().is_ok());
        assert_eq!(
            CompositeRoll::new("empty").validate(),
            Err(MechError::EmptyRoll("empty".into()))
        );
        let bad = greatsword().with_component(DiceRollComponent::new(1, 1));
        assert!(matches!(
            bad.validate(),
            Err(MechError::InvalidFaces { index: 2, .. })
        ));
    }

    #[test]
    fn parse_formula() {
        let roll = CompositeRoll::parse("Attack", "1d20!19 + 5").unwrap();
        assert_eq!(roll.components.len(), 1);
        assert_eq!(roll.components[0].flat_bonus, 5);
        assert_eq!(roll.components[0].crit_range_start, Some(19));
    }

    #[test]
    fn parse_rejects_constant_only() {
        assert_eq!(
            CompositeRoll::parse("flat", "5"),
            Err(MechError::EmptyRoll("flat".into()))
        );
    }

    #[test]
    fn formula_rendering() {
        assert_eq!(greatsword().formula(), "3 + 2d6! - 1d4");
        assert_eq!(greatsword().to_string(), "Greatsword: 3 + 2d6! - 1d4");
        let roll = CompositeRoll::new("neg")
            .with_component(DiceRollComponent::new(1, 8).subtracted().with_bonus(2))
            .with_modifier(-1);
        assert_eq!(roll.formula(), "-1 - 1d8+2");
        let bare =
            CompositeRoll::new("bare").with_component(DiceRollComponent::new(1, 8).subtracted());
        assert_eq!(bare.formula(), "-1d8");
    }

    #[test]
    fn formula_parses_back_to_the_same_roll() {
        let neg = CompositeRoll::new("neg")
            .with_component(DiceRollComponent::new(1, 8).subtracted().with_bonus(2))
            .with_component(DiceRollComponent::new(1, 20).with_crit_range(19).with_bonus(-3))
            .with_modifier(-1);
        for roll in [greatsword(), neg] {
            let parsed = CompositeRoll::parse(roll.name.clone(), &roll.formula()).unwrap();
            assert_eq!(parsed.components, roll.components, "{}", roll.formula());
            assert_eq!(parsed.global_modifier, roll.global_modifier);
        }
    }

    #[test]
    fn json_roundtrip() {
        let roll = greatsword();
        let json = serde_json::to_string(&roll).unwrap();
        assert_eq!(CompositeRoll::from_json(&json).unwrap(), roll);
    }

    #[test]
    fn json_errors_are_reported() {
        assert!(matches!(
            CompositeRoll::from_json("{not json"),
            Err(MechError::InvalidDefinition(_))
        ));
    }
}
