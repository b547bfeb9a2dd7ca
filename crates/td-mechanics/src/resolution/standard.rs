//! Standard attribute + skill checks.
//!
//! One d6 is rolled. A 6 always crits and doubles the attribute, whatever
//! crit ranges composite rolls may use.

use chrono::{DateTime, Utc};

use crate::dice::FaceFeed;
use crate::roll::{RollResult, STANDARD_DIE_FACES, Segment, StandardRoll};

/// Resolve a standard roll, drawing its die from `feed`.
pub fn resolve(roll: &StandardRoll, feed: &mut FaceFeed<'_>, timestamp: DateTime<Utc>) -> RollResult {
    let die = feed.draw(STANDARD_DIE_FACES);
    let is_critical = die == STANDARD_DIE_FACES;

    let attribute = i64::from(roll.attribute_value);
    let effective_attribute = if is_critical { attribute * 2 } else { attribute };
    let total = effective_attribute
        + i64::from(roll.skill_value)
        + i64::from(die)
        + i64::from(roll.bonus);

    let mut breakdown = vec![
        Segment::Attribute {
            label: roll.attribute_label.clone(),
            value: roll.attribute_value,
            critical: is_critical,
        },
        Segment::Skill {
            value: roll.skill_value,
        },
        Segment::Die { value: die },
    ];
    if roll.bonus != 0 {
        breakdown.push(Segment::Bonus { value: roll.bonus });
    }

    RollResult::new(total, vec![die], is_critical, breakdown, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roll_with(roll: &StandardRoll, die: u32) -> RollResult {
        let mut rng = StdRng::seed_from_u64(42);
        let supplied = [die];
        let mut feed = FaceFeed::new(&supplied, &mut rng);
        resolve(roll, &mut feed, Utc::now())
    }

    #[test]
    fn six_crits_and_doubles_attribute() {
        let roll = StandardRoll::new("Might", 4, 2).with_bonus(3);
        let result = roll_with(&roll, 6);
        assert!(result.is_critical());
        assert_eq!(result.total(), 4 * 2 + 2 + 6 + 3);
        assert_eq!(result.raw_dice(), &[6]);
    }

    #[test]
    fn non_max_die_is_plain() {
        let roll = StandardRoll::new("Might", 4, 2).with_bonus(3);
        let result = roll_with(&roll, 3);
        assert!(!result.is_critical());
        assert_eq!(result.total(), 4 + 2 + 3 + 3);
    }

    #[test]
    fn breakdown_order_and_crit_annotation() {
        let roll = StandardRoll::new("Might", 4, 2).with_bonus(-1);
        let result = roll_with(&roll, 6);
        assert_eq!(
            result.breakdown_lines(),
            vec!["Might 4 ×2 CRIT", "Skill 2", "d6 [6]", "Bonus -1"]
        );
    }

    #[test]
    fn zero_bonus_is_omitted() {
        let roll = StandardRoll::new("Wits", 1, 0);
        let result = roll_with(&roll, 2);
        assert_eq!(result.breakdown_lines(), vec!["Wits 1", "Skill 0", "d6 [2]"]);
    }

    #[test]
    fn generates_die_when_not_supplied() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut feed = FaceFeed::generated(&mut rng);
        let result = resolve(&StandardRoll::new("Wits", 1, 1), &mut feed, Utc::now());
        assert_eq!(result.raw_dice().len(), 1);
        assert!((1..=6).contains(&result.raw_dice()[0]));
    }
}
