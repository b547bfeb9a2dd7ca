//! Composite roll resolution.
//!
//! Dice groups are resolved in declared order, each drawing `count` faces.
//! Crits are counted across all groups and multiply the primary attribute
//! once everything has been rolled.

use chrono::{DateTime, Utc};

use super::crit_multiplier;
use crate::dice::FaceFeed;
use crate::roll::{CompositeRoll, RollResult, Segment};
use crate::sheet::Attributes;

/// Resolve a composite roll against an attribute snapshot.
pub fn resolve(
    roll: &CompositeRoll,
    attributes: &Attributes,
    feed: &mut FaceFeed<'_>,
    timestamp: DateTime<Utc>,
) -> RollResult {
    if roll.components.is_empty() {
        tracing::warn!(roll = %roll.name, "composite roll has no dice groups");
    }

    let mut total: i64 = 0;
    let mut raw_dice = Vec::with_capacity(roll.dice_count());
    let mut breakdown = Vec::with_capacity(roll.components.len() + 3);
    let mut crit_count: u32 = 0;

    for component in &roll.components {
        let group = component.normalized();
        if group != *component {
            tracing::warn!(
                count = component.count,
                faces = component.faces_per_die,
                "clamping malformed dice group"
            );
        }

        let faces = group.faces_per_die.unsigned_abs();
        let values: Vec<u32> = (0..group.count).map(|_| feed.draw(faces)).collect();

        crit_count += values.iter().filter(|&&v| group.is_crit(v)).count() as u32;
        let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
        total += group.sign() * sum + i64::from(group.flat_bonus);

        raw_dice.extend_from_slice(&values);
        breakdown.push(Segment::Dice {
            subtracted: group.is_subtracted,
            count: group.count,
            faces: group.faces_per_die,
            values,
            bonus: group.flat_bonus,
        });
    }

    let multiplier = crit_multiplier(crit_count, roll.accumulate_crits);

    let primary = attributes.get(&roll.primary_attribute_key);
    total += i64::from(primary) * i64::from(multiplier);
    if primary != 0 {
        breakdown.push(Segment::PrimaryAttribute {
            key: roll.primary_attribute_key.clone(),
            value: primary,
            multiplier,
        });
    }

    let secondary = attributes.get(&roll.secondary_attribute_key);
    total += i64::from(secondary);
    if secondary != 0 {
        breakdown.push(Segment::SecondaryAttribute {
            key: roll.secondary_attribute_key.clone(),
            value: secondary,
        });
    }

    total += i64::from(roll.global_modifier);
    if roll.global_modifier != 0 {
        breakdown.push(Segment::Modifier {
            value: roll.global_modifier,
        });
    }

    tracing::debug!(roll = %roll.name, crit_count, multiplier, "composite roll tallied");

    RollResult::new(total, raw_dice, crit_count > 0, breakdown, timestamp)
}
