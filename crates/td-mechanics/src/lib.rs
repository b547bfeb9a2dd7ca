//! Roll definitions and deterministic roll resolution for Tabledice.
//!
//! Provides the boundary contract between the dice subsystem and the rest of
//! a tabletop companion app: a [`RollRequest`] goes in, an immutable
//! [`RollResult`] comes out. Two request shapes are supported: standard
//! attribute + skill checks on a single d6, and user-authored
//! [`CompositeRoll`]s made of several dice groups with crit rules and
//! attribute modifiers. Face values may be supplied by a physical dice
//! simulation or generated internally.

pub mod dice;
pub mod error;
pub mod history;
pub mod resolution;
pub mod roll;
pub mod sheet;

pub use dice::{FaceFeed, roll_instant};
pub use error::{MechError, MechResult};
pub use history::{HistoryEntry, RollHistory};
pub use resolution::{crit_multiplier, resolve, resolve_at};
pub use roll::{
    CompositeRoll, DiceRollComponent, RollKind, RollRequest, RollResult, STANDARD_DIE_FACES, Segment,
    StandardRoll,
};
pub use sheet::Attributes;
