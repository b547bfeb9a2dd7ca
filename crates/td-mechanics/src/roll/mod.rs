//! Roll definitions, requests, and results.

pub mod component;
pub mod composite;
pub mod request;
pub mod result;

pub use component::DiceRollComponent;
pub use composite::CompositeRoll;
pub use request::{RollKind, RollRequest, STANDARD_DIE_FACES, StandardRoll};
pub use result::{RollResult, Segment};
