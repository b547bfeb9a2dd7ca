//! Frame-driven dice simulator for Tabledice.
//!
//! Dice sit idle on a rectangular play surface until the user grabs one,
//! drags it, and lets go. Released dice roll with friction, bounce off the
//! walls, and settle on a face. The host calls
//! [`DiceSimulator::update`] once per render frame; when every die has
//! settled it receives the face values, in dice order, exactly once.

/// Configuration for the simulator's physics and interaction.
pub mod config;
/// A single simulated die and its lifecycle state.
pub mod die;
/// Error types for the simulation crate.
pub mod error;
/// Pointer motion tracking for throw velocities.
pub mod pointer;
/// The dice simulator itself.
pub mod simulator;
/// The bounded play surface.
pub mod surface;

/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`die::Die`] and [`die::DieState`].
pub use die::{Die, DieState};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`simulator::DiceSimulator`], [`simulator::SimPhase`], and [`simulator::TickOutcome`].
pub use simulator::{DiceSimulator, SimPhase, TickOutcome};
/// Re-export of [`surface::Surface`].
pub use surface::Surface;

/// Re-export of the vector type used for positions and velocities.
pub use glam::Vec2;
