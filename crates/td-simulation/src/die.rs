use glam::Vec2;

use crate::error::{SimError, SimResult};

/// Where a die is in its lifecycle.
///
/// States only move forward, one step at a time:
/// `Idle → Dragging → Rolling → Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DieState {
    /// Resting where it was placed; never moves on its own.
    Idle,
    /// Held by the pointer.
    Dragging,
    /// Released and moving.
    Rolling,
    /// Stopped with its final face showing.
    Settled,
}

impl DieState {
    /// Returns true if `next` directly follows this state.
    pub fn can_transition_to(self, next: DieState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Dragging)
                | (Self::Dragging, Self::Rolling)
                | (Self::Rolling, Self::Settled)
        )
    }

    /// Returns true for the final state.
    pub fn is_terminal(self) -> bool {
        self == Self::Settled
    }
}

impl std::fmt::Display for DieState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Dragging => write!(f, "dragging"),
            Self::Rolling => write!(f, "rolling"),
            Self::Settled => write!(f, "settled"),
        }
    }
}

/// A single die on the play surface.
///
/// Owned by a [`DiceSimulator`](crate::DiceSimulator); hosts read it for
/// rendering but cannot move it directly.
#[derive(Debug, Clone)]
pub struct Die {
    index: usize,
    faces: u32,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) rotation: f32,
    pub(crate) angular_velocity: f32,
    pub(crate) face_value: u32,
    pub(crate) forced_face: Option<u32>,
    state: DieState,
}

impl Die {
    pub(crate) fn new(index: usize, faces: u32, position: Vec2, face_value: u32) -> Self {
        Self {
            index,
            faces: faces.max(1),
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            face_value,
            forced_face: None,
            state: DieState::Idle,
        }
    }

    /// Move to `next`, rejecting anything but the next lifecycle step.
    pub(crate) fn transition(&mut self, next: DieState) -> SimResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(SimError::IllegalTransition {
                die: self.index,
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(die = self.index, from = %self.state, to = %next, "die state change");
        self.state = next;
        Ok(())
    }

    /// Position in the simulator's dice list, fixed for the roll.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of faces.
    pub fn faces(&self) -> u32 {
        self.faces
    }

    /// Center of the die.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Linear velocity per reference frame.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Spin in radians per reference frame.
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// The face currently showing. Final once settled.
    pub fn face_value(&self) -> u32 {
        self.face_value
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DieState {
        self.state
    }

    /// `|vx| + |vy|`.
    pub fn speed(&self) -> f32 {
        self.velocity.x.abs() + self.velocity.y.abs()
    }

    /// Returns true if `point` lies within the die's bounding box.
    pub fn contains(&self, point: Vec2, half_extent: f32) -> bool {
        let offset = (point - self.position).abs();
        offset.x <= half_extent && offset.y <= half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DieState; 4] = [
        DieState::Idle,
        DieState::Dragging,
        DieState::Rolling,
        DieState::Settled,
    ];

    #[test]
    fn only_forward_single_steps_allowed() {
        for (i, from) in ALL.iter().enumerate() {
            for (j, to) in ALL.iter().enumerate() {
                assert_eq!(from.can_transition_to(*to), j == i + 1, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn settled_is_terminal() {
        assert!(DieState::Settled.is_terminal());
        assert!(!DieState::Rolling.is_terminal());
    }

    #[test]
    fn transition_walks_lifecycle() {
        let mut die = Die::new(0, 6, Vec2::ZERO, 1);
        assert_eq!(die.state(), DieState::Idle);
        die.transition(DieState::Dragging).unwrap();
        die.transition(DieState::Rolling).unwrap();
        die.transition(DieState::Settled).unwrap();
        assert_eq!(die.state(), DieState::Settled);
    }

    #[test]
    fn transition_rejects_skips() {
        let mut die = Die::new(3, 6, Vec2::ZERO, 1);
        let err = die.transition(DieState::Rolling).unwrap_err();
        assert_eq!(
            err,
            SimError::IllegalTransition {
                die: 3,
                from: DieState::Idle,
                to: DieState::Rolling,
            }
        );
        assert_eq!(err.to_string(), "die 3: illegal transition idle -> rolling");
        assert_eq!(die.state(), DieState::Idle);
    }

    #[test]
    fn hit_test_uses_box() {
        let die = Die::new(0, 6, Vec2::new(50.0, 50.0), 1);
        assert!(die.contains(Vec2::new(60.0, 40.0), 10.0));
        assert!(!die.contains(Vec2::new(61.0, 50.0), 10.0));
    }

    #[test]
    fn speed_is_manhattan() {
        let mut die = Die::new(0, 6, Vec2::ZERO, 1);
        die.velocity = Vec2::new(-3.0, 4.0);
        assert!((die.speed() - 7.0).abs() < f32::EPSILON);
    }
}
