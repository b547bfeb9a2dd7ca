use crate::error::{SimError, SimResult};
use crate::surface::Surface;

/// Configuration for a dice simulator.
///
/// Velocities are in surface units per reference frame and spins in radians
/// per reference frame, so the per-tick factors below apply unchanged when
/// the host updates at exactly `frame_time`.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic runs. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// The bounded play surface.
    pub surface: Surface,
    /// Edge length of a die's square bounding box.
    pub die_size: f32,
    /// Duration of one reference frame in seconds.
    pub frame_time: f32,
    /// Fraction of perpendicular speed kept after hitting a wall.
    pub restitution: f32,
    /// Per-frame multiplier applied to linear velocity.
    pub linear_friction: f32,
    /// Per-frame multiplier applied to angular velocity.
    pub angular_friction: f32,
    /// Largest random spin change added on a wall bounce.
    pub bounce_spin_kick: f32,
    /// Speed (`|vx| + |vy|`) above which the visible face flickers.
    pub tumble_speed: f32,
    /// Per-frame chance of a face flicker while tumbling.
    pub tumble_chance: f64,
    /// Speed and spin below which a rolling die settles.
    pub settle_epsilon: f32,
    /// Minimum speed given to a released die.
    pub min_release_speed: f32,
    /// Minimum spin given to a released die.
    pub min_release_spin: f32,
    /// Spin added per unit of release speed.
    pub spin_per_speed: f32,
    /// How far back pointer samples count toward the release velocity, in seconds.
    pub pointer_window: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            surface: Surface::new(800.0, 600.0),
            die_size: 48.0,
            frame_time: 1.0 / 60.0,
            restitution: 0.7,
            linear_friction: 0.96,
            angular_friction: 0.95,
            bounce_spin_kick: 0.15,
            tumble_speed: 4.0,
            tumble_chance: 0.15,
            settle_epsilon: 0.1,
            min_release_speed: 6.0,
            min_release_spin: 0.2,
            spin_per_speed: 0.02,
            pointer_window: 0.1,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the play surface size.
    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.surface = Surface::new(width, height);
        self
    }

    /// Set the die edge length.
    pub fn with_die_size(mut self, size: f32) -> Self {
        self.die_size = size;
        self
    }

    /// Set the wall restitution.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the per-frame linear and angular friction multipliers.
    pub fn with_friction(mut self, linear: f32, angular: f32) -> Self {
        self.linear_friction = linear;
        self.angular_friction = angular;
        self
    }

    /// Set the minimum speed and spin of a released die.
    pub fn with_min_release(mut self, speed: f32, spin: f32) -> Self {
        self.min_release_speed = speed;
        self.min_release_spin = spin;
        self
    }

    /// Half the die edge length.
    pub fn half_extent(&self) -> f32 {
        self.die_size / 2.0
    }

    /// Check that every value is in a usable range.
    pub fn validate(&self) -> SimResult<()> {
        let fail = |msg: String| Err(SimError::InvalidConfig(msg));
        if !(positive(self.surface.width) && positive(self.surface.height)) {
            return fail(format!(
                "surface must have positive size, got {}x{}",
                self.surface.width, self.surface.height
            ));
        }
        if !positive(self.die_size) {
            return fail(format!("die size must be positive, got {}", self.die_size));
        }
        if !positive(self.frame_time) {
            return fail(format!("frame time must be positive, got {}", self.frame_time));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return fail(format!("restitution must be in 0..=1, got {}", self.restitution));
        }
        for (name, value) in [
            ("linear friction", self.linear_friction),
            ("angular friction", self.angular_friction),
        ] {
            if !(positive(value) && value < 1.0) {
                return fail(format!("{name} must be in (0, 1), got {value}"));
            }
        }
        if !(0.0..=1.0).contains(&self.tumble_chance) {
            return fail(format!("tumble chance must be in 0..=1, got {}", self.tumble_chance));
        }
        if !positive(self.settle_epsilon) {
            return fail(format!("settle epsilon must be positive, got {}", self.settle_epsilon));
        }
        if !positive(self.pointer_window as f32) {
            return fail(format!("pointer window must be positive, got {}", self.pointer_window));
        }
        Ok(())
    }
}

/// Strictly above zero. NaN is not.
fn positive(value: f32) -> bool {
    value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, None);
        assert!((config.restitution - 0.7).abs() < f32::EPSILON);
        assert!((config.linear_friction - 0.96).abs() < f32::EPSILON);
        assert!((config.angular_friction - 0.95).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(7)
            .with_surface(400.0, 300.0)
            .with_die_size(20.0)
            .with_restitution(0.5)
            .with_friction(0.9, 0.8)
            .with_min_release(3.0, 0.5);
        assert_eq!(config.seed, Some(7));
        assert!((config.surface.width - 400.0).abs() < f32::EPSILON);
        assert!((config.half_extent() - 10.0).abs() < f32::EPSILON);
        assert!((config.restitution - 0.5).abs() < f32::EPSILON);
        assert!((config.linear_friction - 0.9).abs() < f32::EPSILON);
        assert!((config.min_release_spin - 0.5).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_bad_values() {
        assert!(SimConfig::default().with_surface(0.0, 10.0).validate().is_err());
        assert!(SimConfig::default().with_restitution(1.5).validate().is_err());
        assert!(SimConfig::default().with_friction(1.0, 0.9).validate().is_err());
        assert!(SimConfig::default().with_die_size(-1.0).validate().is_err());
        let err = SimConfig::default()
            .with_friction(0.9, 0.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("angular friction"));
    }
}
