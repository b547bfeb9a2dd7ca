use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;
use crate::die::{Die, DieState};
use crate::pointer::PointerTracker;
use crate::surface::Wall;

/// Where the simulator is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    /// Dice are on the table and at least one has not settled.
    Active,
    /// Every die settled and the faces were handed out.
    Completed,
    /// The roll was abandoned before all dice settled.
    Cancelled,
}

/// What an [`update`](DiceSimulator::update) produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still waiting on at least one die.
    Pending,
    /// All dice settled. Faces in dice order. Returned exactly once.
    Complete(Vec<u32>),
    /// The roll already completed or was cancelled.
    Closed,
}

/// The die currently held by the pointer.
#[derive(Debug, Clone, Copy)]
struct Grab {
    index: usize,
    last: Vec2,
}

/// Simulates one roll of a fixed set of dice on a bounded table.
///
/// Single-threaded and frame-driven: the host forwards pointer events as
/// they arrive and calls [`update`](Self::update) once per frame. Once the
/// faces have been returned, or the roll cancelled, the simulator is spent.
pub struct DiceSimulator {
    config: SimConfig,
    dice: Vec<Die>,
    rng: StdRng,
    clock: f64,
    grab: Option<Grab>,
    pointer: PointerTracker,
    phase: SimPhase,
}

impl std::fmt::Debug for DiceSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceSimulator")
            .field("phase", &self.phase)
            .field("dice", &self.dice.len())
            .field("clock", &self.clock)
            .field("grabbed", &self.grab.map(|g| g.index))
            .finish()
    }
}

impl DiceSimulator {
    /// Lay out one idle die per entry of `faces` across the middle of the surface.
    pub fn new(config: SimConfig, faces: &[u32]) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let positions = layout(&config, faces.len());
        let dice = faces
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(index, (&f, position))| {
                let shown = rng.random_range(1..=f.max(1));
                Die::new(index, f, position, shown)
            })
            .collect();

        tracing::debug!(count = faces.len(), "dice placed");

        Self {
            pointer: PointerTracker::new(config.pointer_window),
            config,
            dice,
            rng,
            clock: 0.0,
            grab: None,
            phase: SimPhase::Active,
        }
    }

    /// Fix the final faces of the first dice instead of rolling them randomly.
    ///
    /// Extra values are ignored; values out of range are clamped when the die settles.
    pub fn with_forced_faces(mut self, faces: &[u32]) -> Self {
        for (die, &face) in self.dice.iter_mut().zip(faces) {
            die.forced_face = Some(face);
        }
        self
    }

    /// The dice, in index order. Empty once the roll is over.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Seconds of simulated time so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// The configuration in use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Index of the die held by the pointer, if any.
    pub fn grabbed(&self) -> Option<usize> {
        self.grab.map(|g| g.index)
    }

    /// Returns true once every die has settled.
    pub fn all_settled(&self) -> bool {
        self.dice.iter().all(|d| d.state() == DieState::Settled)
    }

    /// Grab the topmost idle die under the pointer. Returns its index.
    pub fn pointer_down(&mut self, at: Vec2) -> Option<usize> {
        if self.phase != SimPhase::Active || self.grab.is_some() {
            return None;
        }
        let half = self.config.half_extent();
        // Later dice are drawn on top of earlier ones.
        let index = self
            .dice
            .iter()
            .rev()
            .find(|d| d.state() == DieState::Idle && d.contains(at, half))?
            .index();

        self.capture(index, at)
    }

    /// Drag the held die along with the pointer. Returns false if nothing is held.
    pub fn pointer_move(&mut self, at: Vec2) -> bool {
        let Some(grab) = self.grab.as_mut() else {
            return false;
        };
        let delta = at - grab.last;
        grab.last = at;
        let index = grab.index;

        self.dice[index].position += delta;
        self.pointer.record(self.clock, at);
        true
    }

    /// Let go of the held die, throwing it with the pointer's recent velocity.
    /// Returns the index of the released die.
    pub fn pointer_up(&mut self, at: Vec2) -> Option<usize> {
        if self.grab.is_none() {
            return None;
        }
        self.pointer_move(at);
        let grab = self.grab.take()?;

        // A burst of events between two frames counts as one frame of motion.
        let (moved, elapsed) = self.pointer.motion(self.clock);
        let measured = if elapsed > f64::EPSILON {
            moved / elapsed as f32 * self.config.frame_time
        } else {
            moved
        };
        self.pointer.clear();

        self.release(grab.index, measured)
    }

    /// Throw every idle die in a random direction without pointer input.
    /// Returns how many dice were thrown.
    pub fn fling_all(&mut self) -> usize {
        if self.phase != SimPhase::Active || self.grab.is_some() {
            return 0;
        }
        let idle: Vec<usize> = self
            .dice
            .iter()
            .filter(|d| d.state() == DieState::Idle)
            .map(Die::index)
            .collect();

        let mut thrown = 0;
        for index in idle {
            let at = self.dice[index].position;
            if self.capture(index, at).is_none() {
                continue;
            }
            self.grab = None;
            let speed = self.config.min_release_speed.max(1.0) * self.rng.random_range(2.0..4.0);
            let direction = Vec2::from_angle(self.rng.random_range(0.0..std::f32::consts::TAU));
            if self.release(index, direction * speed).is_some() {
                thrown += 1;
            }
        }
        thrown
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Physics factors are scaled so that a `dt` equal to the configured
    /// frame time applies them exactly once. Returns the faces the first
    /// time every die is settled.
    pub fn update(&mut self, dt: f32) -> TickOutcome {
        if self.phase != SimPhase::Active {
            return TickOutcome::Closed;
        }

        let frame_time = self.config.frame_time;
        let dt = dt.clamp(0.0, frame_time * 4.0);
        self.clock += f64::from(dt);
        let steps = dt / frame_time;

        for index in 0..self.dice.len() {
            if self.dice[index].state() == DieState::Rolling {
                self.step_die(index, steps);
            }
        }

        if !self.all_settled() {
            return TickOutcome::Pending;
        }

        let faces: Vec<u32> = self.dice.iter().map(Die::face_value).collect();
        self.dice.clear();
        self.phase = SimPhase::Completed;
        tracing::info!(?faces, elapsed = self.clock, "dice settled");
        TickOutcome::Complete(faces)
    }

    /// Abandon the roll. Dice are discarded and no faces will ever be returned.
    /// Returns false if the roll had already ended.
    pub fn cancel(&mut self) -> bool {
        if self.phase != SimPhase::Active {
            return false;
        }
        let discarded = self.dice.len();
        self.dice.clear();
        self.grab = None;
        self.pointer.clear();
        self.phase = SimPhase::Cancelled;
        tracing::info!(discarded, "roll cancelled");
        true
    }

    fn capture(&mut self, index: usize, at: Vec2) -> Option<usize> {
        if let Err(err) = self.dice[index].transition(DieState::Dragging) {
            tracing::warn!(%err, "pointer capture refused");
            return None;
        }
        self.grab = Some(Grab { index, last: at });
        self.pointer.clear();
        self.pointer.record(self.clock, at);
        Some(index)
    }

    fn release(&mut self, index: usize, measured: Vec2) -> Option<usize> {
        let (velocity, spin) = self.release_motion(measured);
        let die = &mut self.dice[index];
        if let Err(err) = die.transition(DieState::Rolling) {
            tracing::warn!(%err, "release refused");
            return None;
        }
        die.velocity = velocity;
        die.angular_velocity = spin;
        tracing::debug!(die = index, vx = velocity.x, vy = velocity.y, spin, "die thrown");
        Some(index)
    }

    /// Release velocity and spin, raised to the configured minimums.
    fn release_motion(&mut self, measured: Vec2) -> (Vec2, f32) {
        let floor = self.config.settle_epsilon * 2.0;
        let min_speed = self.config.min_release_speed.max(floor);
        let min_spin = self.config.min_release_spin.max(floor);

        let mut velocity = measured;
        let speed = manhattan(velocity);
        if speed.is_nan() || speed < min_speed {
            let direction = if speed > f32::EPSILON && speed.is_finite() {
                velocity
            } else {
                Vec2::from_angle(self.rng.random_range(0.0..std::f32::consts::TAU))
            };
            velocity = direction * (min_speed / manhattan(direction));
        }

        let sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let spin = (manhattan(velocity) * self.config.spin_per_speed).max(min_spin) * sign;
        (velocity, spin)
    }

    fn step_die(&mut self, index: usize, steps: f32) {
        let half = self.config.half_extent();
        let restitution = self.config.restitution;
        let kick = self.config.bounce_spin_kick.abs();
        let surface = self.config.surface;

        let die = &mut self.dice[index];
        die.position += die.velocity * steps;
        die.rotation += die.angular_velocity * steps;

        let contact = surface.confine(&mut die.position, half);
        match contact.x {
            Some(Wall::Left) => die.velocity.x = die.velocity.x.abs() * restitution,
            Some(Wall::Right) => die.velocity.x = -die.velocity.x.abs() * restitution,
            _ => {}
        }
        match contact.y {
            Some(Wall::Top) => die.velocity.y = die.velocity.y.abs() * restitution,
            Some(Wall::Bottom) => die.velocity.y = -die.velocity.y.abs() * restitution,
            _ => {}
        }
        if contact.any() {
            die.angular_velocity += self.rng.random_range(-kick..=kick);
            tracing::trace!(die = index, ?contact, "wall bounce");
        }

        die.velocity *= self.config.linear_friction.powf(steps);
        die.angular_velocity *= self.config.angular_friction.powf(steps);

        if die.speed() > self.config.tumble_speed
            && self
                .rng
                .random_bool(self.config.tumble_chance.clamp(0.0, 1.0))
        {
            die.face_value = self.rng.random_range(1..=die.faces());
        }

        let epsilon = self.config.settle_epsilon;
        if die.speed() < epsilon && die.angular_velocity.abs() < epsilon {
            let faces = die.faces();
            die.face_value = match die.forced_face {
                Some(face) => face.clamp(1, faces),
                None => self.rng.random_range(1..=faces),
            };
            die.velocity = Vec2::ZERO;
            die.angular_velocity = 0.0;
            if let Err(err) = die.transition(DieState::Settled) {
                tracing::warn!(%err, "settle refused");
            }
        }
    }
}

fn manhattan(v: Vec2) -> f32 {
    v.x.abs() + v.y.abs()
}

/// Centers for `count` dice in rows across the middle of the surface.
fn layout(config: &SimConfig, count: usize) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let surface = config.surface;
    let spacing = config.die_size * 1.5;
    let per_row = ((surface.width / spacing).floor() as usize).max(1);
    let rows = count.div_ceil(per_row);
    let top = surface.height / 2.0 - (rows as f32 - 1.0) * spacing / 2.0;

    (0..count)
        .map(|i| {
            let row = i / per_row;
            let in_row = (count - row * per_row).min(per_row);
            let col = i % per_row;
            let left = surface.width / 2.0 - (in_row as f32 - 1.0) * spacing / 2.0;
            let mut center = Vec2::new(left + col as f32 * spacing, top + row as f32 * spacing);
            surface.confine(&mut center, config.half_extent());
            center
        })
        .collect()
}
