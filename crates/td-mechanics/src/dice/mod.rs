//! Face-value sources and dice notation.
//!
//! A [`FaceFeed`] hands out face values one die at a time. Values supplied by
//! the caller (typically the settled faces of a physical simulation) are
//! consumed left to right; once they run out, each further die is generated
//! uniformly from the RNG. Fallback is per die, never per list.

pub mod notation;

pub use notation::parse_formula;

use rand::Rng;
use rand::rngs::StdRng;

/// Hands out face values from a supplied sequence, falling back to an RNG.
pub struct FaceFeed<'a> {
    supplied: &'a [u32],
    cursor: usize,
    generated: usize,
    rng: &'a mut StdRng,
}

impl std::fmt::Debug for FaceFeed<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceFeed")
            .field("supplied", &self.supplied.len())
            .field("consumed", &self.cursor)
            .field("generated", &self.generated)
            .finish()
    }
}

impl<'a> FaceFeed<'a> {
    /// Create a feed that consumes `supplied` before touching the RNG.
    pub fn new(supplied: &'a [u32], rng: &'a mut StdRng) -> Self {
        Self {
            supplied,
            cursor: 0,
            generated: 0,
            rng,
        }
    }

    /// Create a feed that generates every value.
    pub fn generated(rng: &'a mut StdRng) -> Self {
        Self::new(&[], rng)
    }

    /// Draw the next face value for a die with `faces` sides.
    ///
    /// A supplied value outside `1..=faces` is clamped into range.
    pub fn draw(&mut self, faces: u32) -> u32 {
        let faces = faces.max(1);
        match self.supplied.get(self.cursor) {
            Some(&value) => {
                self.cursor += 1;
                let clamped = value.clamp(1, faces);
                if clamped != value {
                    tracing::warn!(value, faces, "supplied face out of range, clamping");
                }
                clamped
            }
            None => {
                self.generated += 1;
                let value = self.rng.random_range(1..=faces);
                tracing::debug!(value, faces, "generated face");
                value
            }
        }
    }

    /// Number of supplied values consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Number of values produced by the RNG so far.
    pub fn generated_count(&self) -> usize {
        self.generated
    }

    /// Number of supplied values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.supplied.len() - self.cursor
    }
}

/// Roll one die per entry of `faces` without any motion.
pub fn roll_instant(faces: &[u32], rng: &mut StdRng) -> Vec<u32> {
    let mut feed = FaceFeed::generated(rng);
    faces.iter().map(|&f| feed.draw(f)).collect()
}
