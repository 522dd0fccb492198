//! Injected sources of randomness for sample generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::content::{Angle, MAX_ANGLE};

/// Supplies the two random draws content generation needs.
pub trait SampleSource {
    /// A length, nominally uniform over `[-0.5, 0.5)`.
    fn next_length(&mut self) -> f64;

    /// An angle, nominally uniform over `0..=180`.
    fn next_angle(&mut self) -> Angle;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn next_length(&mut self) -> f64 {
        (**self).next_length()
    }

    fn next_angle(&mut self) -> Angle {
        (**self).next_angle()
    }
}

/// Uniform draws from any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Deterministic source: the same seed yields the same samples.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Recover the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> SampleSource for RngSource<R> {
    fn next_length(&mut self) -> f64 {
        self.rng.gen_range(-0.5..0.5)
    }

    fn next_angle(&mut self) -> Angle {
        self.rng.gen_range(0..=MAX_ANGLE)
    }
}

/// Replays fixed sequences of draws, cycling when exhausted.
///
/// An empty sequence yields `0.0` / `0`.
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    lengths: Vec<f64>,
    angles: Vec<Angle>,
    next_length: usize,
    next_angle: usize,
}

impl SequenceSource {
    /// Replay `lengths` and `angles` in order, each cycling independently.
    pub fn new(lengths: Vec<f64>, angles: Vec<Angle>) -> Self {
        Self {
            lengths,
            angles,
            next_length: 0,
            next_angle: 0,
        }
    }

    /// Number of angles drawn so far.
    pub fn angles_drawn(&self) -> usize {
        self.next_angle
    }
}

impl SampleSource for SequenceSource {
    fn next_length(&mut self) -> f64 {
        if self.lengths.is_empty() {
            return 0.0;
        }
        let value = self.lengths[self.next_length % self.lengths.len()];
        self.next_length += 1;
        value
    }

    fn next_angle(&mut self) -> Angle {
        if self.angles.is_empty() {
            return 0;
        }
        let value = self.angles[self.next_angle % self.angles.len()];
        self.next_angle += 1;
        value
    }
}
