//! Probability rolls made during attack resolution. Each one consumes exactly
//! one uniform `f64` in [0, 1).

use rand::{Rng, RngCore};

pub const PARALYSIS_SKIP_CHANCE: f64 = 0.25;
pub const VARIANCE_MIN: f64 = 0.85;
pub const VARIANCE_SPAN: f64 = 0.15;

pub fn unit<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

pub fn chance<R: RngCore + ?Sized>(rng: &mut R, probability: f64) -> bool {
    unit(rng) < probability
}

/// True when the move connects; a roll above the accuracy misses.
pub fn accuracy_hits<R: RngCore + ?Sized>(rng: &mut R, accuracy: f64) -> bool {
    unit(rng) * 100.0 <= accuracy
}

pub fn variance<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    VARIANCE_MIN + unit(rng) * VARIANCE_SPAN
}
