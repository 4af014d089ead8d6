//! The seeded value engine.
//!
//! An [`Engine`] holds the global seed and the selected [`Algorithm`]. Every draw is
//! re-derived from scratch: the effective seed is the global seed immediately followed
//! by the call-site sub-seed (no separator), it is expanded by
//! [`ExpandedState::from_seed`] and run through the current algorithm. There is no
//! cursor, so the same `(seed, algorithm, sub-seed)` always yields the same value.
//!
//! Seeds and sub-seeds are anything that implements [`Display`]; numbers are used by
//! their textual form.
//!
//! Share an engine as `Arc<Engine>`. Changing the seed or algorithm refreshes every
//! registered [`Dependent`] synchronously before the setter returns.

use std::{f64::consts::TAU, fmt::Display, sync::Arc};

use parking_lot::{ReentrantMutex, RwLock};

use crate::{
    algorithm::Algorithm,
    config::EngineConfig,
    error::Error,
    hash::ExpandedState,
    notify::{ChangeNotifier, Dependent, DependentId},
};

/// Probability used by callers that want a fair coin.
pub const DEFAULT_PROBABILITY: f64 = 0.5;
/// Decimal digits kept by [`Engine::random_float`] when callers have no preference.
pub const DEFAULT_PRECISION: u32 = 2;

/// Number of distinct `#rrggbb` colors.
const COLOR_SPACE: f64 = 16_777_216.0;

#[derive(Debug, Default)]
pub struct Engine {
    state: RwLock<EngineConfig>,
    notifier: ChangeNotifier,
    /// Held by a setter across its state write and the refresh pass, so passes never
    /// interleave. Reentrant so a refresh may itself call a setter.
    update: ReentrantMutex<()>,
}

impl Engine {
    /// Empty seed, `splitmix32`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: RwLock::new(config),
            notifier: ChangeNotifier::new(),
            update: ReentrantMutex::new(()),
        }
    }

    /// Snapshot of the current seed and algorithm.
    pub fn config(&self) -> EngineConfig {
        self.state.read().clone()
    }

    pub fn seed(&self) -> String {
        self.state.read().seed.clone()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.state.read().algorithm
    }

    /// Replaces the global seed.
    ///
    /// Returns `false` without notifying anyone when the seed is unchanged.
    pub fn set_seed(&self, seed: impl Display) -> bool {
        let seed = seed.to_string();
        let _update = self.update.lock();
        {
            let mut state = self.state.write();
            if state.seed == seed {
                return false;
            }
            tracing::debug!(old = %state.seed, new = %seed, "seed changed");
            state.seed = seed;
        }
        self.notifier.notify_all(self);
        true
    }

    /// Selects the generator used by every subsequent draw.
    ///
    /// Returns `false` without notifying anyone when `algorithm` is already active.
    pub fn set_algorithm(&self, algorithm: Algorithm) -> bool {
        let _update = self.update.lock();
        {
            let mut state = self.state.write();
            if state.algorithm == algorithm {
                return false;
            }
            tracing::debug!(old = %state.algorithm, new = %algorithm, "algorithm changed");
            state.algorithm = algorithm;
        }
        self.notifier.notify_all(self);
        true
    }

    /// Same as [`Engine::set_algorithm`], selecting by name.
    ///
    /// An unknown name is rejected and leaves the engine untouched.
    pub fn set_algorithm_name(&self, name: &str) -> Result<bool, Error> {
        let algorithm = Algorithm::from_name(name)?;
        Ok(self.set_algorithm(algorithm))
    }

    pub fn register<D: Dependent + 'static>(&self, dependent: &Arc<D>) -> DependentId {
        self.notifier.register(dependent)
    }

    pub fn unregister(&self, id: DependentId) -> bool {
        self.notifier.unregister(id)
    }

    pub fn dependent_count(&self) -> usize {
        self.notifier.len()
    }

    /// Expands `global seed + sub_seed`.
    pub fn expand(&self, sub_seed: impl Display) -> ExpandedState {
        self.draw_state(sub_seed).0
    }

    fn draw_state(&self, sub_seed: impl Display) -> (ExpandedState, Algorithm) {
        let state = self.state.read();
        let effective = format!("{}{}", state.seed, sub_seed);
        (ExpandedState::from_seed(&effective), state.algorithm)
    }

    /// Uniform draw in `[0, 1)`.
    pub fn random(&self, sub_seed: impl Display) -> f64 {
        let (state, algorithm) = self.draw_state(sub_seed);
        algorithm.generate(&state)
    }

    /// `true` with the given probability. `0.0` is never true, `1.0` always is.
    pub fn random_boolean(&self, sub_seed: impl Display, probability: f64) -> bool {
        self.random(sub_seed) < probability
    }

    /// `1` with the given probability, otherwise `-1`.
    pub fn random_sign(&self, sub_seed: impl Display, probability: f64) -> i32 {
        if self.random_boolean(sub_seed, probability) {
            1
        } else {
            -1
        }
    }

    /// Float in `[min, max]` rounded to `precision` decimal digits.
    ///
    /// Ties round away from zero. Rounding never moves the result outside
    /// `[min, max]` when the bounds are ordered; unordered bounds are not checked.
    pub fn random_float(
        &self,
        sub_seed: impl Display,
        min: f64,
        max: f64,
        precision: u32,
    ) -> f64 {
        let value = (min + self.random(sub_seed) * (max - min)).min(max);
        let rounded = round_to(value, precision);
        if min <= max {
            rounded.clamp(min, max)
        } else {
            rounded
        }
    }

    /// Integer in `[min, max]`, both inclusive.
    ///
    /// The offset from `min` is computed in integers, so bounds beyond 2^53 stay in
    /// range; past that magnitude not every value in the range is reachable.
    /// `min > max` is the caller's problem: the result is unspecified but the call
    /// does not panic.
    pub fn random_int(&self, sub_seed: impl Display, min: i64, max: i64) -> i64 {
        let span = i128::from(max) - i128::from(min) + 1;
        let mut offset = (self.random(sub_seed) * span as f64).floor() as i128;
        if span > 0 {
            offset = offset.min(span - 1);
        }
        (i128::from(min) + offset) as i64
    }

    /// `#rrggbb` in lowercase hex.
    pub fn random_hex_color(&self, sub_seed: impl Display) -> String {
        let rgb = (self.random(sub_seed) * COLOR_SPACE) as u32;
        format!("#{rgb:06x}")
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn random_item<'a, T>(&self, sub_seed: impl Display, items: &'a [T]) -> Option<&'a T> {
        let index = self.pick_index(sub_seed, items.len())?;
        items.get(index)
    }

    /// Picks a uniformly random key and returns its value; `None` for an empty map.
    ///
    /// Keys are taken in the map's iteration order, so pass an insertion-ordered map
    /// (or a slice of pairs) when that order matters.
    pub fn random_object_property<K, V, I>(&self, sub_seed: impl Display, map: I) -> Option<V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(K, V)> = map.into_iter().collect();
        let index = self.pick_index(sub_seed, entries.len())?;
        (index < entries.len()).then(|| entries.swap_remove(index).1)
    }

    /// Weighted index into `weights`; `-1` when `weights` is empty.
    ///
    /// A non-positive (or NaN) total is a caller error: it is logged and the walk still
    /// runs, usually ending in the index `0` fallback.
    pub fn random_index(&self, sub_seed: impl Display, weights: &[f64]) -> i64 {
        if weights.is_empty() {
            return -1;
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 || total.is_nan() {
            tracing::warn!(total, len = weights.len(), "weights must sum to a positive value");
        }

        let mut remaining = self.random(sub_seed) * total;
        for (index, &weight) in weights.iter().enumerate() {
            if remaining < weight {
                return index as i64;
            }
            remaining -= weight;
        }

        // Only reachable through floating-point drift or bad weights.
        0
    }

    /// Normally distributed sample (Box-Muller).
    ///
    /// Both uniforms come from one expansion: `u` from the words in order, `v` from
    /// the words reversed.
    pub fn random_gaussian(&self, sub_seed: impl Display, mean: f64, spread: f64) -> f64 {
        let (state, algorithm) = self.draw_state(sub_seed);
        let u = algorithm.generate(&state).max(f64::MIN_POSITIVE);
        let v = algorithm.generate(&state.reversed());
        let z = (-2.0 * u.ln()).sqrt() * (TAU * v).cos();
        mean + z * spread
    }

    fn pick_index(&self, sub_seed: impl Display, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = self.random_int(sub_seed, 0, len as i64 - 1);
        usize::try_from(index).ok()
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(i32::MAX as u32) as i32);
    if !factor.is_finite() {
        return value;
    }
    let scaled = (value * factor).round() / factor;
    if scaled.is_finite() { scaled } else { value }
}
