//! Cached seeded values that follow the engine.
//!
//! A [`SeededValue`] is the consumer side of the change notifications: it remembers a
//! sub-seed and how to derive its value, registers itself with the [`Engine`] when
//! created, recomputes whenever the seed or algorithm changes, and unregisters itself
//! when dropped. UI layers wrap one of these per control and read [`SeededValue::value`].

use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;

use crate::{
    engine::Engine,
    notify::{Dependent, DependentId},
};

type Derive<T> = Box<dyn Fn(&Engine, &str) -> T + Send + Sync>;

pub struct SeededValue<T> {
    engine: Arc<Engine>,
    sub_seed: String,
    derive: Derive<T>,
    cached: Mutex<T>,
    revision: AtomicU64,
    id: OnceLock<DependentId>,
}

impl<T: Clone + Send + 'static> SeededValue<T> {
    /// Computes the initial value and registers with `engine`.
    pub fn new<F>(engine: &Arc<Engine>, sub_seed: impl Into<String>, derive: F) -> Arc<Self>
    where
        F: Fn(&Engine, &str) -> T + Send + Sync + 'static,
    {
        let sub_seed = sub_seed.into();
        let initial = derive(engine.as_ref(), &sub_seed);
        let value = Arc::new(Self {
            engine: Arc::clone(engine),
            sub_seed,
            derive: Box::new(derive),
            cached: Mutex::new(initial),
            revision: AtomicU64::new(0),
            id: OnceLock::new(),
        });
        let id = engine.register(&value);
        let _ = value.id.set(id);
        value
    }

    /// Last computed value.
    pub fn value(&self) -> T {
        self.cached.lock().clone()
    }

    /// Recomputes against the engine's current state and returns the fresh value.
    pub fn get_value(&self) -> T {
        let value = (self.derive)(self.engine.as_ref(), &self.sub_seed);
        *self.cached.lock() = value.clone();
        value
    }

    pub fn sub_seed(&self) -> &str {
        &self.sub_seed
    }

    /// How many change notifications have been applied.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub fn id(&self) -> Option<DependentId> {
        self.id.get().copied()
    }
}

impl SeededValue<f64> {
    pub fn float(
        engine: &Arc<Engine>,
        sub_seed: impl Into<String>,
        min: f64,
        max: f64,
        precision: u32,
    ) -> Arc<Self> {
        Self::new(engine, sub_seed, move |engine, sub_seed| {
            engine.random_float(sub_seed, min, max, precision)
        })
    }
}

impl SeededValue<i64> {
    pub fn int(engine: &Arc<Engine>, sub_seed: impl Into<String>, min: i64, max: i64) -> Arc<Self> {
        Self::new(engine, sub_seed, move |engine, sub_seed| {
            engine.random_int(sub_seed, min, max)
        })
    }
}

impl SeededValue<bool> {
    pub fn boolean(
        engine: &Arc<Engine>,
        sub_seed: impl Into<String>,
        probability: f64,
    ) -> Arc<Self> {
        Self::new(engine, sub_seed, move |engine, sub_seed| {
            engine.random_boolean(sub_seed, probability)
        })
    }
}

impl SeededValue<String> {
    pub fn hex_color(engine: &Arc<Engine>, sub_seed: impl Into<String>) -> Arc<Self> {
        Self::new(engine, sub_seed, |engine, sub_seed| {
            engine.random_hex_color(sub_seed)
        })
    }
}

impl<T: Clone + Send + 'static> Dependent for SeededValue<T> {
    fn refresh(&self, engine: &Engine) {
        let value = (self.derive)(engine, &self.sub_seed);
        *self.cached.lock() = value;
        self.revision.fetch_add(1, Ordering::AcqRel);
    }
}

impl<T> Drop for SeededValue<T> {
    fn drop(&mut self) {
        if let Some(id) = self.id.get() {
            self.engine.unregister(*id);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SeededValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededValue")
            .field("sub_seed", &self.sub_seed)
            .field("cached", &*self.cached.lock())
            .field("revision", &self.revision.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Algorithm, EngineConfig};

    fn shared(seed: &str) -> Arc<Engine> {
        Arc::new(Engine::with_config(EngineConfig::new(
            seed,
            Algorithm::Splitmix32,
        )))
    }

    #[test]
    fn float_controller_tracks_seed() {
        let engine = shared("010101");
        let angle = SeededValue::float(&engine, "angle", 0.0, 3.14159, 2);
        assert_eq!(angle.value(), 2.25);
        assert_eq!(angle.revision(), 0);

        engine.set_seed("other");
        assert_eq!(angle.revision(), 1);
        assert_eq!(angle.value(), engine.random_float("angle", 0.0, 3.14159, 2));

        engine.set_seed("other");
        assert_eq!(angle.revision(), 1);

        engine.set_seed("010101");
        assert_eq!(angle.value(), 2.25);
        assert_eq!(angle.revision(), 2);
    }

    #[test]
    fn algorithm_change_refreshes() {
        let engine = shared("010101");
        let color = SeededValue::hex_color(&engine, "color");
        assert_eq!(color.value(), "#f94a07");
        engine.set_algorithm(Algorithm::Xoshiro128StarStar);
        assert_eq!(color.value(), "#1f57fc");
        assert_eq!(color.revision(), 1);
    }

    #[test]
    fn get_value_recomputes() {
        let engine = shared("s");
        let flag = SeededValue::boolean(&engine, "flag", 0.5);
        let dice = SeededValue::int(&engine, "dice", 1, 6);
        assert_eq!(flag.get_value(), engine.random_boolean("flag", 0.5));
        assert_eq!(dice.get_value(), engine.random_int("dice", 1, 6));
        assert_eq!(dice.sub_seed(), "dice");
    }

    #[test]
    fn drop_unregisters() {
        let engine = shared("s");
        let custom = SeededValue::new(&engine, "len", |engine, sub_seed| {
            engine.random_item(sub_seed, &[1, 2, 3]).copied()
        });
        assert!(custom.id().is_some());
        assert_eq!(engine.dependent_count(), 1);
        drop(custom);
        assert_eq!(engine.dependent_count(), 0);
        assert!(engine.set_seed("t"));
    }
}
