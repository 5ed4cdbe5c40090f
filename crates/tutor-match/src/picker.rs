//! Random selection of fallback messages.
//!
//! The composer never touches a random number generator directly. It asks a
//! [`MessagePicker`] for an index, which lets callers pin the choice in tests or make a
//! session reproducible with a seed.

use std::sync::Mutex;

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Chooses one of `len` candidate messages.
pub trait MessagePicker: Send + Sync {
    /// Returns an index in `0..len`. Callers never pass zero.
    fn pick(&self, len: usize) -> usize;
}

/// Picks uniformly with the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngPicker;

impl MessagePicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picks uniformly from a seeded generator, giving a reproducible sequence.
#[derive(Debug)]
pub struct SeededPicker {
    /// Shared generator.
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    /// Creates a picker seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MessagePicker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        // A panic elsewhere cannot leave the generator in a bad state.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(0..len)
    }
}

/// Always picks the same index, wrapped into range.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl MessagePicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_in_range() {
        for _ in 0..100 {
            assert!(ThreadRngPicker.pick(4) < 4);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededPicker::new(7);
        let b = SeededPicker::new(7);

        let first: Vec<_> = (0..20).map(|_| a.pick(4)).collect();
        let second: Vec<_> = (0..20).map(|_| b.pick(4)).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_fixed_wraps() {
        assert_eq!(FixedPicker(2).pick(4), 2);
        assert_eq!(FixedPicker(5).pick(4), 1);
    }
}
