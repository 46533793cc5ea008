//! Uniform draw sources.
//!
//! The roll engine samples a catalog offset through this trait so that
//! production uses the thread RNG while tests script exact draws.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use rand::Rng;

/// A source of uniform random integers.
pub trait DrawSource: Send + Sync {
    /// Return a uniform integer in `[0, bound)`. Callers guarantee
    /// `bound >= 1`.
    fn draw(&self, bound: u64) -> u64;
}

/// Production draw source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngDraw;

impl DrawSource for ThreadRngDraw {
    fn draw(&self, bound: u64) -> u64 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic draw source that replays a scripted sequence.
///
/// Each draw pops the next scripted value, clamped into range; once the
/// script is exhausted it keeps returning offset zero.
pub struct ScriptedDraw {
    script: Mutex<VecDeque<u64>>,
}

impl ScriptedDraw {
    /// Script the given sequence of offsets.
    pub fn new(offsets: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: Mutex::new(offsets.into_iter().collect()),
        }
    }
}

impl DrawSource for ScriptedDraw {
    fn draw(&self, bound: u64) -> u64 {
        let mut script = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        script.pop_front().unwrap_or(0).min(bound - 1)
    }
}
