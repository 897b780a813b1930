//! Countdown-ожидание для задач контроллеров

use bevy::prelude::*;
use std::time::Duration;

/// Ожидание фиксированной длительности, тикается fixed timestep-ом
///
/// Обёртка над одноразовым `Timer` (TimerMode::Once). Ожидание, начатое
/// на tick N, не тикается на tick N — первый `tick()` приходит на N+1.
/// Заканчивается на первом tick-е, где накопленное время ≥ duration.
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct Wait {
    timer: Timer,
}

impl Wait {
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
        }
    }

    /// Из секунд: отрицательные и NaN → 0, вне диапазона Duration → Duration::MAX
    pub fn from_secs(seconds: f32) -> Self {
        Self::new(Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX))
    }

    /// Продвинуть на один tick. `true` — ожидание истекло.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta).finished()
    }

    pub fn is_finished(&self) -> bool {
        self.timer.finished()
    }

    pub fn duration(&self) -> Duration {
        self.timer.duration()
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }
}
