//! Boss Events — callbacks таймлайна анимации луча (host → ECS)
//!
//! Fire цикл дёргает trigger `launchBeam`, дальше таймлайн сам
//! сообщает, когда луч выпущен и когда погас. Порядок и тайминг этих
//! событий ECS не предполагает.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAnimationEvent {
    /// Луч выпущен: звук запуска
    LaunchBeam { boss: Entity },

    /// Луч погас: погоня отменяется, cooldown и fire цикл перезапускаются
    StopBeam { boss: Entity },
}

impl BossAnimationEvent {
    pub fn boss(&self) -> Entity {
        match self {
            BossAnimationEvent::LaunchBeam { boss } | BossAnimationEvent::StopBeam { boss } => *boss,
        }
    }
}
