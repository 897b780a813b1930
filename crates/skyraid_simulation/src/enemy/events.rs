//! Enemy Events — lifecycle запросы от host-а
//!
//! Host держит врагов в object pool: вместо despawn entity выключается,
//! при повторной выдаче из pool-а — включается снова.

use bevy::prelude::*;

/// Включение/выключение врага (host → ECS)
///
/// Свежезаспавненный контроллер активируется сам, событие не нужно.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyLifecycleEvent {
    /// Entity снова выдан из pool-а: спавн в случайной точке, задачи стартуют заново
    Enable { entity: Entity },

    /// Entity возвращён в pool (смерть, game over): все задачи отменяются
    Disable { entity: Entity },
}

impl EnemyLifecycleEvent {
    pub fn entity(&self) -> Entity {
        match self {
            EnemyLifecycleEvent::Enable { entity } | EnemyLifecycleEvent::Disable { entity } => *entity,
        }
    }
}
