//! Enemy domain — патрулирующий враг со случайной стрельбой
//!
//! Задачи контроллера (каждая — state machine на FixedUpdate):
//! - movement: летим к случайной точке правой половины поля, по прибытии — новая точка
//! - fire: ждём случайно [min, max] секунд, залп всеми prototype-ами, повтор
//!
//! Деактивация (EnemyLifecycleEvent::Disable) отменяет все задачи сразу.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


// Re-export основных типов
pub use components::*;
pub use events::*;
pub use systems::*;

use crate::components::{Hitbox, LayerMask};
use crate::config::{ConfigError, EnemyConfig};
use crate::BehaviorSet;

/// Enemy Plugin
///
/// Регистрирует lifecycle/movement/fire системы в FixedUpdate.
/// Порядок наборов (BehaviorSet): Lifecycle → Callbacks → Timers → Movement → Fire.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        crate::effects::register_effect_events(app);
        app.add_event::<EnemyLifecycleEvent>();

        app.configure_sets(
            FixedUpdate,
            (
                BehaviorSet::Lifecycle,
                BehaviorSet::Callbacks,
                BehaviorSet::Timers,
                BehaviorSet::Movement,
                BehaviorSet::Fire,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );

        app.add_systems(
            FixedUpdate,
            (
                apply_enemy_lifecycle.in_set(BehaviorSet::Lifecycle),
                move_enemies.in_set(BehaviorSet::Movement),
                fire_enemies.in_set(BehaviorSet::Fire),
            ),
        );
    }
}

/// Bundle врага с проверенным конфигом
///
/// Контроллер активируется сам на первом fixed tick-е.
pub fn enemy_bundle(config: EnemyConfig) -> Result<(EnemyController, Hitbox, EnemyConfig), ConfigError> {
    config.validate()?;
    let hitbox = Hitbox::new(config.body_size, LayerMask::ENEMY);
    Ok((EnemyController::default(), hitbox, config))
}

/// Helper: spawn врага через Commands
pub fn spawn_enemy(commands: &mut Commands, config: EnemyConfig) -> Result<Entity, ConfigError> {
    let bundle = enemy_bundle(config)?;
    Ok(commands.spawn(bundle).id())
}
