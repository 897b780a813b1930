//! Boss domain — многофазный босс поверх патрулирующего врага
//!
//! Задачи (state machines на FixedUpdate, поверх movement из EnemyController):
//! - fire: пауза max_fire_interval → непрерывная очередь → повтор; луч готов → beam-атака
//! - beam cooldown: одноразовый таймер, выставляет `beam_ready`
//! - chase: во время луча держит босса у правого края на высоте игрока
//!
//! Beam-атака ведётся callbacks таймлайна (`BossAnimationEvent`).

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod selection;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod components_tests;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use selection::*;
pub use systems::*;

use crate::components::{Hitbox, LayerMask};
use crate::config::{BossConfig, ConfigError, EnemyConfig};
use crate::enemy::{apply_enemy_lifecycle, move_enemies, EnemyController};
use crate::BehaviorSet;

/// Boss Plugin (требует EnemyPlugin — он настраивает BehaviorSet)
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BossAnimationEvent>();

        app.add_systems(
            FixedUpdate,
            (
                apply_boss_lifecycle
                    .in_set(BehaviorSet::Lifecycle)
                    .after(apply_enemy_lifecycle),
                handle_boss_animation_events.in_set(BehaviorSet::Callbacks),
                tick_beam_cooldowns.in_set(BehaviorSet::Timers),
                chase_player.in_set(BehaviorSet::Movement).before(move_enemies),
                boss_fire.in_set(BehaviorSet::Fire),
            ),
        );
    }
}

/// Bundle босса с проверенными конфигами
pub fn boss_bundle(
    enemy_config: EnemyConfig,
    boss_config: BossConfig,
) -> Result<(BossController, EnemyController, Hitbox, EnemyConfig, BossConfig), ConfigError> {
    boss_config.validate(&enemy_config)?;
    let hitbox = Hitbox::new(enemy_config.body_size, LayerMask::ENEMY);
    Ok((
        BossController::default(),
        EnemyController::default(),
        hitbox,
        enemy_config,
        boss_config,
    ))
}

/// Helper: spawn босса через Commands
pub fn spawn_boss(commands: &mut Commands, enemy_config: EnemyConfig, boss_config: BossConfig) -> Result<Entity, ConfigError> {
    let bundle = boss_bundle(enemy_config, boss_config)?;
    Ok(commands.spawn(bundle).id())
}
