//! Enemy systems: lifecycle, патруль, стрельба.

use bevy::prelude::*;

use crate::boss::BossController;
use crate::components::GameState;
use crate::config::EnemyConfig;
use crate::effects::EffectWriters;
use crate::enemy::{anchor_point, EnemyController, EnemyLifecycleEvent};
use crate::shared::Viewport;
use crate::DeterministicRng;

/// System: активация/деактивация врагов
///
/// Активируются:
/// - свежезаспавненные контроллеры (Added)
/// - entity из `EnemyLifecycleEvent::Enable` (повторная выдача из pool-а)
///
/// Босс проходит здесь базовую часть (спавн, патруль). Свою fire задачу
/// и cooldown луча он запускает в `apply_boss_lifecycle`, поэтому
/// обычная fire задача для него не стартует.
pub fn apply_enemy_lifecycle(
    mut lifecycle_events: EventReader<EnemyLifecycleEvent>,
    mut enemies: Query<(
        Entity,
        &mut EnemyController,
        &EnemyConfig,
        &mut Transform,
        Has<BossController>,
    )>,
    viewport: Res<Viewport>,
    mut rng: ResMut<DeterministicRng>,
) {
    // Фаза 1: свежие entity
    for (entity, mut controller, config, mut transform, is_boss) in enemies.iter_mut() {
        if controller.is_added() && !controller.active {
            enable_enemy(entity, &mut controller, config, &mut transform, is_boss, &viewport, &mut rng);
        }
    }

    // Фаза 2: запросы host-а (в порядке поступления)
    for event in lifecycle_events.read() {
        let entity = event.entity();
        let Ok((_, mut controller, config, mut transform, is_boss)) = enemies.get_mut(entity) else {
            crate::logger::log_warning(&format!(
                "⚠️ Lifecycle event {:?} for unknown enemy {:?}",
                event, entity
            ));
            continue;
        };

        match event {
            EnemyLifecycleEvent::Enable { .. } => {
                if controller.active {
                    continue;
                }
                enable_enemy(entity, &mut controller, config, &mut transform, is_boss, &viewport, &mut rng);
            }
            EnemyLifecycleEvent::Disable { .. } => {
                if !controller.active {
                    continue;
                }
                controller.deactivate();
                crate::logger::log(&format!("💤 Enemy {:?} disabled (all tasks cancelled)", entity));
            }
        }
    }
}

fn enable_enemy(
    entity: Entity,
    controller: &mut EnemyController,
    config: &EnemyConfig,
    transform: &mut Transform,
    is_boss: bool,
    viewport: &Viewport,
    rng: &mut DeterministicRng,
) {
    let spawn = controller.activate(config, viewport, &mut rng.rng);
    transform.translation.x = spawn.x;
    transform.translation.y = spawn.y;

    if !is_boss {
        controller.start_fire(config, &mut rng.rng);
    }

    crate::logger::log(&format!(
        "🛸 Enemy {:?} enabled at {:?}, first target {:?}",
        entity, spawn, controller.target_position
    ));
}

/// System: патруль — один шаг движения на fixed tick
pub fn move_enemies(
    mut enemies: Query<(&mut EnemyController, &EnemyConfig, &mut Transform)>,
    viewport: Res<Viewport>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep();

    for (mut controller, config, mut transform) in enemies.iter_mut() {
        controller.advance_movement(&mut transform, config, &viewport, &mut rng.rng, delta);
    }
}

/// System: стрельба обычных врагов
///
/// У босса `EnemyController::fire` всегда None — его стрельба в
/// `boss_fire`.
pub fn fire_enemies(
    mut enemies: Query<(Entity, &mut EnemyController, &EnemyConfig, &Transform)>,
    game_state: Res<GameState>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut effects: EffectWriters,
) {
    let delta = time.timestep();
    let game_over = game_state.is_game_over();

    for (entity, mut controller, config, transform) in enemies.iter_mut() {
        if controller.fire.is_none() {
            continue;
        }

        let muzzle = anchor_point(transform, config.muzzle_offset);
        let actions = controller.advance_fire(config, game_over, muzzle, &mut rng.rng, delta);

        if controller.fire.is_none() {
            crate::logger::log(&format!("🛑 Enemy {:?} stopped firing (game over)", entity));
        }
        if !actions.is_empty() {
            crate::logger::log(&format!(
                "🔫 Enemy {:?} fired {} projectile(s) from {:?}",
                entity,
                config.projectiles.len(),
                muzzle
            ));
        }

        effects.emit(entity, actions);
    }
}
