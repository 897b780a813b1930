//! Boss systems: lifecycle, callbacks луча, cooldown, погоня, стрельба.

use bevy::prelude::*;

use crate::boss::{BossAnimationEvent, BossController, BossFireContext, BossPhase, DetectionProbe};
use crate::components::{GameState, Hitbox, Player};
use crate::config::{BossConfig, EnemyConfig};
use crate::effects::EffectWriters;
use crate::enemy::{anchor_point, EnemyController};
use crate::shared::Viewport;
use crate::DeterministicRng;

/// System: зеркалит активацию EnemyController-а на задачи босса
///
/// Выполняется после `apply_enemy_lifecycle`, поэтому видит итог
/// всех Enable/Disable этого tick-а. Новая активация (в т.ч. Disable +
/// Enable в одном tick-е) перезапускает все задачи босса.
pub fn apply_boss_lifecycle(
    mut bosses: Query<(Entity, &mut BossController, &EnemyController, &BossConfig)>,
    mut effects: EffectWriters,
) {
    for (entity, mut boss, enemy, config) in bosses.iter_mut() {
        if enemy.active && boss.seen_activation != enemy.activations {
            boss.seen_activation = enemy.activations;
            let actions = boss.activate(config);
            effects.emit(entity, actions);
            crate::logger::log_info(&format!(
                "👹 Boss {:?} activated (beam cooldown {:.1}s)",
                entity, config.beam_cooldown_time
            ));
        } else if !enemy.active && boss.active {
            boss.deactivate();
            crate::logger::log(&format!("💤 Boss {:?} deactivated (all tasks cancelled)", entity));
        }
    }
}

/// System: callbacks таймлайна луча
pub fn handle_boss_animation_events(
    mut animation_events: EventReader<BossAnimationEvent>,
    mut bosses: Query<(&mut BossController, &BossConfig)>,
    mut effects: EffectWriters,
) {
    for event in animation_events.read() {
        let entity = event.boss();
        let Ok((mut boss, config)) = bosses.get_mut(entity) else {
            crate::logger::log_warning(&format!(
                "⚠️ Beam event {:?} for non-boss entity {:?}",
                event, entity
            ));
            continue;
        };

        match event {
            BossAnimationEvent::LaunchBeam { .. } => {
                let actions = boss.on_beam_launched(config);
                if actions.is_empty() {
                    crate::logger::log(&format!("Boss {:?} inactive, LaunchBeam ignored", entity));
                } else {
                    crate::logger::log_info(&format!("⚡ Boss {:?} beam launched", entity));
                }
                effects.emit(entity, actions);
            }
            BossAnimationEvent::StopBeam { .. } => {
                match boss.on_beam_stopped(config) {
                    Some(actions) => {
                        crate::logger::log_info(&format!(
                            "Boss {:?} beam stopped → chase off, cooldown + fire restarted",
                            entity
                        ));
                        effects.emit(entity, actions);
                    }
                    None => {
                        crate::logger::log(&format!("Boss {:?} inactive, StopBeam ignored", entity));
                    }
                }
            }
        }
    }
}

/// System: beam cooldown
pub fn tick_beam_cooldowns(mut bosses: Query<(Entity, &mut BossController)>, time: Res<Time<Fixed>>) {
    let delta = time.timestep();

    for (entity, mut boss) in bosses.iter_mut() {
        if boss.beam_cooldown.is_none() {
            continue;
        }
        if boss.tick_beam_cooldown(delta) {
            crate::logger::log_info(&format!("🔋 Boss {:?} beam ready", entity));
        }
    }
}

/// System: погоня (до `move_enemies`, перезаписывает цель движения)
pub fn chase_player(
    mut bosses: Query<(Entity, &mut BossController, &mut EnemyController)>,
    players: Query<&Transform, With<Player>>,
    viewport: Res<Viewport>,
) {
    let mut chasers = bosses.iter_mut().filter(|(_, boss, _)| boss.active && boss.chase.is_some()).peekable();
    if chasers.peek().is_none() {
        return;
    }

    let Ok(player) = players.single() else {
        crate::logger::log_error("❌ Boss chase: no single Player entity in the scene, chase tick skipped");
        return;
    };
    let player_y = player.translation.y;

    for (_, mut boss, mut enemy) in chasers {
        boss.advance_chase(&mut enemy, &viewport, player_y);
    }
}

/// System: fire цикл босса
pub fn boss_fire(
    mut bosses: Query<(Entity, &mut BossController, &EnemyConfig, &BossConfig, &Transform)>,
    hitboxes: Query<(&Transform, &Hitbox)>,
    game_state: Res<GameState>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut effects: EffectWriters,
) {
    let delta = time.timestep();
    let game_over = game_state.is_game_over();

    for (entity, mut boss, enemy_config, boss_config, transform) in bosses.iter_mut() {
        if boss.fire.is_none() {
            continue;
        }

        let phase_before = boss.phase();
        let ctx = BossFireContext {
            enemy: enemy_config,
            boss: boss_config,
            game_over,
            muzzle: anchor_point(transform, enemy_config.muzzle_offset),
        };
        let probe = DetectionProbe::from_boss(transform, boss_config);
        let detect = || {
            probe.overlaps(
                hitboxes
                    .iter()
                    .map(|(hitbox_transform, hitbox)| (hitbox_transform.translation.truncate(), hitbox)),
            )
        };

        let actions = boss.advance_fire(ctx, detect, &mut rng.rng, delta);

        let phase_after = boss.phase();
        if phase_before != phase_after {
            crate::logger::log(&format!(
                "👹 Boss {:?}: {:?} → {:?} (magazine {:?})",
                entity, phase_before, phase_after, boss.loadout
            ));
        }
        if phase_after == BossPhase::Halted {
            crate::logger::log(&format!("🛑 Boss {:?} stopped firing (game over)", entity));
        }

        effects.emit(entity, actions);
    }
}
