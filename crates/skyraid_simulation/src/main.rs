//! Headless симуляция SKYRAID
//!
//! Скриптованный бой без рендера: игрок, три врага и босс, 30 секунд
//! на 60Hz. Host здесь — сам цикл: считает запросы к pool/audio и
//! отыгрывает таймлайн луча (LaunchBeam через 1с, StopBeam через 3с).

use bevy::prelude::*;
use skyraid_simulation::{
    boss_bundle, create_headless_app, enemy_bundle, log_info, AnimationTriggered, AnimatorTrigger, BossAnimationEvent,
    BossConfig, BossController, ConfigError, EnemyConfig, Hitbox, LayerMask, Player, ProjectileReleased, SfxRequested,
};

const TICKS: u32 = 60 * 30;
const BEAM_LAUNCH_DELAY: u32 = 60;
const BEAM_STOP_DELAY: u32 = 180;

fn main() -> Result<(), ConfigError> {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting SKYRAID headless simulation (seed: {})", seed));

    app.world_mut().spawn((
        Player,
        Transform::from_xyz(-6.0, 0.0, 0.0),
        Hitbox::new(Vec2::new(1.0, 0.6), LayerMask::PLAYER),
    ));
    for _ in 0..3 {
        app.world_mut().spawn(enemy_bundle(EnemyConfig::default())?);
    }
    let boss = app
        .world_mut()
        .spawn(boss_bundle(BossConfig::default_enemy_config(), BossConfig::default())?)
        .id();

    let mut released = 0usize;
    let mut sfx = 0usize;
    let mut beams = 0u32;
    // (tick, событие) — отложенные callbacks таймлайна
    let mut timeline: Vec<(u32, BossAnimationEvent)> = Vec::new();

    for tick in 0..TICKS {
        timeline.retain(|(due, event)| {
            if *due == tick {
                app.world_mut().send_event(*event);
                false
            } else {
                true
            }
        });

        app.world_mut().run_schedule(FixedUpdate);

        let world = app.world_mut();
        released += world.resource_mut::<Events<ProjectileReleased>>().drain().count();
        sfx += world.resource_mut::<Events<SfxRequested>>().drain().count();
        for triggered in world.resource_mut::<Events<AnimationTriggered>>().drain() {
            if triggered.trigger == AnimatorTrigger::LaunchBeam {
                beams += 1;
                timeline.push((tick + BEAM_LAUNCH_DELAY, BossAnimationEvent::LaunchBeam { boss: triggered.entity }));
                timeline.push((tick + BEAM_STOP_DELAY, BossAnimationEvent::StopBeam { boss: triggered.entity }));
            }
        }

        if tick % 300 == 0 {
            let phase = app.world().get::<BossController>(boss).map(|b| b.phase());
            log_info(&format!("Tick {}: boss phase {:?}, {} projectiles so far", tick, phase, released));
        }
    }

    log_info(&format!(
        "Simulation complete: {} ticks, {} projectiles, {} sfx requests, {} beam attacks",
        TICKS, released, sfx, beams
    ));
    Ok(())
}
