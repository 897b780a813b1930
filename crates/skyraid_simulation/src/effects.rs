//! Effects — запросы к host-у (ECS → host)
//!
//! Контроллеры не знают про object pool, audio и particle systems.
//! Логика контроллера возвращает список `ControllerAction`, система
//! превращает его в события, host их исполняет:
//! - ProjectileReleased → pool.release(prototype, position)
//! - SfxRequested → audio.play_random_variant(variants)
//! - MuzzleVfxChanged → play/stop muzzle particle system
//! - AnimationTriggered → animator trigger

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::config::{ProjectilePrototype, SfxHandle};

/// Event: выпустить снаряд из pool-а
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileReleased {
    /// Кто стреляет
    pub shooter: Entity,
    /// Какой prototype достать из pool-а
    pub prototype: ProjectilePrototype,
    /// Позиция дула (world-space)
    pub position: Vec2,
}

/// Event: проиграть один случайный вариант из набора звуков
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SfxRequested {
    pub emitter: Entity,
    pub variants: Vec<SfxHandle>,
}

/// Event: включить/выключить muzzle VFX
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuzzleVfxChanged {
    pub emitter: Entity,
    pub playing: bool,
}

/// Триггеры аниматора, которые дёргает симуляция
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimatorTrigger {
    /// Зарядка луча босса (таймлайн потом вызывает LaunchBeam/StopBeam)
    LaunchBeam,
}

impl AnimatorTrigger {
    /// Имя trigger-параметра в аниматоре host-а
    pub fn name(&self) -> &'static str {
        match self {
            AnimatorTrigger::LaunchBeam => "launchBeam",
        }
    }
}

/// Event: дёрнуть trigger аниматора
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTriggered {
    pub entity: Entity,
    pub trigger: AnimatorTrigger,
}

/// Побочный эффект шага контроллера (без привязки к entity)
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerAction {
    ReleaseProjectile {
        prototype: ProjectilePrototype,
        position: Vec2,
    },
    PlaySfx {
        variants: Vec<SfxHandle>,
    },
    MuzzleVfx {
        playing: bool,
    },
    TriggerAnimation(AnimatorTrigger),
}

impl ControllerAction {
    pub fn sfx(handle: &SfxHandle) -> Self {
        Self::PlaySfx {
            variants: vec![handle.clone()],
        }
    }
}

/// Все writer-ы эффектов одним system param
#[derive(SystemParam)]
pub struct EffectWriters<'w> {
    releases: EventWriter<'w, ProjectileReleased>,
    sfx: EventWriter<'w, SfxRequested>,
    vfx: EventWriter<'w, MuzzleVfxChanged>,
    animations: EventWriter<'w, AnimationTriggered>,
}

impl EffectWriters<'_> {
    /// Разослать действия контроллера `entity` как события
    pub fn emit(&mut self, entity: Entity, actions: impl IntoIterator<Item = ControllerAction>) {
        for action in actions {
            match action {
                ControllerAction::ReleaseProjectile { prototype, position } => {
                    self.releases.write(ProjectileReleased {
                        shooter: entity,
                        prototype,
                        position,
                    });
                }
                ControllerAction::PlaySfx { variants } => {
                    self.sfx.write(SfxRequested {
                        emitter: entity,
                        variants,
                    });
                }
                ControllerAction::MuzzleVfx { playing } => {
                    self.vfx.write(MuzzleVfxChanged {
                        emitter: entity,
                        playing,
                    });
                }
                ControllerAction::TriggerAnimation(trigger) => {
                    self.animations.write(AnimationTriggered { entity, trigger });
                }
            }
        }
    }
}

/// Регистрация событий эффектов
pub(crate) fn register_effect_events(app: &mut App) {
    app.add_event::<ProjectileReleased>()
        .add_event::<SfxRequested>()
        .add_event::<MuzzleVfxChanged>()
        .add_event::<AnimationTriggered>();
}
