//! Enemy components: EnemyController + его задачи (movement, fire).

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use crate::config::EnemyConfig;
use crate::effects::ControllerAction;
use crate::shared::{Viewport, Wait};

/// Контроллер врага: патруль по правой половине + стрельба со случайным интервалом
///
/// Задачи — слоты `Option<...>`: `None` = задача не запущена/завершена.
/// Деактивация обнуляет все слоты разом.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct EnemyController {
    /// Entity активен (между activate и deactivate)
    pub active: bool,
    /// Счётчик активаций (повторная выдача из pool-а = новая активация)
    pub activations: u32,
    /// Половина размера тела
    pub padding: Vec2,
    /// Куда летим. Chase задача босса переписывает его каждый tick.
    pub target_position: Vec2,
    pub movement: Option<MovementTask>,
    pub fire: Option<FireTask>,
}

/// Движение к target_position, одна итерация на fixed tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct MovementTask {
    /// Сколько раз цель была достигнута (и заменена новой)
    pub targets_reached: u32,
}

/// Результат одного шага движения
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementStep {
    /// Сдвинулись на `step` к цели
    Moved { position: Vec2, rotation: Quat },
    /// До цели меньше одного шага — нужна новая цель
    Arrived,
}

/// Ожидание случайной длительности перед залпом
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct FireTask {
    pub wait: Wait,
    /// Выбранный интервал (секунды), всегда в [min, max]
    pub interval: f32,
}

impl FireTask {
    pub fn new(config: &EnemyConfig, rng: &mut impl Rng) -> Self {
        let interval = random_fire_interval(config, rng);
        Self {
            wait: Wait::from_secs(interval),
            interval,
        }
    }
}

/// Равномерно в [min_fire_interval, max_fire_interval]
pub fn random_fire_interval(config: &EnemyConfig, rng: &mut impl Rng) -> f32 {
    if config.max_fire_interval <= config.min_fire_interval {
        config.min_fire_interval
    } else {
        rng.gen_range(config.min_fire_interval..=config.max_fire_interval)
    }
}

/// Один шаг движения без перелёта
///
/// Двигаемся только если до цели ≥ `step`, поэтому после шага дистанция
/// не может стать "по ту сторону" цели. Наклон — поворот вокруг X,
/// пропорциональный вертикальной составляющей направления на цель.
pub fn movement_step(position: Vec2, target: Vec2, step: f32, rotation_angle: f32) -> MovementStep {
    if position.distance(target) >= step {
        let new_position = position + (target - position).normalize_or_zero() * step;
        let tilt = (target - new_position).normalize_or_zero().y * rotation_angle;
        MovementStep::Moved {
            position: new_position,
            rotation: Quat::from_rotation_x(tilt.to_radians()),
        }
    } else {
        MovementStep::Arrived
    }
}

/// Точка, привязанная к entity (дуло, проба детекции)
///
/// Смещение поворачивается вместе с entity, как дочерний transform.
pub fn anchor_point(transform: &Transform, offset: Vec2) -> Vec2 {
    transform.transform_point(offset.extend(0.0)).truncate()
}

impl EnemyController {
    /// Активация: padding, позиция спавна, первая цель, задача движения
    ///
    /// Fire задачу запускает вызывающий (`start_fire` для обычного врага,
    /// у босса своя fire задача). Возвращает точку спавна.
    pub fn activate(&mut self, config: &EnemyConfig, viewport: &Viewport, rng: &mut impl Rng) -> Vec2 {
        self.active = true;
        self.activations += 1;
        self.padding = config.padding();

        let spawn = viewport.random_enemy_spawn_position(self.padding, rng);
        self.target_position = viewport.random_right_half_position(self.padding, rng);
        self.movement = Some(MovementTask::default());

        spawn
    }

    pub fn start_fire(&mut self, config: &EnemyConfig, rng: &mut impl Rng) {
        self.fire = Some(FireTask::new(config, rng));
    }

    /// Деактивация: все задачи отменяются безусловно
    pub fn deactivate(&mut self) {
        self.active = false;
        self.movement = None;
        self.fire = None;
    }

    /// Один fixed tick движения
    pub fn advance_movement(
        &mut self,
        transform: &mut Transform,
        config: &EnemyConfig,
        viewport: &Viewport,
        rng: &mut impl Rng,
        delta: Duration,
    ) {
        if !self.active {
            return;
        }
        let Some(task) = self.movement.as_mut() else {
            return;
        };

        let step = config.move_speed * delta.as_secs_f32();
        let position = transform.translation.truncate();

        match movement_step(position, self.target_position, step, config.move_rotation_angle) {
            MovementStep::Moved { position, rotation } => {
                transform.translation.x = position.x;
                transform.translation.y = position.y;
                transform.rotation = rotation;
            }
            MovementStep::Arrived => {
                task.targets_reached += 1;
                self.target_position = viewport.random_right_half_position(self.padding, rng);
            }
        }
    }

    /// Один fixed tick стрельбы
    ///
    /// На пробуждении: game over → задача завершается без выстрела;
    /// иначе залп всеми prototype-ами, случайный звук, muzzle VFX и
    /// новое случайное ожидание.
    pub fn advance_fire(
        &mut self,
        config: &EnemyConfig,
        game_over: bool,
        muzzle: Vec2,
        rng: &mut impl Rng,
        delta: Duration,
    ) -> Vec<ControllerAction> {
        let mut actions = Vec::new();
        if !self.active {
            return actions;
        }
        let Some(task) = self.fire.as_mut() else {
            return actions;
        };
        if !task.wait.tick(delta) {
            return actions;
        }

        if game_over {
            self.fire = None;
            return actions;
        }

        actions.extend(config.projectiles.iter().map(|prototype| ControllerAction::ReleaseProjectile {
            prototype: prototype.clone(),
            position: muzzle,
        }));
        actions.push(ControllerAction::PlaySfx {
            variants: config.projectile_launch_sfx.clone(),
        });
        actions.push(ControllerAction::MuzzleVfx { playing: true });

        *task = FireTask::new(config, rng);
        actions
    }
}
