//! Конфигурация врагов и босса
//!
//! Конфиги — компоненты на entity (как AIConfig), с Default из тюнинга
//! и serde, чтобы host мог грузить их из данных. `validate()` отсекает
//! конфиги, на которых задачи контроллеров не могут работать.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::LayerMask;

/// Handle prototype-а снаряда в object pool host-а
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct ProjectilePrototype(pub String);

impl ProjectilePrototype {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Handle набора звуков в audio-сервисе host-а
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct SfxHandle(pub String);

impl SfxHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Ошибки конфигурации (фатальные для спавна)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("enemy has no projectile prototypes")]
    NoProjectiles,

    #[error("enemy has no launch sfx")]
    NoLaunchSfx,

    #[error("fire interval range [{min}, {max}] is invalid")]
    InvalidFireInterval { min: f32, max: f32 },

    #[error("move speed must be positive, got {0}")]
    NonPositiveMoveSpeed(f32),

    #[error("boss needs at least {required} {slot} slots, got {actual}")]
    MissingBossSlots {
        slot: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("boss burst interval (min_fire_interval) must be positive, got {0}")]
    NonPositiveBurstInterval(f32),

    #[error("continuous fire duration must be positive, got {0}")]
    NonPositiveBurstDuration(f32),

    #[error("beam cooldown must be non-negative, got {0}")]
    NegativeBeamCooldown(f32),

    #[error("single projectile chance must be within [0, 1], got {0}")]
    InvalidBranchProbability(f32),

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
}

/// NaN и ±inf не пропускаем: из них не построить ни Duration, ни диапазон RNG
fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

/// Параметры обычного врага
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    /// Скорость патрулирования (units/sec)
    pub move_speed: f32,
    /// Максимальный наклон по X при вертикальном движении (градусы)
    pub move_rotation_angle: f32,

    /// Prototype-ы снарядов (обычный враг выпускает все разом)
    pub projectiles: Vec<ProjectilePrototype>,
    /// Звуки выстрела (по слотам, босс выбирает слот по магазину)
    pub projectile_launch_sfx: Vec<SfxHandle>,
    /// Дуло относительно центра entity
    pub muzzle_offset: Vec2,

    /// Пауза между залпами: случайно в [min, max] (секунды)
    pub min_fire_interval: f32,
    pub max_fire_interval: f32,

    /// Размер тела (bounds рендера) — отсюда padding = size / 2
    pub body_size: Vec2,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            move_rotation_angle: 25.0,
            projectiles: vec![ProjectilePrototype::new("enemy_bullet")],
            projectile_launch_sfx: vec![SfxHandle::new("enemy_launch")],
            muzzle_offset: Vec2::new(-0.6, 0.0),
            min_fire_interval: 1.0,
            max_fire_interval: 3.0,
            body_size: Vec2::new(1.2, 0.8),
        }
    }
}

impl EnemyConfig {
    /// Половина размера тела — отступ от краёв поля
    pub fn padding(&self) -> Vec2 {
        self.body_size / 2.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("move_speed", self.move_speed)?;
        ensure_finite("move_rotation_angle", self.move_rotation_angle)?;
        ensure_finite("min_fire_interval", self.min_fire_interval)?;
        ensure_finite("max_fire_interval", self.max_fire_interval)?;
        ensure_finite("muzzle_offset.x", self.muzzle_offset.x)?;
        ensure_finite("muzzle_offset.y", self.muzzle_offset.y)?;
        ensure_finite("body_size.x", self.body_size.x)?;
        ensure_finite("body_size.y", self.body_size.y)?;

        if self.projectiles.is_empty() {
            return Err(ConfigError::NoProjectiles);
        }
        if self.projectile_launch_sfx.is_empty() {
            return Err(ConfigError::NoLaunchSfx);
        }
        if !(self.min_fire_interval >= 0.0 && self.min_fire_interval <= self.max_fire_interval) {
            return Err(ConfigError::InvalidFireInterval {
                min: self.min_fire_interval,
                max: self.max_fire_interval,
            });
        }
        if !(self.move_speed > 0.0) {
            return Err(ConfigError::NonPositiveMoveSpeed(self.move_speed));
        }
        Ok(())
    }
}

/// Параметры босса (поверх EnemyConfig)
///
/// Слоты в `EnemyConfig::projectiles` / `projectile_launch_sfx`:
/// - 0 — игрок в зоне детекции
/// - 1 — одиночный снаряд
/// - 2.. — веер (все prototype-ы начиная со 2-го, звук слота 2)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct BossConfig {
    /// Длительность непрерывной очереди (секунды)
    pub continuous_fire_duration: f32,

    /// Проба детекции: центр относительно босса
    pub detection_offset: Vec2,
    /// Проба детекции: полный размер box-а
    pub detection_size: Vec2,
    /// Какие слои считаются игроком
    pub player_layer: LayerMask,

    /// Cooldown луча (секунды)
    pub beam_cooldown_time: f32,
    pub beam_charging_sfx: SfxHandle,
    pub beam_launch_sfx: SfxHandle,

    /// Вероятность ветки "одиночный снаряд" когда игрок не в зоне
    pub single_projectile_chance: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            continuous_fire_duration: 1.5,
            detection_offset: Vec2::new(-4.0, 0.0),
            detection_size: Vec2::new(8.0, 3.0),
            player_layer: LayerMask::PLAYER,
            beam_cooldown_time: 12.0,
            beam_charging_sfx: SfxHandle::new("boss_beam_charging"),
            beam_launch_sfx: SfxHandle::new("boss_beam_launch"),
            single_projectile_chance: 0.5,
        }
    }
}

impl BossConfig {
    /// Минимум слотов prototype-ов/звуков для трёх веток магазина
    pub const REQUIRED_SLOTS: usize = 3;

    /// Проверка вместе с базовым EnemyConfig (слоты + интервал очереди)
    pub fn validate(&self, enemy: &EnemyConfig) -> Result<(), ConfigError> {
        enemy.validate()?;
        ensure_finite("continuous_fire_duration", self.continuous_fire_duration)?;
        ensure_finite("beam_cooldown_time", self.beam_cooldown_time)?;
        ensure_finite("single_projectile_chance", self.single_projectile_chance)?;
        ensure_finite("detection_offset.x", self.detection_offset.x)?;
        ensure_finite("detection_offset.y", self.detection_offset.y)?;
        ensure_finite("detection_size.x", self.detection_size.x)?;
        ensure_finite("detection_size.y", self.detection_size.y)?;

        if enemy.projectiles.len() < Self::REQUIRED_SLOTS {
            return Err(ConfigError::MissingBossSlots {
                slot: "projectile",
                required: Self::REQUIRED_SLOTS,
                actual: enemy.projectiles.len(),
            });
        }
        if enemy.projectile_launch_sfx.len() < Self::REQUIRED_SLOTS {
            return Err(ConfigError::MissingBossSlots {
                slot: "launch sfx",
                required: Self::REQUIRED_SLOTS,
                actual: enemy.projectile_launch_sfx.len(),
            });
        }
        // Очередь шагает по min_fire_interval — ноль зациклил бы залп
        if !(enemy.min_fire_interval > 0.0) {
            return Err(ConfigError::NonPositiveBurstInterval(enemy.min_fire_interval));
        }
        if !(self.continuous_fire_duration > 0.0) {
            return Err(ConfigError::NonPositiveBurstDuration(self.continuous_fire_duration));
        }
        if !(self.beam_cooldown_time >= 0.0) {
            return Err(ConfigError::NegativeBeamCooldown(self.beam_cooldown_time));
        }
        if !(0.0..=1.0).contains(&self.single_projectile_chance) {
            return Err(ConfigError::InvalidBranchProbability(self.single_projectile_chance));
        }
        Ok(())
    }

    /// Базовый EnemyConfig босса: три слота снарядов и звуков
    pub fn default_enemy_config() -> EnemyConfig {
        EnemyConfig {
            move_speed: 1.5,
            move_rotation_angle: 10.0,
            projectiles: vec![
                ProjectilePrototype::new("boss_projectile_close"),
                ProjectilePrototype::new("boss_projectile_single"),
                ProjectilePrototype::new("boss_projectile_spread_up"),
                ProjectilePrototype::new("boss_projectile_spread_mid"),
                ProjectilePrototype::new("boss_projectile_spread_down"),
            ],
            projectile_launch_sfx: vec![
                SfxHandle::new("boss_launch_close"),
                SfxHandle::new("boss_launch_single"),
                SfxHandle::new("boss_launch_spread"),
            ],
            muzzle_offset: Vec2::new(-1.8, 0.0),
            min_fire_interval: 0.1,
            max_fire_interval: 1.5,
            body_size: Vec2::new(3.6, 2.4),
        }
    }
}
