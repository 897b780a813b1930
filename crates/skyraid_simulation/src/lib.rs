//! SKYRAID Simulation Core
//!
//! Headless ECS-симуляция поведения врагов и босса на Bevy 0.16.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = логика контроллеров (задачи, фазы, выбор магазина)
//! - Host = рендер, физика, audio, object pool, аниматор
//!
//! Host общается с симуляцией только событиями (см. `effects`,
//! `EnemyLifecycleEvent`, `BossAnimationEvent`) и ресурсами
//! (`GameState`, `Viewport`).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod boss;
pub mod components;
pub mod config;
pub mod effects;
pub mod enemy;
pub mod logger;
pub mod shared;

// Re-export базовых типов для удобства
pub use boss::{spawn_boss, boss_bundle, BossAnimationEvent, BossController, BossPhase, BossPlugin, MagazineLoadout};
pub use components::*;
pub use config::{BossConfig, ConfigError, EnemyConfig, ProjectilePrototype, SfxHandle};
pub use effects::{AnimationTriggered, AnimatorTrigger, MuzzleVfxChanged, ProjectileReleased, SfxRequested};
pub use enemy::{enemy_bundle, spawn_enemy, EnemyController, EnemyLifecycleEvent, EnemyPlugin};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use shared::{Viewport, Wait};

/// Наборы систем внутри одного fixed tick-а
///
/// Lifecycle → Callbacks → Timers → Movement → Fire (chain).
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BehaviorSet {
    /// Enable/Disable, активация свежих контроллеров
    Lifecycle,
    /// Callbacks host-а (таймлайн луча)
    Callbacks,
    /// Cooldown-ы
    Timers,
    /// Погоня + патруль
    Movement,
    /// Fire задачи
    Fire,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .init_resource::<GameState>()
            .init_resource::<Viewport>()
            .register_type::<EnemyController>()
            .register_type::<BossController>()
            .register_type::<EnemyConfig>()
            .register_type::<BossConfig>()
            .register_type::<Hitbox>()
            // Подсистемы
            .add_plugins((EnemyPlugin, BossPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Все случайные решения (точки патруля, интервалы стрельбы, ветка
/// магазина) берутся отсюда: одинаковый seed → одинаковый прогон.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// MinimalPlugins + SimulationPlugin, RNG с заданным seed, ConsoleLogger.
/// Тесты гоняют tick-и напрямую: `app.world_mut().run_schedule(FixedUpdate)`.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, SimulationPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты `T` всех entity в порядке Entity index, через Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
