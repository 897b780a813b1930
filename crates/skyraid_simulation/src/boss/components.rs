//! Boss components: BossController + его задачи (fire, beam cooldown, chase).

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use crate::boss::selection::{choose_loadout, load_magazine, MagazineLoadout};
use crate::config::{BossConfig, EnemyConfig, ProjectilePrototype, SfxHandle};
use crate::effects::{AnimatorTrigger, ControllerAction};
use crate::enemy::EnemyController;
use crate::shared::{Viewport, Wait};

/// Контроллер босса поверх EnemyController
///
/// Базовая часть (спавн, патруль, activate/deactivate) живёт в
/// `EnemyController`. Босс зеркалит его активацию: новая активация
/// EnemyController-а перезапускает задачи босса.
///
/// Фазы: Patrol → BurstFire ⇄ Patrol … → BeamAttack (+ chase) → Patrol …
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(EnemyController)]
pub struct BossController {
    pub active: bool,
    /// Какую активацию EnemyController-а мы уже обработали
    pub seen_activation: u32,

    /// Cooldown луча истёк, луч можно запускать
    pub beam_ready: bool,
    /// Снаряды текущей очереди (пересобирается на каждой очереди)
    pub magazine: Vec<ProjectilePrototype>,
    /// Звук выстрела текущей очереди
    pub launch_sfx: Option<SfxHandle>,
    pub loadout: Option<MagazineLoadout>,

    pub beam_cooldown: Option<Wait>,
    pub fire: Option<BossFireTask>,
    pub chase: Option<ChaseTask>,
}

/// Fire задача босса
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum BossFireTask {
    /// Начало итерации цикла: проверка game over и готовности луча
    Deciding,
    /// Пауза max_fire_interval перед очередью
    Waiting(Wait),
    /// Непрерывная очередь
    Bursting(Burst),
}

/// Состояние очереди
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Burst {
    pub volleys_fired: u32,
    pub volleys_total: u32,
    /// Пауза min_fire_interval после залпа (None до первого залпа)
    pub wait: Option<Wait>,
}

/// Погоня за игроком во время луча (один шаг на fixed tick)
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct ChaseTask {
    pub ticks: u32,
}

/// Наблюдаемая фаза босса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossPhase {
    Inactive,
    /// Fire цикл ждёт следующую очередь
    Patrol,
    BurstFire,
    /// Луч: fire задача остановлена, идёт chase
    BeamAttack,
    /// Fire цикл завершён (game over), только патруль
    Halted,
}

/// Входные данные одного tick-а fire задачи
#[derive(Debug, Clone, Copy)]
pub struct BossFireContext<'a> {
    pub enemy: &'a EnemyConfig,
    pub boss: &'a BossConfig,
    pub game_over: bool,
    /// Позиция дула на этом tick-е
    pub muzzle: Vec2,
}

/// Число залпов очереди: ⌈duration / interval⌉
///
/// Кратное деление даёт ровно duration / interval залпов: к целому
/// прижимается только шум на уровне нескольких ULP f32 (1.5 / 0.1 → 15),
/// любой реальный остаток добавляет залп (50.002 / 1.0 → 51).
pub fn burst_volley_count(duration: f32, interval: f32) -> u32 {
    if !(duration > 0.0 && interval > 0.0) {
        return 0;
    }
    let ratio = f64::from(duration) / f64::from(interval);
    let nearest = ratio.round();
    let count = if (ratio - nearest).abs() <= ratio * f64::from(f32::EPSILON) * 4.0 {
        nearest
    } else {
        ratio.ceil()
    };
    count.clamp(1.0, f64::from(u32::MAX)) as u32
}

impl BossController {
    /// Фаза для логов и host-а
    pub fn phase(&self) -> BossPhase {
        if !self.active {
            return BossPhase::Inactive;
        }
        if self.chase.is_some() {
            return BossPhase::BeamAttack;
        }
        match self.fire {
            Some(BossFireTask::Bursting(_)) => BossPhase::BurstFire,
            Some(_) => BossPhase::Patrol,
            None => BossPhase::Halted,
        }
    }

    /// Активация: луч не готов, muzzle VFX выключен, cooldown + fire цикл
    pub fn activate(&mut self, config: &BossConfig) -> Vec<ControllerAction> {
        self.active = true;
        self.beam_ready = false;
        self.magazine.clear();
        self.launch_sfx = None;
        self.loadout = None;
        self.beam_cooldown = Some(Wait::from_secs(config.beam_cooldown_time));
        self.fire = Some(BossFireTask::Deciding);
        self.chase = None;

        vec![ControllerAction::MuzzleVfx { playing: false }]
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.beam_ready = false;
        self.beam_cooldown = None;
        self.fire = None;
        self.chase = None;
        self.magazine.clear();
    }

    /// Один tick cooldown-а. `true` — луч только что стал готов.
    pub fn tick_beam_cooldown(&mut self, delta: Duration) -> bool {
        if !self.active {
            return false;
        }
        let Some(wait) = self.beam_cooldown.as_mut() else {
            return false;
        };
        if !wait.tick(delta) {
            return false;
        }
        self.beam_cooldown = None;
        self.beam_ready = true;
        true
    }

    /// Один tick fire задачи
    ///
    /// Крутится до ближайшей точки yield-а (ожидание или выход из цикла):
    /// законченная очередь на том же tick-е возвращается в Deciding.
    /// `detect` вызывается не больше одного раза — в начале очереди.
    pub fn advance_fire(
        &mut self,
        ctx: BossFireContext,
        mut detect: impl FnMut() -> bool,
        rng: &mut impl Rng,
        delta: Duration,
    ) -> Vec<ControllerAction> {
        let mut actions = Vec::new();
        if !self.active {
            return actions;
        }

        while let Some(state) = self.fire.take() {
            match state {
                BossFireTask::Deciding => {
                    if ctx.game_over {
                        break;
                    }
                    if self.beam_ready {
                        actions.extend(self.begin_beam_attack(ctx.boss));
                        break;
                    }
                    self.fire = Some(BossFireTask::Waiting(Wait::from_secs(ctx.enemy.max_fire_interval)));
                    break;
                }
                BossFireTask::Waiting(mut wait) => {
                    if !wait.tick(delta) {
                        self.fire = Some(BossFireTask::Waiting(wait));
                        break;
                    }
                    if ctx.game_over {
                        break;
                    }
                    let loadout = choose_loadout(detect(), ctx.boss.single_projectile_chance, rng);
                    self.reload(ctx.enemy, loadout);
                    actions.push(ControllerAction::MuzzleVfx { playing: true });
                    self.fire = Some(BossFireTask::Bursting(Burst {
                        volleys_fired: 0,
                        volleys_total: burst_volley_count(ctx.boss.continuous_fire_duration, ctx.enemy.min_fire_interval),
                        wait: None,
                    }));
                }
                BossFireTask::Bursting(mut burst) => {
                    if let Some(wait) = burst.wait.as_mut() {
                        if !wait.tick(delta) {
                            self.fire = Some(BossFireTask::Bursting(burst));
                            break;
                        }
                    }
                    if burst.volleys_fired >= burst.volleys_total {
                        actions.push(ControllerAction::MuzzleVfx { playing: false });
                        self.fire = Some(BossFireTask::Deciding);
                        continue;
                    }
                    if ctx.game_over {
                        actions.push(ControllerAction::MuzzleVfx { playing: false });
                        break;
                    }

                    actions.extend(self.magazine.iter().map(|prototype| ControllerAction::ReleaseProjectile {
                        prototype: prototype.clone(),
                        position: ctx.muzzle,
                    }));
                    if let Some(sfx) = &self.launch_sfx {
                        actions.push(ControllerAction::sfx(sfx));
                    }
                    burst.volleys_fired += 1;
                    burst.wait = Some(Wait::from_secs(ctx.enemy.min_fire_interval));
                    self.fire = Some(BossFireTask::Bursting(burst));
                    break;
                }
            }
        }

        actions
    }

    fn reload(&mut self, config: &EnemyConfig, loadout: MagazineLoadout) {
        load_magazine(&mut self.magazine, &config.projectiles, loadout);
        self.launch_sfx = config.projectile_launch_sfx.get(loadout.sfx_slot()).cloned();
        self.loadout = Some(loadout);
    }

    /// Луч: готовность сброшена, trigger аниматора, звук зарядки, погоня.
    /// Fire цикл завершается (перезапуск — по StopBeam).
    fn begin_beam_attack(&mut self, config: &BossConfig) -> Vec<ControllerAction> {
        self.beam_ready = false;
        self.fire = None;
        self.chase = Some(ChaseTask::default());

        vec![
            ControllerAction::TriggerAnimation(AnimatorTrigger::LaunchBeam),
            ControllerAction::sfx(&config.beam_charging_sfx),
        ]
    }

    /// Callback таймлайна: луч выпущен
    pub fn on_beam_launched(&self, config: &BossConfig) -> Vec<ControllerAction> {
        if !self.active {
            return Vec::new();
        }
        vec![ControllerAction::sfx(&config.beam_launch_sfx)]
    }

    /// Callback таймлайна: луч погас
    ///
    /// Погоня отменяется, cooldown и fire цикл стартуют заново
    /// (старые экземпляры задач заменяются). Прерванная очередь гасит
    /// muzzle VFX. `None` — босс неактивен.
    pub fn on_beam_stopped(&mut self, config: &BossConfig) -> Option<Vec<ControllerAction>> {
        if !self.active {
            return None;
        }
        let mut actions = Vec::new();
        if matches!(self.fire, Some(BossFireTask::Bursting(_))) {
            actions.push(ControllerAction::MuzzleVfx { playing: false });
        }
        self.chase = None;
        self.beam_ready = false;
        self.beam_cooldown = Some(Wait::from_secs(config.beam_cooldown_time));
        self.fire = Some(BossFireTask::Deciding);
        Some(actions)
    }

    /// Один tick погони: цель = правый край, Y игрока
    pub fn advance_chase(&mut self, enemy: &mut EnemyController, viewport: &Viewport, player_y: f32) {
        if !self.active {
            return;
        }
        let Some(chase) = self.chase.as_mut() else {
            return;
        };
        chase.ticks += 1;
        enemy.target_position = chase_target(viewport, enemy.padding, player_y);
    }
}

/// Цель погони (внутри поля с учётом padding)
pub fn chase_target(viewport: &Viewport, padding: Vec2, player_y: f32) -> Vec2 {
    viewport.clamp(Vec2::new(viewport.max_x() - padding.x, player_y), padding)
}
