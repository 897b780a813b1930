//! Tests for BossController tasks (fire cycle, beam, chase).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;
    use std::cell::Cell;
    use std::time::Duration;

    use super::super::components::*;
    use super::super::selection::MagazineLoadout;
    use crate::config::{BossConfig, EnemyConfig, SfxHandle};
    use crate::effects::{AnimatorTrigger, ControllerAction};
    use crate::enemy::EnemyController;
    use crate::shared::{Viewport, Wait};

    // Все длительности кратны шагу — без граничных эффектов float
    const TICK: Duration = Duration::from_millis(250);

    fn configs() -> (EnemyConfig, BossConfig) {
        let enemy = EnemyConfig {
            min_fire_interval: 0.25,
            max_fire_interval: 0.5,
            ..BossConfig::default_enemy_config()
        };
        let boss = BossConfig {
            continuous_fire_duration: 1.0,
            beam_cooldown_time: 1.0,
            ..Default::default()
        };
        (enemy, boss)
    }

    fn active_boss(boss_config: &BossConfig) -> BossController {
        let mut boss = BossController::default();
        boss.activate(boss_config);
        boss
    }

    fn ctx<'a>(enemy: &'a EnemyConfig, boss: &'a BossConfig, game_over: bool) -> BossFireContext<'a> {
        BossFireContext {
            enemy,
            boss,
            game_over,
            muzzle: Vec2::new(5.0, 0.0),
        }
    }

    fn releases(actions: &[ControllerAction]) -> usize {
        actions
            .iter()
            .filter(|a| matches!(a, ControllerAction::ReleaseProjectile { .. }))
            .count()
    }

    /// Прогнать `ticks` tick-ов fire задачи, собрать все действия
    fn run_fire(
        boss: &mut BossController,
        enemy: &EnemyConfig,
        boss_config: &BossConfig,
        in_range: bool,
        rng: &mut ChaCha8Rng,
        ticks: usize,
    ) -> Vec<ControllerAction> {
        let mut all = Vec::new();
        for _ in 0..ticks {
            all.extend(boss.advance_fire(ctx(enemy, boss_config, false), || in_range, rng, TICK));
        }
        all
    }

    #[rstest]
    #[case(1.5, 0.1, 15)]
    #[case(1.0, 0.25, 4)]
    #[case(1.0, 0.3, 4)]
    #[case(1.0, 0.4, 3)]
    #[case(2.0, 0.5, 4)]
    #[case(0.05, 0.1, 1)]
    #[case(50.002, 1.0, 51)]
    #[case(3.0, 0.1, 30)]
    fn test_burst_volley_count(#[case] duration: f32, #[case] interval: f32, #[case] expected: u32) {
        assert_eq!(burst_volley_count(duration, interval), expected);
    }

    #[test]
    fn test_activation_resets_beam_and_stops_vfx() {
        let (_, boss_config) = configs();
        let mut boss = BossController {
            beam_ready: true,
            ..Default::default()
        };

        let actions = boss.activate(&boss_config);

        assert_eq!(actions, vec![ControllerAction::MuzzleVfx { playing: false }]);
        assert!(!boss.beam_ready);
        assert!(boss.beam_cooldown.is_some());
        assert_eq!(boss.fire, Some(BossFireTask::Deciding));
        assert!(boss.chase.is_none());
        assert_eq!(boss.phase(), BossPhase::Patrol);
    }

    #[test]
    fn test_beam_ready_exactly_after_cooldown() {
        let (_, boss_config) = configs();
        let mut boss = active_boss(&boss_config);

        // 1.0s при шаге 250ms → готов на 4-м tick-е, не раньше
        for _ in 0..3 {
            assert!(!boss.tick_beam_cooldown(TICK));
            assert!(!boss.beam_ready);
        }
        assert!(boss.tick_beam_cooldown(TICK));
        assert!(boss.beam_ready);

        // Одноразовый: дальше переходов нет
        assert!(boss.beam_cooldown.is_none());
        assert!(!boss.tick_beam_cooldown(TICK));
        assert!(boss.beam_ready);
    }

    #[test]
    fn test_full_burst_cycle_timeline() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut boss = active_boss(&boss_config);
        let tick = |boss: &mut BossController, rng: &mut ChaCha8Rng| {
            boss.advance_fire(ctx(&enemy, &boss_config, false), || true, rng, TICK)
        };

        // tick 1: пауза max_fire_interval стартует
        assert!(tick(&mut boss, &mut rng).is_empty());
        assert!(matches!(boss.fire, Some(BossFireTask::Waiting(_))));
        // tick 2: ждём
        assert!(tick(&mut boss, &mut rng).is_empty());

        // tick 3: очередь стартует сразу с первого залпа
        let first = tick(&mut boss, &mut rng);
        assert_eq!(first[0], ControllerAction::MuzzleVfx { playing: true });
        assert_eq!(releases(&first), 1);
        assert!(first.contains(&ControllerAction::sfx(&enemy.projectile_launch_sfx[0])));
        assert_eq!(boss.phase(), BossPhase::BurstFire);
        assert_eq!(boss.loadout, Some(MagazineLoadout::Close));

        // tick 4..6: оставшиеся три залпа
        for _ in 0..3 {
            assert_eq!(releases(&tick(&mut boss, &mut rng)), 1);
        }

        // tick 7: очередь закончена, VFX выключен, снова пауза (тот же tick)
        let end = tick(&mut boss, &mut rng);
        assert_eq!(end, vec![ControllerAction::MuzzleVfx { playing: false }]);
        assert!(matches!(boss.fire, Some(BossFireTask::Waiting(_))));
        assert_eq!(boss.phase(), BossPhase::Patrol);
    }

    #[rstest]
    #[case::player_close(true, 0)]
    #[case::player_far(false, 1)]
    fn test_burst_uses_selected_sfx_slot(#[case] in_range: bool, #[case] expected_slot: usize) {
        let (enemy, boss_config) = configs();
        // Всегда одиночный снаряд, если игрок далеко
        let boss_config = BossConfig {
            single_projectile_chance: 1.0,
            ..boss_config
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut boss = active_boss(&boss_config);

        let actions = run_fire(&mut boss, &enemy, &boss_config, in_range, &mut rng, 7);

        let expected_sfx = ControllerAction::sfx(&enemy.projectile_launch_sfx[expected_slot]);
        assert_eq!(actions.iter().filter(|a| **a == expected_sfx).count(), 4);
        assert_eq!(boss.magazine, vec![enemy.projectiles[expected_slot].clone()]);
    }

    #[test]
    fn test_spread_burst_releases_all_remaining_prototypes() {
        let (enemy, boss_config) = configs();
        let boss_config = BossConfig {
            single_projectile_chance: 0.0,
            ..boss_config
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut boss = active_boss(&boss_config);

        let actions = run_fire(&mut boss, &enemy, &boss_config, false, &mut rng, 7);

        // 3 prototype-а веера × 4 залпа
        assert_eq!(releases(&actions), 12);
        assert_eq!(boss.loadout, Some(MagazineLoadout::Spread));
    }

    #[test]
    fn test_detection_runs_once_per_burst() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut boss = active_boss(&boss_config);
        let probes = Cell::new(0);

        // Две полных очереди: 7 tick-ов + пауза 2 + 5 tick-ов залпов/конца
        for _ in 0..14 {
            boss.advance_fire(
                ctx(&enemy, &boss_config, false),
                || {
                    probes.set(probes.get() + 1);
                    false
                },
                &mut rng,
                TICK,
            );
        }

        assert_eq!(probes.get(), 2);
    }

    #[test]
    fn test_beam_attack_when_ready() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut boss = active_boss(&boss_config);
        boss.beam_ready = true;

        let actions = boss.advance_fire(ctx(&enemy, &boss_config, false), || false, &mut rng, TICK);

        assert_eq!(
            actions,
            vec![
                ControllerAction::TriggerAnimation(AnimatorTrigger::LaunchBeam),
                ControllerAction::sfx(&boss_config.beam_charging_sfx),
            ]
        );
        assert!(!boss.beam_ready);
        assert!(boss.fire.is_none());
        assert!(boss.chase.is_some());
        assert_eq!(boss.phase(), BossPhase::BeamAttack);
    }

    #[test]
    fn test_beam_waits_for_running_burst() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut boss = active_boss(&boss_config);

        // Доводим до середины очереди
        run_fire(&mut boss, &enemy, &boss_config, true, &mut rng, 4);
        assert_eq!(boss.phase(), BossPhase::BurstFire);
        boss.beam_ready = true;

        // Оставшиеся 2 залпа не прерываются
        let actions = run_fire(&mut boss, &enemy, &boss_config, true, &mut rng, 2);
        assert_eq!(releases(&actions), 2);
        assert_eq!(boss.phase(), BossPhase::BurstFire);

        // Конец очереди → сразу луч на том же tick-е
        let actions = run_fire(&mut boss, &enemy, &boss_config, true, &mut rng, 1);
        assert_eq!(actions[0], ControllerAction::MuzzleVfx { playing: false });
        assert!(actions.contains(&ControllerAction::TriggerAnimation(AnimatorTrigger::LaunchBeam)));
        assert_eq!(boss.phase(), BossPhase::BeamAttack);
    }

    #[test]
    fn test_beam_callbacks() {
        let (_, boss_config) = configs();
        let mut boss = active_boss(&boss_config);
        boss.fire = None;
        boss.beam_cooldown = None;
        boss.chase = Some(ChaseTask { ticks: 30 });

        assert_eq!(
            boss.on_beam_launched(&boss_config),
            vec![ControllerAction::sfx(&boss_config.beam_launch_sfx)]
        );

        // Очереди не было → гасить muzzle VFX нечего
        assert_eq!(boss.on_beam_stopped(&boss_config), Some(Vec::new()));
        assert!(boss.chase.is_none());
        assert!(!boss.beam_ready);
        let cooldown = boss.beam_cooldown.as_ref().expect("cooldown restarted");
        assert_eq!(cooldown.remaining(), Duration::from_secs(1));
        assert_eq!(boss.fire, Some(BossFireTask::Deciding));
    }

    #[test]
    fn test_beam_stop_replaces_running_tasks() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut boss = active_boss(&boss_config);
        run_fire(&mut boss, &enemy, &boss_config, false, &mut rng, 4);
        boss.tick_beam_cooldown(TICK);
        assert_eq!(boss.phase(), BossPhase::BurstFire);

        // Прерванная очередь гасит muzzle VFX
        assert_eq!(
            boss.on_beam_stopped(&boss_config),
            Some(vec![ControllerAction::MuzzleVfx { playing: false }])
        );

        // Один fire цикл с начала, cooldown с полной длительностью
        assert_eq!(boss.fire, Some(BossFireTask::Deciding));
        assert_eq!(
            boss.beam_cooldown.as_ref().map(Wait::remaining),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_beam_stop_while_waiting_keeps_vfx_untouched() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut boss = active_boss(&boss_config);
        run_fire(&mut boss, &enemy, &boss_config, false, &mut rng, 1);
        assert!(matches!(boss.fire, Some(BossFireTask::Waiting(_))));

        assert_eq!(boss.on_beam_stopped(&boss_config), Some(Vec::new()));
        assert_eq!(boss.fire, Some(BossFireTask::Deciding));
    }

    #[test]
    fn test_inactive_boss_ignores_callbacks() {
        let (_, boss_config) = configs();
        let mut boss = BossController::default();

        assert!(boss.on_beam_launched(&boss_config).is_empty());
        assert!(boss.on_beam_stopped(&boss_config).is_none());
        assert!(boss.fire.is_none());
        assert!(boss.beam_cooldown.is_none());
    }

    #[test]
    fn test_game_over_mid_wait_exits_without_firing() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut boss = active_boss(&boss_config);
        run_fire(&mut boss, &enemy, &boss_config, false, &mut rng, 1);

        let mut actions = Vec::new();
        for _ in 0..10 {
            actions.extend(boss.advance_fire(ctx(&enemy, &boss_config, true), || true, &mut rng, TICK));
        }

        assert!(actions.is_empty());
        assert!(boss.fire.is_none());
        assert_eq!(boss.phase(), BossPhase::Halted);
    }

    #[test]
    fn test_game_over_mid_burst_stops_vfx() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut boss = active_boss(&boss_config);
        run_fire(&mut boss, &enemy, &boss_config, true, &mut rng, 3);

        let actions = boss.advance_fire(ctx(&enemy, &boss_config, true), || true, &mut rng, TICK);

        assert_eq!(actions, vec![ControllerAction::MuzzleVfx { playing: false }]);
        assert!(boss.fire.is_none());
    }

    #[test]
    fn test_deactivate_cancels_every_task() {
        let (enemy, boss_config) = configs();
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut boss = active_boss(&boss_config);
        run_fire(&mut boss, &enemy, &boss_config, true, &mut rng, 4);
        boss.chase = Some(ChaseTask::default());

        boss.deactivate();

        assert_eq!(boss.phase(), BossPhase::Inactive);
        assert!(boss.fire.is_none());
        assert!(boss.chase.is_none());
        assert!(boss.beam_cooldown.is_none());
        assert!(boss.magazine.is_empty());
        assert!(!boss.tick_beam_cooldown(Duration::from_secs(60)));
        assert!(run_fire(&mut boss, &enemy, &boss_config, true, &mut rng, 10).is_empty());
    }

    #[test]
    fn test_chase_pins_right_edge_and_mirrors_player() {
        let (_, boss_config) = configs();
        let viewport = Viewport::default();
        let mut boss = active_boss(&boss_config);
        let mut enemy = EnemyController {
            padding: Vec2::new(1.8, 1.2),
            ..Default::default()
        };

        // Без погони цель не трогаем
        boss.advance_chase(&mut enemy, &viewport, 2.0);
        assert_eq!(enemy.target_position, Vec2::ZERO);

        boss.chase = Some(ChaseTask::default());
        boss.advance_chase(&mut enemy, &viewport, 2.0);
        assert!(enemy.target_position.abs_diff_eq(Vec2::new(8.9 - 1.8, 2.0), 1e-5));

        // Игрок за пределами досягаемости — цель прижата к полю
        boss.advance_chase(&mut enemy, &viewport, -10.0);
        assert!((enemy.target_position.y - (-5.0 + 1.2)).abs() < 1e-5);
        assert_eq!(boss.chase.map(|c| c.ticks), Some(2));
    }

    #[test]
    fn test_missing_sfx_slot_still_fires() {
        // Конфиг без валидации: слотов звука меньше трёх
        let (enemy, boss_config) = configs();
        let enemy = EnemyConfig {
            projectile_launch_sfx: vec![SfxHandle::new("only")],
            ..enemy
        };
        let boss_config = BossConfig {
            single_projectile_chance: 1.0,
            ..boss_config
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut boss = active_boss(&boss_config);

        let actions = run_fire(&mut boss, &enemy, &boss_config, false, &mut rng, 3);

        assert_eq!(releases(&actions), 1);
        assert!(boss.launch_sfx.is_none());
        assert!(!actions.iter().any(|a| matches!(a, ControllerAction::PlaySfx { .. })));
    }
}
