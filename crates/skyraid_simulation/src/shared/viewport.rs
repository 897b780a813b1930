//! Viewport — игровое поле в world-space
//!
//! Враги спавнятся у правого края и патрулируют правую половину поля.
//! Все случайные точки учитывают padding (половина размера тела), поэтому
//! entity целиком остаётся внутри поля.

use bevy::prelude::*;
use rand::Rng;

/// Границы игрового поля (world-space, ortho camera)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        // 16:9 при orthographic size = 5
        Self::new(Vec2::new(-8.9, -5.0), Vec2::new(8.9, 5.0))
    }
}

impl Viewport {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn max_x(&self) -> f32 {
        self.max.x
    }

    pub fn middle_x(&self) -> f32 {
        (self.min.x + self.max.x) / 2.0
    }

    /// Точка спавна: прижата к правому краю, случайный Y
    pub fn random_enemy_spawn_position(&self, padding: Vec2, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            self.max.x - padding.x,
            random_between(rng, self.min.y + padding.y, self.max.y - padding.y),
        )
    }

    /// Случайная точка в правой половине поля
    pub fn random_right_half_position(&self, padding: Vec2, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            random_between(rng, self.middle_x(), self.max.x - padding.x),
            random_between(rng, self.min.y + padding.y, self.max.y - padding.y),
        )
    }

    /// Внутри ли точка поля с учётом padding
    pub fn contains(&self, position: Vec2, padding: Vec2) -> bool {
        let lo = self.min + padding;
        let hi = self.max - padding;
        position.x >= lo.x && position.x <= hi.x && position.y >= lo.y && position.y <= hi.y
    }

    /// Прижать точку внутрь поля (для вырожденных осей — к нижней границе)
    pub fn clamp(&self, position: Vec2, padding: Vec2) -> Vec2 {
        let lo = self.min + padding;
        let hi = (self.max - padding).max(lo);
        position.clamp(lo, hi)
    }
}

/// Равномерно в [lo, hi]; вырожденный диапазон → lo
fn random_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}
