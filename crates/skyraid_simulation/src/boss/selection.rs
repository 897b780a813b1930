//! Выбор магазина босса: проба детекции + взвешенная ветка
//!
//! Один раз на очередь:
//! - игрок в зоне пробы → Close (`projectiles[0]`, звук 0)
//! - иначе бросок r ∈ [0, 1): r < single_projectile_chance → Single
//!   (`projectiles[1]`, звук 1), иначе Spread (`projectiles[2..]`, звук 2)

use bevy::math::bounding::{Aabb2d, IntersectsVolume};
use bevy::prelude::*;
use rand::Rng;

use crate::components::{Hitbox, LayerMask};
use crate::config::{BossConfig, ProjectilePrototype};
use crate::enemy::anchor_point;

/// Box-проба перед боссом (world-space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionProbe {
    pub center: Vec2,
    pub half_size: Vec2,
    pub layers: LayerMask,
}

impl DetectionProbe {
    /// Проба, привязанная к текущему transform босса
    pub fn from_boss(transform: &Transform, config: &BossConfig) -> Self {
        Self {
            center: anchor_point(transform, config.detection_offset),
            half_size: config.detection_size / 2.0,
            layers: config.player_layer,
        }
    }

    pub fn aabb(&self) -> Aabb2d {
        Aabb2d::new(self.center, self.half_size)
    }

    /// Есть ли пересечение хотя бы с одним hitbox-ом нужного слоя
    pub fn overlaps<'a>(&self, hitboxes: impl IntoIterator<Item = (Vec2, &'a Hitbox)>) -> bool {
        let probe = self.aabb();
        hitboxes
            .into_iter()
            .filter(|(_, hitbox)| hitbox.layers.intersects(self.layers))
            .any(|(position, hitbox)| probe.intersects(&hitbox.aabb(position)))
    }
}

/// Ветка магазина на одну очередь
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MagazineLoadout {
    /// Игрок рядом — снаряд ближнего боя
    Close,
    /// Одиночный снаряд
    Single,
    /// Веер из всех оставшихся prototype-ов
    Spread,
}

impl MagazineLoadout {
    /// Индекс слота в `EnemyConfig::projectile_launch_sfx`
    pub fn sfx_slot(self) -> usize {
        match self {
            MagazineLoadout::Close => 0,
            MagazineLoadout::Single => 1,
            MagazineLoadout::Spread => 2,
        }
    }
}

/// Ветка по уже известному броску (детерминированная часть политики)
pub fn loadout_for_draw(player_in_range: bool, draw: f32, single_chance: f32) -> MagazineLoadout {
    if player_in_range {
        MagazineLoadout::Close
    } else if draw < single_chance {
        MagazineLoadout::Single
    } else {
        MagazineLoadout::Spread
    }
}

/// Полная политика: бросок делается только если игрок не в зоне
pub fn choose_loadout(player_in_range: bool, single_chance: f32, rng: &mut impl Rng) -> MagazineLoadout {
    if player_in_range {
        return MagazineLoadout::Close;
    }
    let draw: f32 = rng.gen();
    loadout_for_draw(false, draw, single_chance)
}

/// Перезарядка: магазин очищается и собирается заново
pub fn load_magazine(magazine: &mut Vec<ProjectilePrototype>, projectiles: &[ProjectilePrototype], loadout: MagazineLoadout) {
    magazine.clear();
    match loadout {
        MagazineLoadout::Close => magazine.extend(projectiles.first().cloned()),
        MagazineLoadout::Single => magazine.extend(projectiles.get(1).cloned()),
        MagazineLoadout::Spread => magazine.extend(projectiles.iter().skip(2).cloned()),
    }
}
