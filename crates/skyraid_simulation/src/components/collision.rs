//! Hitbox + layer mask для overlap-проб
//!
//! Полноценная физика живёт в host-е. Здесь — только то, что нужно
//! детекции босса: axis-aligned box и фильтр по слоям.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Битовая маска physics-слоёв
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub const PLAYER: Self = Self::layer(6);
    pub const ENEMY: Self = Self::layer(7);
    pub const PROJECTILE: Self = Self::layer(8);

    /// Маска из одного слоя (index 0..32)
    pub const fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// Прямоугольный hitbox (центр = translation entity)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hitbox {
    pub half_extents: Vec2,
    pub layers: LayerMask,
}

impl Hitbox {
    pub fn new(size: Vec2, layers: LayerMask) -> Self {
        Self {
            half_extents: size / 2.0,
            layers,
        }
    }

    /// World-space AABB при данной позиции
    pub fn aabb(&self, position: Vec2) -> Aabb2d {
        Aabb2d::new(position, self.half_extents)
    }
}
