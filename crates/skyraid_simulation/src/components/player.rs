//! Player marker component
//!
//! Отмечает корабль игрока. Босс читает его позицию во время погони.

use bevy::prelude::Component;

/// Marker component для корабля игрока
///
/// # Архитектурная заметка
/// - Chase система босса использует `With<Player>` (зеркалит Y игрока)
/// - Детекция босса НЕ смотрит на marker — только на `Hitbox` + `LayerMask`
///
/// # Single-player
/// Ровно один entity должен иметь этот компонент. Отсутствие игрока —
/// ошибка сборки сцены (логируется, tick погони пропускается).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
