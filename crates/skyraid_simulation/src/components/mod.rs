//! ECS Components, общие для всех доменов
//!
//! Организация:
//! - game: глобальное состояние партии (GameState)
//! - player: player marker (Player)
//! - collision: hitbox + layer mask для overlap-проб (Hitbox, LayerMask)

pub mod collision;
pub mod game;
pub mod player;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod collision_tests;

// Re-exports для удобного импорта
pub use collision::*;
pub use game::*;
pub use player::*;
