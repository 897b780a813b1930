//! Глобальное состояние партии

use bevy::prelude::*;

/// Состояние игры, читаемое любой системой в любой момент
///
/// Host переключает его (смерть игрока → GameOver).
/// Fire-задачи проверяют `is_game_over()` на каждом пробуждении и
/// завершаются без выстрела.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
    GameOver,
    Scoring,
}

impl GameState {
    pub fn is_game_over(self) -> bool {
        matches!(self, GameState::GameOver)
    }
}
