//! Shared domain — cross-cutting типы
//!
//! Содержит то, что используют и враги, и босс:
//! - Viewport (границы игрового поля + случайные точки)
//! - Wait (countdown-ожидание для задач контроллеров)

pub mod viewport;
pub mod wait;

// Re-export all
pub use viewport::*;
pub use wait::*;
