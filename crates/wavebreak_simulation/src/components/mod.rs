//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье (Health)
//! - movement: pathing authority, скорость, free-body (NavigationAgent, MovementSpeed, PhysicsBody)
//! - presentation: данные для внешнего рендера (SpriteParams, VisualOffset, Facing, CameraRig)

pub mod actor;
pub mod movement;
pub mod presentation;

pub use actor::*;
pub use movement::*;
pub use presentation::*;
