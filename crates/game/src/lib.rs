//! Pawnmotion host
//!
//! The pieces around the physics pawns that a game engine would normally own:
//!
//! - Level geometry and spawn points
//! - Raw input translation and per-pawn bindings
//! - Ordered event dispatch to the possessed pawn
//! - The frame loop that ticks both pawns
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Simulation                          │
//! │  ┌──────────┐   ┌────────────┐   ┌────────────────────────┐  │
//! │  │ RawInput │──►│ Translator │──►│ Dispatcher ─► possessed│  │
//! │  └──────────┘   └────────────┘   │               pawn     │  │
//! │                                  └────────────────────────┘  │
//! │  tick: character + drone ──probe──► Level::collision         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod dispatcher;
pub mod input;
pub mod level;
pub mod simulation;

// Re-export main types
pub use dispatcher::InputDispatcher;
pub use input::{InputBindings, InputTranslator, MovementKeys, RawInput};
pub use level::{Level, SpawnKind, SpawnPoint};
pub use simulation::{PawnKind, Simulation, SimulationConfig, CHARACTER_ACTOR, DRONE_ACTOR};

// Re-export physics types for convenience
pub use pawnmotion_physics::{
    CharacterBody, CharacterConfig, CollisionWorld, DroneBody, DroneConfig, InputEvent, Rotator,
};
