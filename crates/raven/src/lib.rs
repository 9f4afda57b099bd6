//! # RAVEN
//!
//! The game crate for The Raven: a first-person walk across endless
//! procedural terrain.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           RAVEN                                 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────────┐          ┌──────────────────┐             │
//! │  │ raven_procedural │─────────>│ raven_rendering  │             │
//! │  │                  │  chunks  │                  │             │
//! │  │  • Noise / paths │          │  • Frustum cull  │             │
//! │  │  • Chunk meshes  │          │  • Terrain pass  │             │
//! │  │  • Streaming     │          │  • Sky / water   │             │
//! │  └────────┬─────────┘          └────────┬─────────┘             │
//! │           │                             │                       │
//! │           │      ┌──────────────────┐   │                       │
//! │           └─────>│   GameContext    │<──┘                       │
//! │                  │  • Player        │                           │
//! │                  │  • Boundaries    │───> RenderBackend (shell) │
//! │                  │  • State machine │                           │
//! │                  └──────────────────┘                           │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration
//! - `context`: Frame orchestration
//! - `player`: First-person controller
//! - `boundary`: World edge push-back and warnings
//! - `state`: Menu / settings / game screens

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod boundary;
pub mod config;
pub mod context;
pub mod error;
pub mod hud;
pub mod player;
pub mod spawn;
pub mod state;

// Re-export the layers
pub use raven_procedural as procedural;
pub use raven_rendering as rendering;

// Re-export commonly used types
pub use boundary::{BoundaryWarning, WorldBoundary};
pub use config::{
    BoundaryConfig, CameraSection, GameConfig, PlayerConfig, SkySection, WaterSection, WorldSection,
};
pub use context::{FrameInput, FrameReport, GameContext, MAX_FRAME_DT};
pub use error::{ConfigError, RavenError, RavenResult};
pub use hud::{FpsCounter, HudSnapshot};
pub use player::{MoveIntent, Player};
pub use spawn::SpawnHut;
pub use state::{Action, GameState};
