//! # Game State Machine
//!
//! ```text
//!          EnterGame             OpenSettings
//!   Game ◄─────────── Menu ──────────────────► Settings
//!     │                ▲  ▲                       │
//!     └──── Back ──────┘  └──────── Back ─────────┘
//! ```

use tracing::info;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Title screen.
    #[default]
    Menu,
    /// Settings screen.
    Settings,
    /// In the world.
    Game,
}

/// A discrete input event for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the menu for the world.
    EnterGame,
    /// Open the settings screen.
    OpenSettings,
    /// Return to the menu.
    Back,
    /// Render distance +1.
    IncreaseRenderDistance,
    /// Render distance -1.
    DecreaseRenderDistance,
    /// Put the player back at the spawn camera.
    TeleportToSpawn,
    /// Toggle free flight.
    ToggleNoclip,
}

impl GameState {
    /// Returns the state after `action`, or `None` if the action does not
    /// change screens here.
    #[must_use]
    pub const fn transition(self, action: Action) -> Option<Self> {
        match (self, action) {
            (Self::Menu, Action::EnterGame) => Some(Self::Game),
            (Self::Menu, Action::OpenSettings) => Some(Self::Settings),
            (Self::Settings | Self::Game, Action::Back) => Some(Self::Menu),
            _ => None,
        }
    }

    /// Applies `action` in place. Returns true if the state changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match self.transition(action) {
            Some(next) => {
                info!(from = ?*self, to = ?next, "State transition");
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Mouse is captured for looking around.
    #[must_use]
    pub const fn cursor_captured(self) -> bool {
        matches!(self, Self::Game)
    }

    /// The world is simulated and drawn.
    #[must_use]
    pub const fn is_in_world(self) -> bool {
        matches!(self, Self::Game)
    }
}
