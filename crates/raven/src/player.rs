//! # Player Controller
//!
//! First-person walker over the terrain height field:
//! - Mouse look (yaw/pitch, pitch clamped short of vertical)
//! - Walk / sprint / crouch with head bob
//! - Gravity with ground snapping and jumping
//! - Noclip free flight for debugging
//!
//! Yaw 0 faces +Z. The player's position is the eye position.

use std::f32::consts::FRAC_PI_2;

use raven_procedural::HeightSource;
use raven_rendering::Camera;
use tracing::info;

use crate::config::PlayerConfig;

/// Pitch stays this far from straight up or down.
pub const PITCH_MARGIN: f32 = 0.1;

/// Movement below this length counts as standing still.
const MOVE_EPSILON: f32 = 0.01;

// ============================================================================
// INPUT
// ============================================================================

/// Held movement keys for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    /// Move along the view heading.
    pub forward: bool,
    /// Move against the view heading.
    pub back: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
    /// Sprint (wins over crouch).
    pub sprint: bool,
    /// Crouch.
    pub crouch: bool,
    /// Jump, if grounded.
    pub jump: bool,
    /// Rise (noclip only).
    pub ascend: bool,
    /// Sink (noclip only).
    pub descend: bool,
}

impl MoveIntent {
    /// Only the forward key held.
    #[must_use]
    pub fn walk_forward() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }
}

// ============================================================================
// PLAYER
// ============================================================================

/// First-person player.
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    position: [f32; 3],
    yaw: f32,
    pitch: f32,
    vertical_velocity: f32,
    grounded: bool,
    bob_timer: f32,
    noclip: bool,
}

impl Player {
    /// Creates a player at `position` with the given heading.
    #[must_use]
    pub fn new(config: PlayerConfig, position: [f32; 3], yaw: f32, pitch: f32) -> Self {
        Self {
            config,
            position,
            yaw,
            pitch: clamp_pitch(pitch),
            vertical_velocity: 0.0,
            grounded: false,
            bob_timer: 0.0,
            noclip: false,
        }
    }

    /// Creates a player at `position` facing `target`.
    #[must_use]
    pub fn looking_at(config: PlayerConfig, position: [f32; 3], target: [f32; 3]) -> Self {
        let dx = target[0] - position[0];
        let dy = target[1] - position[1];
        let dz = target[2] - position[2];
        let yaw = dx.atan2(dz);
        let pitch = dy.atan2(dx.hypot(dz));
        Self::new(config, position, yaw, pitch)
    }

    /// Eye position.
    #[must_use]
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Heading around the vertical axis, in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation of the view, in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical velocity (units/s).
    #[must_use]
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Standing on the terrain after the last update.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Free flight enabled.
    #[must_use]
    pub fn is_noclip(&self) -> bool {
        self.noclip
    }

    /// Movement parameters.
    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Rotates the view by a mouse delta.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.config.mouse_sensitivity;
        self.pitch = clamp_pitch(self.pitch - dy * self.config.mouse_sensitivity);
    }

    /// Toggles free flight. Returns the new state.
    pub fn toggle_noclip(&mut self) -> bool {
        self.noclip = !self.noclip;
        info!(noclip = self.noclip, "Noclip toggled");
        self.noclip
    }

    /// Moves the eye to `position`, keeping the heading.
    pub fn teleport(&mut self, position: [f32; 3]) {
        self.position = position;
        self.vertical_velocity = 0.0;
        self.grounded = false;
        self.bob_timer = 0.0;
    }

    /// Shifts the eye horizontally (boundary push-back).
    pub fn nudge(&mut self, dx: f32, dz: f32) {
        self.position[0] += dx;
        self.position[2] += dz;
    }

    /// Advances the player by `dt` seconds over `ground`.
    pub fn update<H: HeightSource + ?Sized>(&mut self, intent: &MoveIntent, dt: f32, ground: &H) {
        let (speed, bob_amplitude) = self.speed_and_bob(intent);

        // Horizontal movement along the heading.
        let forward = [self.yaw.sin(), self.yaw.cos()];
        let right = [forward[1], -forward[0]];
        let mut dir = [0.0_f32; 2];
        let mut add = |v: [f32; 2], sign: f32| {
            dir[0] += v[0] * sign;
            dir[1] += v[1] * sign;
        };
        if intent.forward {
            add(forward, 1.0);
        }
        if intent.back {
            add(forward, -1.0);
        }
        if intent.right {
            add(right, 1.0);
        }
        if intent.left {
            add(right, -1.0);
        }

        let length = dir[0].hypot(dir[1]);
        if length > MOVE_EPSILON {
            self.position[0] += dir[0] / length * speed * dt;
            self.position[2] += dir[1] / length * speed * dt;

            self.bob_timer += dt * self.config.bob_frequency;
            self.position[1] += self.bob_timer.sin() * bob_amplitude;
        } else {
            self.bob_timer = 0.0;
        }

        // Gravity and ground snap.
        let desired = ground.height_at(self.position[0], self.position[2]) + self.config.eye_height;
        self.vertical_velocity -= self.config.gravity * dt;
        self.position[1] += self.vertical_velocity * dt;

        if self.position[1] <= desired {
            self.position[1] = desired;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        if self.noclip {
            self.vertical_velocity = 0.0;
            if intent.ascend {
                self.position[1] += speed * dt;
            }
            if intent.descend {
                self.position[1] -= speed * dt;
            }
        } else if intent.jump && self.grounded {
            self.vertical_velocity = self.config.jump_velocity;
            self.grounded = false;
        }
    }

    /// Unit view direction.
    #[must_use]
    pub fn look_direction(&self) -> [f32; 3] {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        [sy * cp, sp, cy * cp]
    }

    /// Point one unit ahead of the eye.
    #[must_use]
    pub fn target(&self) -> [f32; 3] {
        let d = self.look_direction();
        [
            self.position[0] + d[0],
            self.position[1] + d[1],
            self.position[2] + d[2],
        ]
    }

    /// Camera for this frame.
    #[must_use]
    pub fn camera(&self, fovy_degrees: f32) -> Camera {
        Camera::new(self.position, self.target(), fovy_degrees)
    }

    fn speed_and_bob(&self, intent: &MoveIntent) -> (f32, f32) {
        let c = &self.config;
        if intent.sprint {
            (c.sprint_speed, c.bob_amplitude_sprint)
        } else if intent.crouch {
            (c.crouch_speed, c.bob_amplitude * 0.5)
        } else {
            (c.walk_speed, c.bob_amplitude)
        }
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2 + PITCH_MARGIN, FRAC_PI_2 - PITCH_MARGIN)
}
