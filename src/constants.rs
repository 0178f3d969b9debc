//! This module contains all the constants used in the chase.

use std::f64::consts::PI;

use crate::render::Color;

/// The `id` of the canvas element Pac-Man is drawn into.
pub const CANVAS_ID: &str = "pacman";
/// The `id` of the pellet element that follows the pointer.
pub const PELLET_ID: &str = "pellet";

/// The name of the throttled resize event republished on the window.
pub const OPTIMIZED_RESIZE_EVENT: &str = "optimizedResize";

/// Where the browser is sent once Pac-Man catches the pointer.
pub const REDIRECT_URL: &str = "http://google.com/#q=why+am+i+such+a+loser";

/// Everything that shapes how the sprite moves and looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteConfig {
    /// Radius of the body, in pixels.
    pub radius: f64,
    /// Speed, in pixels per second.
    pub speed: f64,
    /// Heading before the first frame. 0 points along the positive x-axis.
    pub initial_angle: f64,
    /// Length of one full open/close cycle of the mouth, in milliseconds.
    pub mouth_period_ms: f64,
    /// Half-angle of the body arc when the mouth is at its widest.
    pub mouth_min_half_angle: f64,
    pub body_color: Color,
    pub outline_color: Color,
    pub outline_width: f64,
    pub outline_miter_limit: f64,
    pub eye_color: Color,
    pub eye_radius: f64,
    /// Offset of the eye from the body centre; x is mirrored by facing.
    pub eye_offset: (f64, f64),
}

impl SpriteConfig {
    pub const DEFAULT: SpriteConfig = SpriteConfig {
        radius: 15.5,
        speed: 50.0,
        initial_angle: PI * 3.0 / 4.0,
        mouth_period_ms: 500.0,
        mouth_min_half_angle: 2.6,
        body_color: Color::rgb(0xDD, 0xFF, 0x00),
        outline_color: Color::BLACK,
        outline_width: 2.0,
        outline_miter_limit: 2.0,
        eye_color: Color::BLACK,
        eye_radius: 2.0,
        eye_offset: (6.0, -8.0),
    };

    /// The side length of the square surface the sprite is drawn on.
    ///
    /// One extra pixel on each side leaves room for the outline.
    pub fn surface_size(&self) -> f64 {
        2.0 * self.radius + 2.0
    }
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseConfig {
    pub sprite: SpriteConfig,
    /// The chase ends once the sprite is closer than this to the pointer, in pixels.
    pub termination_distance: f64,
    /// Half the side length of the pellet element; used to centre it on the pointer.
    pub pellet_half_size: f64,
    pub redirect_url: &'static str,
}

impl ChaseConfig {
    pub const DEFAULT: ChaseConfig = ChaseConfig {
        sprite: SpriteConfig::DEFAULT,
        termination_distance: 2.0,
        pellet_half_size: 8.0,
        redirect_url: REDIRECT_URL,
    };
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
