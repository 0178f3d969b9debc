//! Pac-Man himself: kinematics and procedural drawing.

use std::f64::consts::PI;

use tracing::trace;

use crate::clock::Clock;
use crate::constants::SpriteConfig;
use crate::error::GameResult;
use crate::render::RenderSurface;
use crate::vector::{Vector2D, Viewport};

/// The chasing sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    position: Vector2D,
    /// Pixels per second. Never changes after construction.
    speed: f64,
    /// Direction of travel in radians, counter-clockwise from the positive x-axis.
    angle: f64,
    /// Timestamp of the previous [`Sprite::update_position`] call, in milliseconds.
    last_update: Option<f64>,
    config: SpriteConfig,
}

impl Sprite {
    pub fn new(config: SpriteConfig, position: Vector2D) -> Self {
        Self {
            position,
            speed: config.speed,
            angle: config.initial_angle,
            last_update: None,
            config,
        }
    }

    pub fn config(&self) -> &SpriteConfig {
        &self.config
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn last_update(&self) -> Option<f64> {
        self.last_update
    }

    /// Pulls the sprite back inside a viewport that has just shrunk.
    pub fn clamp_to(&mut self, viewport: Viewport) {
        self.position = viewport.clamp(self.position);
    }

    /// Advances the sprite along `angle` to the moment `timestamp` (milliseconds).
    ///
    /// The first call only records the timestamp, since there is no previous frame to
    /// measure a step from. The result is always clamped into `viewport`.
    pub fn update_position(&mut self, angle: f64, timestamp: f64, viewport: Viewport) {
        self.angle = angle;

        if let Some(last_update) = self.last_update {
            let dt = (timestamp - last_update) / 1000.0;
            let step = Vector2D::new(angle.cos(), -angle.sin()) * self.speed * dt;
            self.position = viewport.clamp(self.position + step);
        }

        self.last_update = Some(timestamp);
    }

    /// Whether the direction of travel has a negative x-component.
    ///
    /// Straight up and straight down (`π/2`, `3π/2`) count as facing right.
    pub fn faces_leftward(&self) -> bool {
        self.angle > PI / 2.0 && self.angle < 3.0 * PI / 2.0
    }

    /// Position of the mouth cycle at `now_ms`, ramping `0 → half period → 0`.
    pub fn mouth_phase(&self, now_ms: f64) -> f64 {
        let half_period = self.config.mouth_period_ms / 2.0;
        (now_ms.rem_euclid(self.config.mouth_period_ms) - half_period).abs()
    }

    /// Half of the angle covered by the body arc at `now_ms`.
    ///
    /// Runs linearly from `mouth_min_half_angle` at phase 0 to `π` (a closed mouth) at
    /// the half period.
    pub fn mouth_half_angle(&self, now_ms: f64) -> f64 {
        let half_period = self.config.mouth_period_ms / 2.0;
        let min = self.config.mouth_min_half_angle;
        min + (PI - min) * self.mouth_phase(now_ms) / half_period
    }

    /// Redraws the sprite onto `surface` and moves the surface to the sprite's position.
    pub fn draw<S: RenderSurface, C: Clock + ?Sized>(&self, surface: &mut S, clock: &C) -> GameResult<()> {
        let half_angle = self.mouth_half_angle(clock.now_ms());
        trace!(
            x = self.position.x,
            y = self.position.y,
            half_angle,
            leftward = self.faces_leftward(),
            "Drawing sprite"
        );

        surface.clear();
        self.draw_body(surface, half_angle)?;
        self.draw_eye(surface)?;

        let (width, _) = surface.size();
        let half = width / 2.0;
        surface.translate_to(self.position - Vector2D::splat(half))
    }

    /// Centre of the body on the sprite's own surface.
    fn center(&self) -> Vector2D {
        Vector2D::splat(self.config.radius + 1.0)
    }

    fn draw_body<S: RenderSurface>(&self, surface: &mut S, half_angle: f64) -> GameResult<()> {
        let radius = self.config.radius;
        let center = self.center();
        // Where the upper (or lower, when mirrored) jaw meets the outline
        let jaw = Vector2D::new((PI - half_angle).cos(), (PI - half_angle).sin()) * radius;

        surface.begin_path();
        if self.faces_leftward() {
            surface.arc(center, radius, 2.0 * PI - half_angle, half_angle)?;
            surface.line_to(center);
            surface.line_to(center - jaw);
        } else {
            surface.arc(center, radius, PI - half_angle, PI + half_angle)?;
            surface.line_to(center);
            surface.line_to(center + jaw);
        }
        surface.close_path();

        surface.fill(self.config.body_color);
        surface.stroke(
            self.config.outline_color,
            self.config.outline_width,
            self.config.outline_miter_limit,
        );
        Ok(())
    }

    fn draw_eye<S: RenderSurface>(&self, surface: &mut S) -> GameResult<()> {
        let (dx, dy) = self.config.eye_offset;
        let dx = if self.faces_leftward() { -dx } else { dx };

        surface.begin_path();
        surface.arc(self.center() + Vector2D::new(dx, dy), self.config.eye_radius, 0.0, 2.0 * PI)?;
        surface.close_path();
        surface.fill(self.config.eye_color);
        Ok(())
    }
}
