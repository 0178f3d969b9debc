//! The chase controller.
//!
//! [`Game`] owns all mutable state and never talks to the host directly. Every entry
//! point hands back the [`Effect`]s the host must carry out, which keeps the whole
//! loop drivable from tests.

use std::f64::consts::PI;

use smallvec::{smallvec, SmallVec};
use strum_macros::Display;
use tracing::{debug, info, trace, warn};

use crate::clock::Clock;
use crate::constants::ChaseConfig;
use crate::error::GameResult;
use crate::formatter;
use crate::render::{PointerMarker, RenderSurface};
use crate::sprite::Sprite;
use crate::vector::{difference, magnitude, Vector2D, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChaseState {
    /// Following the pointer.
    Running,
    /// The pointer was caught. Terminal.
    Terminated,
}

/// A side effect the host must perform on behalf of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Begin delivering pointer-move and touch-move events.
    StartListening,
    /// Run [`Game::frame`] before the next repaint.
    RequestFrame,
    /// Stop delivering pointer-move and touch-move events.
    StopListening,
    /// Send the browsing context to this URL.
    Navigate(&'static str),
}

pub type Effects = SmallVec<[Effect; 2]>;

/// Whatever carries out [`Effect`]s: the browser in production, a recorder in tests.
pub trait Host {
    fn listen(&mut self) -> GameResult<()>;

    fn unlisten(&mut self) -> GameResult<()>;

    fn request_frame(&mut self) -> GameResult<()>;

    fn navigate(&mut self, url: &str) -> GameResult<()>;
}

/// Performs `effects` on `host`, in order.
///
/// A listener that cannot be removed is only logged, so the navigation queued behind it
/// still happens.
pub fn apply_effects<H: Host + ?Sized>(host: &mut H, effects: Effects) -> GameResult<()> {
    for effect in effects {
        match effect {
            Effect::StartListening => host.listen()?,
            Effect::RequestFrame => host.request_frame()?,
            Effect::StopListening => {
                if let Err(error) = host.unlisten() {
                    warn!("Failed to stop listening for input: {error}");
                }
            }
            Effect::Navigate(url) => {
                info!(url, "Navigating away");
                host.navigate(url)?;
            }
        }
    }
    Ok(())
}

pub struct Game<S, M, C> {
    config: ChaseConfig,
    /// Last known pointer position. Written by input handlers, read by `frame`.
    pointer: Vector2D,
    sprite: Sprite,
    surface: S,
    pellet: M,
    clock: C,
    viewport: Viewport,
    state: ChaseState,
    listening: bool,
    frame_pending: bool,
}

impl<S, M, C> Game<S, M, C>
where
    S: RenderSurface,
    M: PointerMarker,
    C: Clock,
{
    /// Creates the controller with the sprite waiting in the bottom-right corner of `viewport`.
    pub fn new(config: ChaseConfig, surface: S, pellet: M, clock: C, viewport: Viewport) -> Self {
        Self {
            config,
            pointer: Vector2D::ZERO,
            sprite: Sprite::new(config.sprite, viewport.corner()),
            surface,
            pellet,
            clock,
            viewport,
            state: ChaseState::Running,
            listening: false,
            frame_pending: false,
        }
    }

    /// Asks the host for pointer and touch input.
    pub fn start(&mut self) -> Effects {
        if self.state == ChaseState::Terminated || self.listening {
            return Effects::new();
        }

        info!(
            width = self.viewport.width,
            height = self.viewport.height,
            "Starting chase"
        );
        self.listening = true;
        smallvec![Effect::StartListening]
    }

    pub fn on_pointer_move(&mut self, position: Vector2D) -> Effects {
        if self.state == ChaseState::Terminated {
            return Effects::new();
        }

        self.pointer = position;
        self.request_frame()
    }

    /// Follows the first active touch point. A touch event without any is ignored.
    pub fn on_touch_move(&mut self, touches: &[Vector2D]) -> Effects {
        let Some(&first) = touches.first() else {
            trace!("Touch move without any active touches, ignoring");
            return Effects::new();
        };
        self.on_pointer_move(first)
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "Viewport resized");
        self.viewport = viewport;
        self.sprite.clamp_to(viewport);
    }

    /// Advances and redraws one frame, or ends the chase once the pointer is caught.
    pub fn frame(&mut self, timestamp: f64) -> GameResult<Effects> {
        if self.state == ChaseState::Terminated {
            return Ok(Effects::new());
        }

        self.frame_pending = false;
        formatter::increment_frame();

        // Points from the pointer to the sprite
        let delta = difference(self.pointer, self.sprite.position());
        let distance = magnitude(delta);

        if distance < self.config.termination_distance {
            self.state = ChaseState::Terminated;
            info!(
                x = self.pointer.x,
                y = self.pointer.y,
                state = %self.state,
                url = self.config.redirect_url,
                "Pointer caught"
            );
            self.listening = false;
            return Ok(smallvec![
                Effect::StopListening,
                Effect::Navigate(self.config.redirect_url)
            ]);
        }

        self.pellet
            .translate_to(self.pointer - Vector2D::splat(self.config.pellet_half_size))?;

        // Flipping the bearing by π turns it from "away from the pointer" to "towards it"
        let angle = (-delta.y).atan2(delta.x) + PI;
        trace!(timestamp, distance, angle, "Frame");
        self.sprite.update_position(angle, timestamp, self.viewport);
        self.sprite.draw(&mut self.surface, &self.clock)?;

        self.frame_pending = true;
        Ok(smallvec![Effect::RequestFrame])
    }

    fn request_frame(&mut self) -> Effects {
        if self.frame_pending {
            return Effects::new();
        }

        self.frame_pending = true;
        smallvec![Effect::RequestFrame]
    }

    pub fn state(&self) -> ChaseState {
        self.state
    }

    pub fn pointer(&self) -> Vector2D {
        self.pointer
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pellet(&self) -> &M {
        &self.pellet
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }
}
