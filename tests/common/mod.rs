#![allow(dead_code)]

use reverse_pacman::{
    clock::FixedClock,
    constants::ChaseConfig,
    game::Game,
    render::{RecordingMarker, RecordingSurface},
    sprite::Sprite,
    vector::{Vector2D, Viewport},
};

pub type TestGame = Game<RecordingSurface, RecordingMarker, FixedClock>;

pub const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

pub fn create_game(viewport: Viewport) -> TestGame {
    let config = ChaseConfig::DEFAULT;
    let size = config.sprite.surface_size();
    Game::new(
        config,
        RecordingSurface::new(size, size),
        RecordingMarker::default(),
        FixedClock::new(0.0),
        viewport,
    )
}

pub fn create_sprite(x: f64, y: f64) -> Sprite {
    Sprite::new(ChaseConfig::DEFAULT.sprite, Vector2D::new(x, y))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual} (diff {})",
        (actual - expected).abs()
    );
}

pub fn assert_vec_close(actual: Vector2D, expected: Vector2D) {
    assert_close(actual.x, expected.x);
    assert_close(actual.y, expected.y);
}
