use std::f64::consts::PI;

use pretty_assertions::assert_eq;
use reverse_pacman::{
    clock::FixedClock,
    constants::SpriteConfig,
    render::{Color, DrawCommand, RecordingSurface},
    sprite::Sprite,
    vector::{Vector2D, Viewport},
};
use speculoos::prelude::*;

mod common;

use common::{assert_close, assert_vec_close, create_sprite, VIEWPORT};

#[test]
fn test_new_sprite_uses_config() {
    let sprite = create_sprite(800.0, 600.0);

    assert_eq!(sprite.position(), Vector2D::new(800.0, 600.0));
    assert_that(&sprite.speed()).is_equal_to(50.0);
    assert_close(sprite.angle(), PI * 3.0 / 4.0);
    assert_that(&sprite.last_update()).is_none();
}

#[test]
fn test_first_update_only_records_timestamp() {
    let mut sprite = create_sprite(100.0, 100.0);
    sprite.update_position(0.0, 123_456.0, VIEWPORT);

    assert_eq!(sprite.position(), Vector2D::new(100.0, 100.0));
    assert_eq!(sprite.last_update(), Some(123_456.0));
    assert_that(&sprite.angle()).is_equal_to(0.0);
}

#[test]
fn test_update_moves_along_angle() {
    let mut sprite = create_sprite(400.0, 300.0);
    sprite.update_position(0.0, 1000.0, VIEWPORT);
    sprite.update_position(0.0, 2000.0, VIEWPORT);
    assert_vec_close(sprite.position(), Vector2D::new(450.0, 300.0));

    // Screen y grows downwards, so a positive angle moves up
    sprite.update_position(PI / 2.0, 2500.0, VIEWPORT);
    assert_vec_close(sprite.position(), Vector2D::new(450.0, 275.0));
    assert_eq!(sprite.last_update(), Some(2500.0));
}

#[test]
fn test_update_step_matches_euler_integration() {
    let angle = 0.7;
    let mut sprite = create_sprite(400.0, 300.0);
    sprite.update_position(angle, 10_000.0, VIEWPORT);
    sprite.update_position(angle, 10_300.0, VIEWPORT);

    let dt = 0.3;
    let expected = Vector2D::new(400.0 + angle.cos() * 50.0 * dt, 300.0 - angle.sin() * 50.0 * dt);
    assert_vec_close(sprite.position(), expected);
}

#[test]
fn test_update_clamps_to_viewport_edges() {
    let mut sprite = create_sprite(10.0, 10.0);
    sprite.update_position(PI, 0.0, VIEWPORT);
    sprite.update_position(PI, 1000.0, VIEWPORT);
    assert_that(&sprite.position().x).is_equal_to(0.0);

    sprite.update_position(PI / 2.0, 2000.0, VIEWPORT);
    assert_that(&sprite.position().y).is_equal_to(0.0);
    assert_close(sprite.position().x, 0.0);

    let mut sprite = create_sprite(790.0, 590.0);
    sprite.update_position(7.0 * PI / 4.0, 0.0, VIEWPORT);
    sprite.update_position(7.0 * PI / 4.0, 100_000.0, VIEWPORT);
    assert_eq!(sprite.position(), Vector2D::new(800.0, 600.0));
}

#[test]
fn test_update_never_leaves_viewport() {
    let viewport = Viewport::new(320.0, 240.0);
    let angles = [0.0, 0.4, PI / 2.0, 2.0, PI, 4.0, 3.0 * PI / 2.0, 5.9];
    let steps = [1.0, 16.0, 1000.0, 1e7];

    for &angle in &angles {
        for &step in &steps {
            let mut sprite = create_sprite(160.0, 120.0);
            sprite.update_position(angle, 0.0, viewport);
            sprite.update_position(angle, step, viewport);
            sprite.update_position(angle, 2.0 * step, viewport);

            assert!(
                viewport.contains(sprite.position()),
                "angle {angle} step {step} left the viewport at {:?}",
                sprite.position()
            );
        }
    }
}

#[test]
fn test_speed_is_constant() {
    let mut sprite = create_sprite(400.0, 300.0);
    for (i, angle) in [0.1, 2.0, 4.0, 6.0].into_iter().enumerate() {
        sprite.update_position(angle, i as f64 * 100.0, VIEWPORT);
    }
    assert_that(&sprite.speed()).is_equal_to(50.0);
}

#[test]
fn test_clamp_to_shrunk_viewport() {
    let mut sprite = create_sprite(800.0, 600.0);
    sprite.clamp_to(Viewport::new(400.0, 300.0));
    assert_eq!(sprite.position(), Vector2D::new(400.0, 300.0));

    sprite.clamp_to(VIEWPORT);
    assert_eq!(sprite.position(), Vector2D::new(400.0, 300.0));
}

#[test]
fn test_faces_leftward() {
    let mut sprite = create_sprite(0.0, 0.0);
    // Same timestamp every time, so only the heading changes
    let mut faces = |angle: f64| {
        sprite.update_position(angle, 0.0, VIEWPORT);
        sprite.faces_leftward()
    };

    assert_that(&faces(PI)).is_true();
    assert_that(&faces(PI * 3.0 / 4.0)).is_true();
    assert_that(&faces(PI / 2.0 + 1e-9)).is_true();
    assert_that(&faces(3.0 * PI / 2.0 - 1e-9)).is_true();

    assert_that(&faces(PI / 2.0)).is_false();
    assert_that(&faces(3.0 * PI / 2.0)).is_false();
    assert_that(&faces(0.0)).is_false();
    assert_that(&faces(2.0 * PI)).is_false();
    assert_that(&faces(7.0 * PI / 4.0)).is_false();
}

#[test]
fn test_mouth_half_angle_endpoints() {
    let sprite = create_sprite(0.0, 0.0);

    // Phase 0 is the widest mouth
    assert_that(&sprite.mouth_phase(250.0)).is_equal_to(0.0);
    assert_that(&sprite.mouth_half_angle(250.0)).is_equal_to(2.6);
    assert_that(&sprite.mouth_half_angle(1_700_000_000_750.0)).is_equal_to(2.6);

    // A half period later the arc wraps the whole circle
    assert_that(&sprite.mouth_phase(0.0)).is_equal_to(250.0);
    assert_close(sprite.mouth_half_angle(0.0), PI);
    assert_close(sprite.mouth_half_angle(500.0), PI);

    assert_close(sprite.mouth_half_angle(125.0), 2.6 + (PI - 2.6) / 2.0);
    assert_close(sprite.mouth_half_angle(375.0), 2.6 + (PI - 2.6) / 2.0);
}

#[test]
fn test_mouth_half_angle_ramps_monotonically() {
    let sprite = create_sprite(0.0, 0.0);

    let opening: Vec<f64> = (0..=250).map(|ms| sprite.mouth_half_angle(ms as f64)).collect();
    assert!(opening.windows(2).all(|w| w[1] <= w[0]));

    let closing: Vec<f64> = (250..=500).map(|ms| sprite.mouth_half_angle(ms as f64)).collect();
    assert!(closing.windows(2).all(|w| w[1] >= w[0]));

    for half_angle in opening.iter().chain(&closing) {
        assert_that(half_angle).is_greater_than_or_equal_to(2.6);
        assert!(*half_angle <= PI + 1e-12);
    }
}

#[test]
fn test_draw_facing_right() {
    let config = SpriteConfig::DEFAULT;
    let size = config.surface_size();
    let mut surface = RecordingSurface::new(size, size);
    let clock = FixedClock::new(250.0);

    let mut sprite = create_sprite(400.0, 300.0);
    sprite.update_position(0.0, 0.0, VIEWPORT);
    sprite.draw(&mut surface, &clock).unwrap();

    let center = Vector2D::new(16.5, 16.5);
    let jaw = Vector2D::new((PI - 2.6).cos(), (PI - 2.6).sin()) * 15.5;
    assert_eq!(
        surface.commands(),
        &[
            DrawCommand::Clear,
            DrawCommand::BeginPath,
            DrawCommand::Arc {
                center,
                radius: 15.5,
                start: PI - 2.6,
                end: PI + 2.6,
            },
            DrawCommand::LineTo(center),
            DrawCommand::LineTo(center + jaw),
            DrawCommand::ClosePath,
            DrawCommand::Fill(Color::rgb(0xDD, 0xFF, 0x00)),
            DrawCommand::Stroke {
                color: Color::BLACK,
                width: 2.0,
                miter_limit: 2.0,
            },
            DrawCommand::BeginPath,
            DrawCommand::Arc {
                center: Vector2D::new(22.5, 8.5),
                radius: 2.0,
                start: 0.0,
                end: 2.0 * PI,
            },
            DrawCommand::ClosePath,
            DrawCommand::Fill(Color::BLACK),
            DrawCommand::Translate(Vector2D::new(383.5, 283.5)),
        ]
    );
}

#[test]
fn test_draw_facing_left_mirrors_mouth_and_eye() {
    let config = SpriteConfig::DEFAULT;
    let size = config.surface_size();
    let mut surface = RecordingSurface::new(size, size);
    let clock = FixedClock::new(250.0);

    let mut sprite = create_sprite(50.0, 60.0);
    sprite.update_position(PI, 0.0, VIEWPORT);
    sprite.draw(&mut surface, &clock).unwrap();

    let commands = surface.commands();
    assert_eq!(
        commands[2],
        DrawCommand::Arc {
            center: Vector2D::new(16.5, 16.5),
            radius: 15.5,
            start: 2.0 * PI - 2.6,
            end: 2.6,
        }
    );
    match commands[4] {
        DrawCommand::LineTo(point) => {
            assert_vec_close(point, Vector2D::new(16.5 + 2.6f64.cos() * 15.5, 16.5 - 2.6f64.sin() * 15.5))
        }
        ref other => panic!("expected the jaw line, got {other:?}"),
    }
    match commands[9] {
        DrawCommand::Arc { center, radius, .. } => {
            assert_eq!(center, Vector2D::new(10.5, 8.5));
            assert_that(&radius).is_equal_to(2.0);
        }
        ref other => panic!("expected the eye, got {other:?}"),
    }
    assert_eq!(surface.last_offset(), Some(Vector2D::new(33.5, 43.5)));
}

#[test]
fn test_draw_reads_the_clock_not_the_frame_timestamp() {
    let size = SpriteConfig::DEFAULT.surface_size();
    let mut surface = RecordingSurface::new(size, size);
    let clock = FixedClock::new(250.0);

    let mut sprite = create_sprite(400.0, 300.0);
    sprite.update_position(0.0, 0.0, VIEWPORT);
    sprite.draw(&mut surface, &clock).unwrap();
    let wide_open = surface.take();

    // Same wall clock, same mouth
    sprite.update_position(0.0, 0.0, VIEWPORT);
    sprite.draw(&mut surface, &clock).unwrap();
    assert_eq!(surface.take(), wide_open);

    clock.advance(250.0);
    sprite.draw(&mut surface, &clock).unwrap();
    match surface.commands()[2] {
        DrawCommand::Arc { start, end, .. } => {
            assert_close(start, 0.0);
            assert_close(end, 2.0 * PI);
        }
        ref other => panic!("expected the body arc, got {other:?}"),
    }
}
