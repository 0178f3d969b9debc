//! Browser runtime: owns the [`Game`], wires DOM events into it and carries out its effects.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, MouseEvent, TouchEvent, Window};

use crate::clock::SystemClock;
use crate::constants::{ChaseConfig, OPTIMIZED_RESIZE_EVENT};
use crate::error::{GameResult, PlatformError};
use crate::game::{apply_effects, Effects, Game, Host};
use crate::platform::{self, CanvasSurface, ElementMarker};
use crate::vector::Vector2D;

type Chase = Game<CanvasSurface, ElementMarker, SystemClock>;

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

/// Builds the chase from the page's canvas and pellet elements and starts listening.
pub fn run(canvas_id: &str, pellet_id: &str) -> GameResult<()> {
    let app = App::new(canvas_id, pellet_id)?;
    app.start()?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));
    Ok(())
}

pub struct App {
    window: Window,
    game: RefCell<Chase>,
    mouse_listener: RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>,
    touch_listener: RefCell<Option<Closure<dyn FnMut(TouchEvent)>>>,
    resize_listener: RefCell<Option<Closure<dyn FnMut()>>>,
    frame_callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl App {
    fn new(canvas_id: &str, pellet_id: &str) -> GameResult<Rc<Self>> {
        let window = platform::window()?;
        let document = platform::document(&window)?;
        let config = ChaseConfig::DEFAULT;

        let surface = CanvasSurface::from_id(&document, canvas_id, config.sprite.surface_size())?;
        let pellet = ElementMarker::from_id(&document, pellet_id)?;
        let viewport = platform::viewport(&window);
        debug!(canvas_id, pellet_id, "Found chase elements");

        let app = Rc::new(Self {
            game: RefCell::new(Game::new(config, surface, pellet, SystemClock, viewport)),
            window,
            mouse_listener: RefCell::new(None),
            touch_listener: RefCell::new(None),
            resize_listener: RefCell::new(None),
            frame_callback: RefCell::new(None),
        });
        app.install_callbacks();
        Ok(app)
    }

    /// Creates every DOM callback up front; each holds only a weak handle back to the app.
    fn install_callbacks(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        *self.mouse_listener.borrow_mut() = Some(Closure::new(move |event: MouseEvent| {
            let position = Vector2D::new(event.client_x() as f64, event.client_y() as f64);
            with_app(&weak, |app| {
                let effects = app.game.borrow_mut().on_pointer_move(position);
                app.apply(effects)
            });
        }));

        let weak = Rc::downgrade(self);
        *self.touch_listener.borrow_mut() = Some(Closure::new(move |event: TouchEvent| {
            event.prevent_default();
            let touches = event.touches();
            let points: Vec<Vector2D> = (0..touches.length())
                .filter_map(|i| touches.get(i))
                .map(|touch| Vector2D::new(touch.client_x() as f64, touch.client_y() as f64))
                .collect();
            with_app(&weak, |app| {
                let effects = app.game.borrow_mut().on_touch_move(&points);
                app.apply(effects)
            });
        }));

        let weak = Rc::downgrade(self);
        *self.resize_listener.borrow_mut() = Some(Closure::new(move || {
            with_app(&weak, |app| {
                let viewport = platform::viewport(&app.window);
                app.game.borrow_mut().on_resize(viewport);
                Ok(())
            });
        }));

        let weak = Rc::downgrade(self);
        *self.frame_callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            with_app(&weak, |app| {
                let effects = app.game.borrow_mut().frame(timestamp)?;
                app.apply(effects)
            });
        }));
    }

    fn start(self: &Rc<Self>) -> GameResult<()> {
        platform::throttle(&self.window, "resize", OPTIMIZED_RESIZE_EVENT)?;
        if let Some(listener) = self.resize_listener.borrow().as_ref() {
            self.window
                .add_event_listener_with_callback(OPTIMIZED_RESIZE_EVENT, listener.as_ref().unchecked_ref())
                .map_err(|e| listener_error("add", OPTIMIZED_RESIZE_EVENT, e))?;
        }

        let effects = self.game.borrow_mut().start();
        self.apply(effects)
    }

    fn apply(&self, effects: Effects) -> GameResult<()> {
        apply_effects(&mut &*self, effects)
    }

    fn add_input_listeners(&self) -> Result<(), PlatformError> {
        if let Some(listener) = self.mouse_listener.borrow().as_ref() {
            self.window
                .add_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref())
                .map_err(|e| listener_error("add", "mousemove", e))?;
        }

        if let Some(listener) = self.touch_listener.borrow().as_ref() {
            // Non-passive so the default scroll can be suppressed
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            self.window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    "touchmove",
                    listener.as_ref().unchecked_ref(),
                    &options,
                )
                .map_err(|e| listener_error("add", "touchmove", e))?;
        }

        debug!("Listening for pointer input");
        Ok(())
    }

    fn remove_input_listeners(&self) -> Result<(), PlatformError> {
        if let Some(listener) = self.mouse_listener.borrow().as_ref() {
            self.window
                .remove_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref())
                .map_err(|e| listener_error("remove", "mousemove", e))?;
        }

        if let Some(listener) = self.touch_listener.borrow().as_ref() {
            self.window
                .remove_event_listener_with_callback("touchmove", listener.as_ref().unchecked_ref())
                .map_err(|e| listener_error("remove", "touchmove", e))?;
        }

        debug!("Stopped listening for pointer input");
        Ok(())
    }
}

impl Host for &App {
    fn listen(&mut self) -> GameResult<()> {
        Ok(self.add_input_listeners()?)
    }

    fn unlisten(&mut self) -> GameResult<()> {
        Ok(self.remove_input_listeners()?)
    }

    fn request_frame(&mut self) -> GameResult<()> {
        if let Some(callback) = self.frame_callback.borrow().as_ref() {
            platform::request_animation_frame(&self.window, callback.as_ref().unchecked_ref())?;
        }
        Ok(())
    }

    fn navigate(&mut self, url: &str) -> GameResult<()> {
        Ok(platform::navigate(&self.window, url)?)
    }
}

/// Runs `f` if the app is still alive, logging any error it returns.
fn with_app(weak: &Weak<App>, f: impl FnOnce(&App) -> GameResult<()>) {
    let Some(app) = weak.upgrade() else {
        return;
    };
    if let Err(error) = f(&app) {
        error!("{error}");
    }
}

fn listener_error(action: &'static str, event: &str, error: JsValue) -> PlatformError {
    PlatformError::Listener {
        action,
        event: event.to_string(),
        reason: format!("{error:?}"),
    }
}
