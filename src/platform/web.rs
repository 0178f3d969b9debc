//! Browser platform implementation.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::{trace, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, CustomEvent, Document, EventTarget, HtmlCanvasElement, HtmlElement, Window};

use crate::error::{GameError, GameResult, PlatformError};
use crate::formatter::CustomFormatter;
use crate::render::{Color, PointerMarker, RenderSurface};
use crate::throttle::{Throttle, Trigger};
use crate::vector::{Vector2D, Viewport};

/// Installs a global subscriber writing to the browser console.
pub fn init_console() -> Result<(), PlatformError> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(|| ConsoleWriter)
                .with_ansi(false)
                .event_format(CustomFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))
}

/// A writer that outputs each formatted line through `console.log`
struct ConsoleWriter;

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(s) = std::str::from_utf8(buf) {
            web_sys::console::log_1(&JsValue::from_str(s.trim_end_matches('\n')));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, PlatformError> {
    window.document().ok_or(PlatformError::NoDocument)
}

/// The window's inner size.
pub fn viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

pub fn navigate(window: &Window, url: &str) -> Result<(), PlatformError> {
    window.location().set_href(url).map_err(|e| PlatformError::Navigation {
        url: url.to_string(),
        reason: format!("{e:?}"),
    })
}

pub fn request_animation_frame(window: &Window, callback: &js_sys::Function) -> Result<i32, PlatformError> {
    window
        .request_animation_frame(callback)
        .map_err(|e| PlatformError::AnimationFrame(format!("{e:?}")))
}

fn element_by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> GameResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| GameError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| GameError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

fn set_translation(element: &HtmlElement, offset: Vector2D) -> GameResult<()> {
    element
        .style()
        .set_property("transform", &format!("translate({}px, {}px)", offset.x, offset.y))
        .map_err(|e| GameError::RenderFailed(format!("{e:?}")))
}

/// A `<canvas>` and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks up the canvas `id` and resizes it to a `size` square.
    pub fn from_id(document: &Document, id: &str, size: f64) -> GameResult<Self> {
        let canvas: HtmlCanvasElement = element_by_id(document, id, "canvas")?;
        canvas.set_width(size as u32);
        canvas.set_height(size as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(GameError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::ContextUnavailable)?;

        Ok(Self { canvas, ctx })
    }
}

impl RenderSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(&mut self, center: Vector2D, radius: f64, start: f64, end: f64) -> GameResult<()> {
        self.ctx
            .arc(center.x, center.y, radius, start, end)
            .map_err(|e| GameError::RenderFailed(format!("{e:?}")))
    }

    fn line_to(&mut self, point: Vector2D) {
        self.ctx.line_to(point.x, point.y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
    }

    fn stroke(&mut self, color: Color, width: f64, miter_limit: f64) {
        self.ctx.set_line_width(width);
        self.ctx.set_miter_limit(miter_limit);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.stroke();
    }

    fn translate_to(&mut self, offset: Vector2D) -> GameResult<()> {
        set_translation(&self.canvas, offset)
    }
}

/// Any positioned element, moved with a CSS transform.
pub struct ElementMarker {
    element: HtmlElement,
}

impl ElementMarker {
    pub fn from_id(document: &Document, id: &str) -> GameResult<Self> {
        Ok(Self {
            element: element_by_id(document, id, "HTML element")?,
        })
    }
}

impl PointerMarker for ElementMarker {
    fn translate_to(&mut self, offset: Vector2D) -> GameResult<()> {
        set_translation(&self.element, offset)
    }
}

/// Republishes `event` on `target` as the custom event `name`, at most once per frame.
pub fn throttle(target: &EventTarget, event: &str, name: &str) -> Result<(), PlatformError> {
    let state = Rc::new(RefCell::new(Throttle::new()));
    let dispatch_target = target.clone();
    let name = name.to_string();

    let listener = Closure::<dyn FnMut()>::new(move || {
        if state.borrow_mut().trigger() == Trigger::Coalesced {
            return;
        }

        let pending = state.clone();
        let target = dispatch_target.clone();
        let name = name.clone();
        let publish = Closure::once_into_js(move || {
            if !pending.borrow_mut().flush() {
                return;
            }
            {
                let counts = pending.borrow();
                trace!(received = counts.received(), published = counts.published(), "Republishing `{name}`");
            }
            match CustomEvent::new(&name) {
                Ok(event) => {
                    if let Err(e) = target.dispatch_event(&event) {
                        warn!("Failed to dispatch `{name}`: {e:?}");
                    }
                }
                Err(e) => warn!("Failed to create `{name}`: {e:?}"),
            }
        });

        let scheduled = window().and_then(|window| request_animation_frame(&window, publish.unchecked_ref()));
        if let Err(error) = scheduled {
            warn!("Throttled event could not be scheduled: {error}");
            state.borrow_mut().flush();
        }
    });

    target
        .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        .map_err(|e| PlatformError::Listener {
            action: "add",
            event: event.to_string(),
            reason: format!("{e:?}"),
        })?;
    // Lives as long as the page
    listener.forget();
    Ok(())
}
