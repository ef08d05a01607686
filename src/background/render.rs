use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, Window, window};

use super::{Aurora, Viewport};
use crate::dom;

/// Canvas-side half of the background: owns the 2D context and the scene.
pub struct BackgroundRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    aurora: Aurora,
}

impl BackgroundRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, aurora: Aurora) -> Self {
        let vp = aurora.viewport();
        canvas.set_width(vp.width as u32);
        canvas.set_height(vp.height as u32);
        Self { canvas, ctx, aurora }
    }

    pub fn aurora(&self) -> &Aurora {
        &self.aurora
    }

    /// Match the canvas backing store to `vp` without touching the clock.
    pub fn resize(&mut self, vp: Viewport) {
        self.canvas.set_width(vp.width as u32);
        self.canvas.set_height(vp.height as u32);
        self.aurora.resize(vp);
    }

    /// Clear, then paint each blob over the full canvas in order.
    pub fn draw_frame(&mut self) -> Result<(), JsValue> {
        let vp = self.aurora.viewport();
        // transparent clear so the page background shows through
        self.ctx.clear_rect(0.0, 0.0, vp.width, vp.height);
        for blob in self.aurora.frame() {
            let grd = self.ctx.create_radial_gradient(blob.x, blob.y, 0.0, blob.x, blob.y, blob.radius)?;
            grd.add_color_stop(0.0, &blob.inner)?;
            grd.add_color_stop(1.0, &blob.outer)?;
            self.ctx.set_fill_style(&grd);
            self.ctx.fill_rect(0.0, 0.0, vp.width, vp.height);
        }
        Ok(())
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Handle to the self-rescheduling `requestAnimationFrame` loop.
#[derive(Clone)]
pub struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// Start painting every display frame, and follow window resizes.
    pub fn start(win: &Window, renderer: BackgroundRenderer) -> Result<Self, JsValue> {
        let renderer = Rc::new(RefCell::new(renderer));

        {
            let renderer = renderer.clone();
            let resize_win = win.clone();
            dom::listen(win, "resize", move |_evt: Event| {
                if let Some((w, h)) = dom::inner_size(&resize_win) {
                    renderer.borrow_mut().resize(Viewport::new(w, h));
                }
            })?;
        }

        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));
        {
            let pending = pending.clone();
            let running = running.clone();
            *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
                pending.set(None);
                if !running.get() {
                    return;
                }
                if let Err(e) = renderer.borrow_mut().draw_frame() {
                    log::error!("background frame failed: {e:?}");
                }
                if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
                    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(Some(id)),
                        Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }

        if let Some(cb) = g.borrow().as_ref() {
            pending.set(Some(win.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }
        log::info!("aurora background started");
        Ok(Self { callback: g, pending, running })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Stop the loop and release the frame closure. Safe to call more than once.
    pub fn cancel(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(w)) = (self.pending.take(), window()) {
            if let Err(e) = w.cancel_animation_frame(id) {
                log::error!("cancelAnimationFrame failed: {e:?}");
            }
        }
        // breaks the closure's self-reference so it can be freed
        self.callback.borrow_mut().take();
        log::info!("aurora background stopped");
    }
}
