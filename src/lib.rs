//! Aurora page enhancements.
//!
//! Four independent behaviors wired onto a static page at startup: a scroll
//! progress bar, smooth-scroll navigation with a collapsible mobile menu,
//! one-shot fade-in reveals, and an animated "aurora mist" canvas background.
//! Every missing element or browser capability is logged once and the matching
//! behavior is skipped; nothing here is fatal to the page.

use wasm_bindgen::prelude::*;

pub mod background;
pub mod config;
pub mod dom;
pub mod nav;
pub mod progress;
pub mod reveal;

use background::{Aurora, BackgroundRenderer, FrameLoop, Viewport};
use config::PageConfig;
use dom::Capabilities;
use progress::ProgressIndicator;
use reveal::Revealer;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Handle returned to JS once the page is wired. Dropping it on the JS side does
/// not stop anything; listeners live as long as the page.
#[wasm_bindgen]
pub struct Page {
    background: Option<FrameLoop>,
}

#[wasm_bindgen]
impl Page {
    /// Stop the background animation. The last painted frame stays on the canvas.
    pub fn stop_background(&self) {
        if let Some(frames) = &self.background {
            frames.cancel();
        }
    }

    pub fn background_running(&self) -> bool {
        self.background.as_ref().is_some_and(FrameLoop::is_running)
    }
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Wire the page using the stock markup ids and tuning.
#[wasm_bindgen]
pub fn start_page() -> Result<Page, JsValue> {
    start_with(PageConfig::default())
}

/// Like `start_page`, with a JSON config; unspecified fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<Page, JsValue> {
    start_with(PageConfig::from_json(json)?)
}

pub fn start_with(config: PageConfig) -> Result<Page, JsValue> {
    config.validate()?;
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let caps = Capabilities::probe(&win, &doc, &config);

    progress::install(&win, ProgressIndicator::new(win.clone(), doc.clone(), caps.progress_bar))?;
    nav::install(&doc, &config, caps.menu)?;
    reveal::install(
        dom::query_all(&doc, &config.reveal_selector),
        Revealer::new(config.visible_class.clone(), config.reveal_threshold),
        caps.intersection_observer,
    )?;

    let background = match caps.canvas {
        Some((canvas, ctx)) => {
            let (w, h) = dom::inner_size(&win).unwrap_or((0.0, 0.0));
            let aurora = Aurora::new(config.blobs.clone(), config.clock_step, Viewport::new(w, h));
            Some(FrameLoop::start(&win, BackgroundRenderer::new(canvas, ctx, aurora))?)
        }
        None => None,
    };

    log::info!("page enhancements ready");
    Ok(Page { background })
}
