//! Scroll progress bar: fill width tracks how far the page has been scrolled.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, Window};

use crate::dom;

/// Percentage of the scrollable distance covered, clamped to `0..=100`.
///
/// When the page is no taller than the viewport there is nothing to scroll; the
/// denominator falls back to 1 so the result is 0 rather than NaN.
pub fn progress_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    let denom = if scrollable > 0.0 { scrollable } else { 1.0 };
    (scroll_y / denom * 100.0).clamp(0.0, 100.0)
}

/// CSS `width` value for a fill percentage.
pub fn width_style(pct: f64) -> String {
    format!("{pct}%")
}

/// Writes the progress percentage into the bar element.
#[derive(Clone)]
pub struct ProgressIndicator {
    window: Window,
    document: Document,
    bar: Option<HtmlElement>,
}

impl ProgressIndicator {
    pub fn new(window: Window, document: Document, bar: Option<HtmlElement>) -> Self {
        Self { window, document, bar }
    }

    /// Recompute from the live scroll position. No-op without a bar element.
    pub fn update(&self) {
        let Some(bar) = &self.bar else { return };
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let scroll_height = self
            .document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0);
        let viewport_height = dom::inner_size(&self.window).map(|(_, h)| h).unwrap_or(0.0);
        let pct = progress_percent(scroll_y, scroll_height, viewport_height);
        if let Err(e) = bar.style().set_property("width", &width_style(pct)) {
            log::error!("progress width update failed: {e:?}");
        }
    }
}

/// Hook the bar to `scroll` and `resize`, then paint the initial value.
pub fn install(window: &Window, indicator: ProgressIndicator) -> Result<(), JsValue> {
    for event in ["scroll", "resize"] {
        let indicator = indicator.clone();
        dom::listen(window, event, move |_evt: Event| indicator.update())?;
    }
    indicator.update();
    Ok(())
}
