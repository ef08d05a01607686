//! Startup capability probing and small DOM helpers shared by the page behaviors.

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::config::PageConfig;

/// Optional page features, resolved once at startup. Components branch on these
/// instead of probing again (or failing) later.
pub struct Capabilities {
    pub progress_bar: Option<HtmlElement>,
    pub canvas: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
    pub menu: Option<MenuElements>,
    pub intersection_observer: bool,
}

/// The mobile menu toggle button and the panel it collapses.
#[derive(Clone)]
pub struct MenuElements {
    pub toggle: Element,
    pub panel: Element,
}

impl Capabilities {
    /// Probe the document for every optional element and API. Each missing piece is
    /// reported once here; nothing is re-checked afterwards.
    pub fn probe(window: &Window, document: &Document, config: &PageConfig) -> Self {
        let progress_bar = document
            .get_element_by_id(&config.progress_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if progress_bar.is_none() {
            log::warn!("Progress element #{} missing", config.progress_id);
        }

        let canvas = probe_canvas(document, &config.canvas_id);
        if canvas.is_none() {
            log::warn!("Aurora canvas #{} not available; background will be static", config.canvas_id);
        }

        let menu = match (
            document.get_element_by_id(&config.menu_toggle_id),
            document.get_element_by_id(&config.menu_id),
        ) {
            (Some(toggle), Some(panel)) => Some(MenuElements { toggle, panel }),
            _ => {
                log::warn!(
                    "Mobile menu (#{} / #{}) missing; toggle disabled",
                    config.menu_toggle_id,
                    config.menu_id
                );
                None
            }
        };

        let intersection_observer =
            js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if !intersection_observer {
            log::warn!("IntersectionObserver unavailable; revealing all elements immediately");
        }

        Self { progress_bar, canvas, menu, intersection_observer }
    }
}

fn probe_canvas(document: &Document, id: &str) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas: HtmlCanvasElement = document.get_element_by_id(id)?.dyn_into().ok()?;
    let ctx = canvas.get_context("2d").ok()??.dyn_into::<CanvasRenderingContext2d>().ok()?;
    Some((canvas, ctx))
}

/// Collect every element matching `selector`. An invalid selector yields nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            log::error!("bad selector {selector:?}: {e:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Current window inner size in CSS pixels, or `None` if the browser refuses.
pub fn inner_size(window: &Window) -> Option<(f64, f64)> {
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some((w, h))
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
