//! One-shot fade-in reveals for elements as they scroll into view.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

/// Per-element reveal state. `Visible` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTransition {
    Revealed,
    /// Hidden, and not far enough on screen yet.
    Unchanged,
    /// Already visible; nothing left to watch.
    AlreadyVisible,
}

/// Threshold an element can actually reach. An element larger than the root
/// never has more than `root / target` of its area on screen; when that is below
/// the configured threshold any intersection counts, since the observer will not
/// report a later crossing for it. Sizes are `(width, height)`.
pub fn reachable_threshold(threshold: f64, root: (f64, f64), target: (f64, f64)) -> f64 {
    let axis = |r: f64, t: f64| if t > 0.0 && r > 0.0 { (r / t).min(1.0) } else { 1.0 };
    let max_ratio = axis(root.0, target.0) * axis(root.1, target.1);
    if max_ratio < threshold { 0.0 } else { threshold }
}

impl RevealState {
    /// Feed one intersection observation. Only a hidden element that is
    /// intersecting by at least `threshold` of its area reveals.
    pub fn on_intersection(&mut self, is_intersecting: bool, ratio: f64, threshold: f64) -> RevealTransition {
        // the observer reports ratios slightly under the configured threshold
        // at the crossing point, so allow a little slack
        const RATIO_SLACK: f64 = 1e-3;
        match self {
            Self::Hidden if is_intersecting && ratio + RATIO_SLACK >= threshold => {
                *self = Self::Visible;
                RevealTransition::Revealed
            }
            Self::Hidden => RevealTransition::Unchanged,
            Self::Visible => RevealTransition::AlreadyVisible,
        }
    }
}

/// Marks elements visible by adding a class.
pub struct Revealer {
    visible_class: String,
    threshold: f64,
}

impl Revealer {
    pub fn new(visible_class: impl Into<String>, threshold: f64) -> Self {
        Self { visible_class: visible_class.into(), threshold }
    }

    pub fn state_of(&self, el: &Element) -> RevealState {
        if el.class_list().contains(&self.visible_class) { RevealState::Visible } else { RevealState::Hidden }
    }

    pub fn mark_visible(&self, el: &Element) {
        if let Err(e) = el.class_list().add_1(&self.visible_class) {
            log::error!("reveal class update failed: {e:?}");
        }
    }

    /// Apply one observer entry; returns whether the element was just revealed.
    fn handle_entry(&self, entry: &IntersectionObserverEntry, observer: &IntersectionObserver) -> bool {
        let target = entry.target();
        let bounds = entry.bounding_client_rect();
        let root = match entry.root_bounds() {
            Some(rect) => (rect.width(), rect.height()),
            None => web_sys::window().as_ref().and_then(dom::inner_size).unwrap_or((0.0, 0.0)),
        };
        let threshold = reachable_threshold(self.threshold, root, (bounds.width(), bounds.height()));
        let mut state = self.state_of(&target);
        match state.on_intersection(entry.is_intersecting(), entry.intersection_ratio(), threshold) {
            RevealTransition::Revealed => {
                self.mark_visible(&target);
                observer.unobserve(&target);
                true
            }
            RevealTransition::AlreadyVisible => {
                observer.unobserve(&target);
                false
            }
            RevealTransition::Unchanged => false,
        }
    }
}

/// Observe `targets` and reveal each one once. Without `IntersectionObserver`
/// support every target is revealed immediately.
pub fn install(targets: Vec<Element>, revealer: Revealer, observer_available: bool) -> Result<(), JsValue> {
    if !observer_available {
        for el in &targets {
            revealer.mark_visible(el);
        }
        return Ok(());
    }

    let threshold = revealer.threshold;
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        let mut revealed = 0usize;
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                if revealer.handle_entry(&entry, &observer) {
                    revealed += 1;
                }
            }
        }
        if revealed > 0 {
            log::debug!("revealed {revealed} element(s)");
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for el in &targets {
        observer.observe(el);
    }
    log::debug!("observing {} reveal target(s)", targets.len());
    Ok(())
}
