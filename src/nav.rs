//! Navigation: smooth-scroll buttons (`data-target`) and the mobile menu toggle.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::config::PageConfig;
use crate::dom::{self, MenuElements};

/// Visual state of the collapsible mobile menu panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuVisibility {
    Expanded,
    Collapsed,
}

impl MenuVisibility {
    /// Collapsed is expressed in markup by the panel carrying the hidden class.
    pub fn from_hidden_flag(hidden: bool) -> Self {
        if hidden { Self::Collapsed } else { Self::Expanded }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    pub fn is_hidden(self) -> bool {
        self == Self::Collapsed
    }
}

/// Keys that activate a focused nav button, matching native button behavior.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Whether a `keyup` should be turned into a `click()`. Native `<button>`s already
/// click on Enter/Space themselves, so they are left alone.
pub fn needs_synthetic_click(key: &str, is_native_button: bool) -> bool {
    !is_native_button && is_activation_key(key)
}

/// Mobile menu panel bound to its hidden class.
#[derive(Clone)]
pub struct Menu {
    panel: Element,
    hidden_class: String,
}

impl Menu {
    pub fn new(panel: Element, hidden_class: impl Into<String>) -> Self {
        Self { panel, hidden_class: hidden_class.into() }
    }

    pub fn visibility(&self) -> MenuVisibility {
        MenuVisibility::from_hidden_flag(self.panel.class_list().contains(&self.hidden_class))
    }

    pub fn set_visibility(&self, vis: MenuVisibility) {
        let classes = self.panel.class_list();
        let res = if vis.is_hidden() {
            classes.add_1(&self.hidden_class)
        } else {
            classes.remove_1(&self.hidden_class)
        };
        if let Err(e) = res {
            log::error!("menu class update failed: {e:?}");
        }
    }

    pub fn toggle(&self) -> MenuVisibility {
        let next = self.visibility().toggled();
        self.set_visibility(next);
        next
    }

    /// Collapse if currently expanded; returns whether anything changed.
    pub fn collapse(&self) -> bool {
        if self.visibility() == MenuVisibility::Expanded {
            self.set_visibility(MenuVisibility::Collapsed);
            true
        } else {
            false
        }
    }
}

/// Scroll the element with `target_id` to the top of the viewport and collapse the
/// mobile menu. Returns `false` (and skips the scroll) when no such element exists.
pub fn activate(document: &Document, target_id: &str, menu: Option<&Menu>) -> bool {
    let found = match document.get_element_by_id(target_id) {
        Some(el) => {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Start);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
            true
        }
        None => {
            log::debug!("nav target #{target_id} not found");
            false
        }
    };
    if let Some(menu) = menu {
        menu.collapse();
    }
    found
}

/// Turn on smooth scrolling for the whole document.
pub fn enable_smooth_scroll(document: &Document) {
    let Some(root) = document.document_element().and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
        return;
    };
    if let Err(e) = root.style().set_property("scroll-behavior", "smooth") {
        log::error!("could not enable smooth scrolling: {e:?}");
    }
}

/// Wire the menu toggle and every nav button.
pub fn install(document: &Document, config: &PageConfig, menu_elements: Option<MenuElements>) -> Result<(), JsValue> {
    enable_smooth_scroll(document);

    let menu = menu_elements.map(|m| {
        let menu = Menu::new(m.panel, config.hidden_class.clone());
        (m.toggle, menu)
    });

    if let Some((toggle, menu)) = &menu {
        let menu = menu.clone();
        dom::listen(toggle, "click", move |_evt: MouseEvent| {
            let vis = menu.toggle();
            log::debug!("mobile menu now {vis:?}");
        })?;
    }
    let menu = menu.map(|(_, menu)| menu);

    let buttons = dom::query_all(document, &config.nav_selector);
    log::debug!("wiring {} nav buttons", buttons.len());
    for button in buttons {
        let Some(target_id) = button.get_attribute(&config.nav_target_attr) else {
            continue;
        };
        {
            let document = document.clone();
            let menu = menu.clone();
            dom::listen(&button, "click", move |_evt: MouseEvent| {
                activate(&document, &target_id, menu.as_ref());
            })?;
        }

        // Keyboard access: focusable, and Enter/Space go through the click path.
        if let Err(e) = button.set_attribute("tabindex", "0") {
            log::error!("tabindex update failed: {e:?}");
        }
        if let Some(html_button) = button.dyn_ref::<HtmlElement>().cloned() {
            let native = button.is_instance_of::<HtmlButtonElement>();
            dom::listen(&button, "keyup", move |evt: KeyboardEvent| {
                if needs_synthetic_click(&evt.key(), native) {
                    html_button.click();
                }
            })?;
        }
    }
    Ok(())
}
