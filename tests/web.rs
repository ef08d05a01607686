#![cfg(target_arch = "wasm32")]

use aurora_page::config::PageConfig;
use aurora_page::dom::MenuElements;
use aurora_page::nav::{self, Menu, MenuVisibility};
use aurora_page::progress::ProgressIndicator;
use aurora_page::reveal::{self, Revealer};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append(tag: &str, id: &str) -> Element {
    let doc = document();
    let el = doc.create_element(tag).unwrap();
    el.set_id(id);
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

fn keyup(el: &Element, key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    let evt = KeyboardEvent::new_with_keyboard_event_init_dict("keyup", &init).unwrap();
    el.dispatch_event(&evt).unwrap();
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

// Pinned to the top-left corner so it is on screen regardless of page length.
fn pinned(id: &str, height_px: f64) -> Element {
    let el = append("div", id);
    el.set_attribute("style", &format!("position:fixed; top:0; left:0; width:100px; height:{height_px}px;"))
        .unwrap();
    el
}

#[wasm_bindgen_test]
fn progress_writes_width() {
    let win = web_sys::window().unwrap();
    let bar: HtmlElement = append("div", "test-progress").dyn_into().unwrap();
    let indicator = ProgressIndicator::new(win, document(), Some(bar.clone()));
    indicator.update();
    let width = bar.style().get_property_value("width").unwrap();
    assert!(width.ends_with('%'), "width={width}");
}

#[wasm_bindgen_test]
fn progress_without_bar_is_noop() {
    let win = web_sys::window().unwrap();
    ProgressIndicator::new(win, document(), None).update();
}

#[wasm_bindgen_test]
fn menu_toggle_round_trips() {
    let panel = append("nav", "test-menu");
    panel.class_list().add_1("hidden").unwrap();
    let menu = Menu::new(panel.clone(), "hidden");
    assert_eq!(menu.visibility(), MenuVisibility::Collapsed);
    assert_eq!(menu.toggle(), MenuVisibility::Expanded);
    assert!(!panel.class_list().contains("hidden"));
    assert_eq!(menu.toggle(), MenuVisibility::Collapsed);
    assert!(panel.class_list().contains("hidden"));
}

#[wasm_bindgen_test]
fn nav_activation_collapses_menu_and_skips_missing_target() {
    let doc = document();
    append("section", "test-target");
    let menu = Menu::new(append("nav", "test-menu-2"), "hidden");
    assert_eq!(menu.visibility(), MenuVisibility::Expanded);

    assert!(nav::activate(&doc, "test-target", Some(&menu)));
    assert_eq!(menu.visibility(), MenuVisibility::Collapsed);

    assert!(!nav::activate(&doc, "does-not-exist", Some(&menu)));
    assert_eq!(menu.visibility(), MenuVisibility::Collapsed);
}

#[wasm_bindgen_test]
fn reveal_fallback_marks_everything_visible() {
    let a = append("div", "test-reveal-a");
    let b = append("div", "test-reveal-b");
    reveal::install(vec![a.clone(), b.clone()], Revealer::new("visible", 0.12), false).unwrap();
    assert!(a.class_list().contains("visible"));
    assert!(b.class_list().contains("visible"));
}

#[wasm_bindgen_test]
fn start_survives_bare_page() {
    let cfg = PageConfig { canvas_id: "no-such-canvas".into(), ..PageConfig::default() };
    let page = aurora_page::start_with(cfg).unwrap();
    assert!(!page.background_running());
}

#[wasm_bindgen_test]
fn keyboard_activation_scrolls_and_collapses_menu() {
    let doc = document();
    append("section", "kbd-target");
    let toggle = append("button", "kbd-toggle");
    let panel = append("nav", "kbd-menu");
    let link = append("div", "kbd-link");
    link.set_attribute("data-kbd-target", "kbd-target").unwrap();

    let cfg = PageConfig {
        nav_selector: "[data-kbd-target]".into(),
        nav_target_attr: "data-kbd-target".into(),
        ..PageConfig::default()
    };
    nav::install(&doc, &cfg, Some(MenuElements { toggle, panel: panel.clone() })).unwrap();
    assert_eq!(link.get_attribute("tabindex").as_deref(), Some("0"));

    let menu = Menu::new(panel, "hidden");
    assert_eq!(menu.visibility(), MenuVisibility::Expanded);
    keyup(&link, "a");
    assert_eq!(menu.visibility(), MenuVisibility::Expanded);
    keyup(&link, "Enter");
    assert_eq!(menu.visibility(), MenuVisibility::Collapsed);

    menu.set_visibility(MenuVisibility::Expanded);
    keyup(&link, " ");
    assert_eq!(menu.visibility(), MenuVisibility::Collapsed);
}

#[wasm_bindgen_test]
fn native_button_keyup_is_not_doubled() {
    let doc = document();
    append("section", "btn-target");
    let toggle = append("button", "btn-toggle");
    let panel = append("nav", "btn-menu");
    let button = append("button", "btn-link");
    button.set_attribute("data-btn-target", "btn-target").unwrap();

    let cfg = PageConfig {
        nav_selector: "[data-btn-target]".into(),
        nav_target_attr: "data-btn-target".into(),
        ..PageConfig::default()
    };
    nav::install(&doc, &cfg, Some(MenuElements { toggle, panel: panel.clone() })).unwrap();
    assert_eq!(button.get_attribute("tabindex").as_deref(), Some("0"));

    // a synthetic keyup does not make the browser click; only our handler could
    keyup(&button, "Enter");
    assert_eq!(Menu::new(panel, "hidden").visibility(), MenuVisibility::Expanded);
}

#[wasm_bindgen_test]
async fn observer_reveals_element_in_view() {
    let el = pinned("observe-small", 100.0);
    reveal::install(vec![el.clone()], Revealer::new("visible", 0.12), true).unwrap();
    sleep_ms(200).await;
    assert!(el.class_list().contains("visible"));
}

#[wasm_bindgen_test]
async fn observer_reveals_element_taller_than_threshold_allows() {
    let vh = web_sys::window().unwrap().inner_height().unwrap().as_f64().unwrap();
    let el = pinned("observe-tall", vh * 10.0);
    reveal::install(vec![el.clone()], Revealer::new("visible", 0.12), true).unwrap();
    sleep_ms(200).await;
    assert!(el.class_list().contains("visible"));
}
