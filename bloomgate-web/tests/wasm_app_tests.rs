#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use yew::Renderer;

use bloomgate_web::app::App;
use bloomgate_web::dom;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

#[wasm_bindgen_test]
fn app_mounts_on_the_loading_scene() {
    Renderer::<App>::with_root(ensure_app_root()).render();
    let doc = dom::document().expect("document");
    let main = doc
        .query_selector("main[data-scene='loading']")
        .expect("query main")
        .expect("loading scene mounted");
    assert!(main.class_name().contains("bloomgate--loading"));
    let ambient = doc
        .query_selector_all(".ambient")
        .expect("query ambient particles");
    assert_eq!(ambient.length(), 12);
}

#[wasm_bindgen_test]
fn bridge_stays_hidden_without_test_flag() {
    Renderer::<App>::with_root(ensure_app_root()).render();
    let window = dom::window().expect("window");
    let bridge = js_sys::Reflect::get(&window, &JsValue::from_str("__bloomgateTest"))
        .expect("reflect get");
    assert!(bridge.is_undefined());
}
