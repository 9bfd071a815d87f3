use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Touch capability probe, evaluated once when the map view mounts:
/// `ontouchstart` on window or a positive maxTouchPoints count.
pub fn is_touch_device() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    if js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false) {
        return true;
    }
    window.navigator().max_touch_points() > 0
}
