//! Thin wrappers over browser APIs used by the landing page.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Calendar site opened by "Add to calendar"
pub const CALENDAR_URL: &str = "https://calendar.google.com/calendar/";

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `window.location.origin`, or empty outside a browser
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Public link for an event
pub fn event_share_url(origin: &str, event_id: i64) -> String {
    format!("{}/events/{}", origin.trim_end_matches('/'), event_id)
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

pub fn scroll_to(element_id: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id));
    if let Some(element) = element {
        element.scroll_into_view();
    }
}

/// `navigator.clipboard.writeText(text)`
pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
        .map_err(js_error)?;
    if clipboard.is_undefined() {
        return Err("clipboard unavailable".to_string());
    }

    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(js_error)?
        .dyn_into::<js_sys::Function>()
        .map_err(js_error)?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(js_error)?
        .dyn_into::<js_sys::Promise>()
        .map_err(js_error)?;

    JsFuture::from(promise).await.map_err(js_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_share_url() {
        assert_eq!(
            event_share_url("http://localhost:8084", 7),
            "http://localhost:8084/events/7"
        );
        assert_eq!(event_share_url("https://campus.example/", 1), "https://campus.example/events/1");
    }
}
