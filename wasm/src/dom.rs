//! DOM lookups and small element helpers

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

// Element ids the page provides
pub const TOGGLE_BUTTON: &str = "topToolsBtn";
pub const PANEL: &str = "topToolsPanel";
pub const AREA_INPUT: &str = "ttArea";
pub const RATE_INPUT: &str = "ttRate";
pub const PRICE_INPUT: &str = "ttPrice";
pub const KIND_SELECT: &str = "ttEstimateFor";
pub const RATE_LABEL: &str = "ttRateLabel";
pub const PRICE_LABEL: &str = "ttPriceLabel";
pub const ESTIMATOR_OUT: &str = "ttEstimatorOut";
pub const CALC_BUTTON: &str = "ttCalcBtn";
pub const CLEAR_BUTTON: &str = "ttClearBtn";
pub const WEATHER_OUT: &str = "ttWxOut";
pub const WEATHER_REFRESH: &str = "ttWxRefresh";
pub const WEATHER_LOCATION: &str = "ttWxLocation";
pub const WEATHER_USE_MY_LOCATION: &str = "ttWxUseMyLoc";

/// Seed-only inputs from an older page layout
pub const LEGACY_INPUTS: [&str; 2] = ["ttSeedRate", "ttSeedPrice"];

pub const TAB_SELECTOR: &str = ".tt-tab";
pub const TAB_PANEL_SELECTOR: &str = ".tt-panel";
pub const ACTIVE_CLASS: &str = "active";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Element by id, cast to the expected type
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// All elements under `root` matching `selector`
pub fn select_all<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn set_visible(element: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    if let Err(e) = element.style().set_property("display", display) {
        warn(&format!("Failed to set display: {}", describe_js_error(&e)));
    }
}

pub fn is_visible(element: &HtmlElement) -> bool {
    element
        .style()
        .get_property_value("display")
        .map(|v| v == "block")
        .unwrap_or(false)
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        warn(&format!("Failed to update class {}: {}", class, describe_js_error(&e)));
    }
}

/// Attach a listener for the page's lifetime
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        warn(&format!("Failed to listen for {}: {}", event, describe_js_error(&e)));
    }
    closure.forget();
}

/// Readable text for a thrown JavaScript value
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

pub fn error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}
