//! `wasm-bindgen` exports mirroring the page-script API.

// Exported functions receive JS values by value.
#![allow(clippy::needless_pass_by_value)]

use std::cell::RefCell;

use calcite_dom::{
    WebDom, add_class, closest as find_closest, has_class, remove_class, toggle_class,
};
use calcite_patterns::Pattern;
use calcite_telemetry::{LoggingSettings, init_logging};
use js_sys::{Array, Function};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, NodeList};

use crate::runtime::Runtime;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime<WebDom>>> = const { RefCell::new(None) };
}

fn with_runtime<T>(
    action: impl FnOnce(&mut Runtime<WebDom>) -> Result<T, JsError>,
) -> Result<T, JsError> {
    RUNTIME.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let dom = WebDom::new()
                .ok_or_else(|| JsError::new("calcite needs a window with a document"))?;
            *slot = Some(Runtime::new(dom));
        }
        match slot.as_mut() {
            Some(runtime) => action(runtime),
            None => Err(JsError::new("calcite runtime unavailable")),
        }
    })
}

fn web_dom() -> Result<WebDom, JsError> {
    with_runtime(|runtime| Ok(runtime.calcite().dom().clone()))
}

fn run(pattern: Pattern, root: Option<&Element>) -> Result<usize, JsError> {
    with_runtime(|runtime| Ok(runtime.run(pattern, root)))
}

#[wasm_bindgen(start)]
fn start() {
    console_error_panic_hook::set_once();
}

/// Library version string.
#[wasm_bindgen]
#[must_use]
pub fn version() -> String {
    calcite_patterns::VERSION.to_string()
}

/// Interaction event name.
#[wasm_bindgen]
#[must_use]
pub fn click() -> String {
    calcite_dom::click().as_str().to_string()
}

/// Attach `handler` to `event` on `node`.
///
/// # Errors
///
/// Propagates the host's `addEventListener` failure.
#[wasm_bindgen(js_name = addEvent)]
pub fn add_event(node: &EventTarget, event: &str, handler: &Function) -> Result<(), JsValue> {
    node.add_event_listener_with_callback(event, handler)
}

/// Detach `handler` from `event` on `node`.
///
/// # Errors
///
/// Propagates the host's `removeEventListener` failure.
#[wasm_bindgen(js_name = removeEvent)]
pub fn remove_event(node: &EventTarget, event: &str, handler: &Function) -> Result<(), JsValue> {
    node.remove_event_listener_with_callback(event, handler)
}

/// Element the event was dispatched at.
#[wasm_bindgen(js_name = eventTarget)]
#[must_use]
pub fn event_target(event: &Event) -> Option<EventTarget> {
    event.target()
}

/// Suppress the default action of `event`.
#[wasm_bindgen(js_name = preventDefault)]
pub fn prevent_default(event: &Event) {
    event.prevent_default();
}

/// Stop `event` from bubbling.
#[wasm_bindgen(js_name = stopPropagation)]
pub fn stop_propagation(event: &Event) {
    event.stop_propagation();
}

/// Whether `node` carries `class`.
///
/// # Errors
///
/// Fails when there is no document to bind to.
#[wasm_bindgen(js_name = hasClass)]
pub fn has_class_js(node: &Element, class: &str) -> Result<bool, JsError> {
    Ok(has_class(&web_dom()?, node, class))
}

/// Add space-separated `classes` to `node`.
///
/// # Errors
///
/// Fails when there is no document to bind to.
#[wasm_bindgen(js_name = addClass)]
pub fn add_class_js(node: &Element, classes: &str) -> Result<(), JsError> {
    add_class(&web_dom()?, node, classes);
    Ok(())
}

/// Remove space-separated `classes` from `node`.
///
/// # Errors
///
/// Fails when there is no document to bind to.
#[wasm_bindgen(js_name = removeClass)]
pub fn remove_class_js(node: &Element, classes: &str) -> Result<(), JsError> {
    remove_class(&web_dom()?, node, classes);
    Ok(())
}

/// Flip `class` on `node`; returns whether it is now present.
///
/// # Errors
///
/// Fails when there is no document to bind to.
#[wasm_bindgen(js_name = toggleClass)]
pub fn toggle_class_js(node: &Element, class: &str) -> Result<bool, JsError> {
    Ok(toggle_class(&web_dom()?, node, class))
}

/// Nearest inclusive ancestor of `node` carrying `class`.
///
/// # Errors
///
/// Fails when there is no document to bind to.
#[wasm_bindgen]
pub fn closest(class: &str, node: &Element) -> Result<Option<Element>, JsError> {
    Ok(find_closest(&web_dom()?, class, node))
}

/// Copy a `NodeList` into an array of its elements.
#[wasm_bindgen(js_name = nodeListToArray)]
#[must_use]
pub fn node_list_to_array(list: &NodeList) -> Array {
    calcite_dom::web::node_list_to_array(list)
        .into_iter()
        .map(JsValue::from)
        .collect()
}

macro_rules! controller {
    ($($name:ident => $js:literal => $pattern:expr),+ $(,)?) => {
        $(
            #[doc = concat!("Bind the `", $js, "` pattern under `root`, or the whole document.")]
            ///
            /// # Errors
            ///
            /// Fails when there is no document to bind to.
            #[wasm_bindgen(js_name = $js)]
            pub fn $name(root: Option<Element>) -> Result<usize, JsError> {
                run($pattern, root.as_ref())
            }
        )+
    };
}

controller! {
    accordion => "accordion" => Pattern::Accordion,
    dropdown => "dropdown" => Pattern::Dropdown,
    drawer => "drawer" => Pattern::Drawer,
    expanding_nav => "expandingNav" => Pattern::ExpandingNav,
    modal => "modal" => Pattern::Modal,
    tabs => "tabs" => Pattern::Tabs,
    site_search => "siteSearch" => Pattern::SiteSearch,
    sticky => "sticky" => Pattern::Sticky,
}

/// Bind `patterns` by name, or the configured list. Returns the names bound.
///
/// # Errors
///
/// Fails on an unknown pattern name; nothing is bound in that case.
#[wasm_bindgen]
pub fn init(patterns: Option<Vec<String>>) -> Result<Vec<String>, JsError> {
    with_runtime(|runtime| {
        let bound = runtime.init(patterns.as_deref())?;
        Ok(bound.iter().map(|pattern| pattern.name().to_string()).collect())
    })
}

/// Replace the configuration from a JSON document, releasing current bindings.
///
/// # Errors
///
/// Fails on malformed or invalid configuration; the running setup is kept.
#[wasm_bindgen]
pub fn configure(document: &str) -> Result<(), JsError> {
    with_runtime(|runtime| Ok(runtime.configure(document)?))
}

/// Release every listener and timer installed so far.
#[wasm_bindgen]
pub fn dispose() {
    RUNTIME.with(|cell| {
        if let Some(runtime) = cell.borrow_mut().as_mut() {
            runtime.dispose();
        }
    });
}

/// Route `tracing` output to the browser console.
///
/// # Errors
///
/// Fails on malformed settings or when logging is already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging_js(settings: Option<String>) -> Result<(), JsError> {
    let settings = match settings.as_deref() {
        Some(document) => LoggingSettings::from_json(document)?,
        None => LoggingSettings::default(),
    };
    init_logging(&settings.as_config()).map_err(|err| JsError::new(&format!("{err:#}")))
}
