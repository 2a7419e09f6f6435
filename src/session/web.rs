//! Browser host for the session gate: `window.localStorage`,
//! `window.location` and the live DOM.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use super::gate::{Navigator, SessionGate, SessionStorage};
use super::visibility::{PageDocument, ROLE_VISIBLE_ATTRIBUTE, ROLE_VISIBLE_SELECTOR};

/// `window.localStorage`. Storage that is unavailable or throws reads as
/// empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.remove_item(key) {
                web_sys::console::warn_2(&"Failed to clear session user".into(), &e);
            }
        }
    }
}

/// Navigates by assigning `window.location.href`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn redirect(&self, location: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(location) {
                web_sys::console::warn_2(&format!("Failed to navigate to {}", location).into(), &e);
            }
        }
    }
}

pub struct DomDocument {
    document: web_sys::Document,
}

impl DomDocument {
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

impl PageDocument for DomDocument {
    type Element = Element;

    fn role_marked_elements(&self) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(ROLE_VISIBLE_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn role_allowlist(&self, element: &Element) -> Option<String> {
        element.get_attribute(ROLE_VISIBLE_ATTRIBUTE)
    }

    fn hide(&mut self, element: &Element) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            if let Err(e) = html.style().set_property("display", "none") {
                web_sys::console::warn_2(&"Failed to hide role-restricted element".into(), &e);
            }
        }
    }
}

pub type BrowserGate = SessionGate<LocalStorage, WindowNavigator>;

/// Gate over the page's local storage and location, default paths.
pub fn browser_gate() -> BrowserGate {
    SessionGate::new(LocalStorage, WindowNavigator)
}

/// Run the role visibility pass once `DOMContentLoaded` fires.
pub fn install_role_visibility(gate: BrowserGate) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let on_ready = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        if let Some(mut dom) = DomDocument::current() {
            gate.apply_role_visibility(&mut dom);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    on_ready.forget();
    Ok(())
}
