use std::cell::RefCell;
use std::collections::HashMap;

use super::gate::{Navigator, SessionStorage};
use super::visibility::PageDocument;

/// In-memory storage for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Navigator that records redirects instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }

    pub fn last_redirect(&self) -> Option<String> {
        self.redirects.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, location: &str) {
        self.redirects.borrow_mut().push(location.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryElement {
    pub id: String,
    pub role_visible: Option<String>,
    pub hidden: bool,
}

/// Flat list of elements standing in for a page.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: &str, role_visible: Option<&str>) -> Self {
        self.elements.push(MemoryElement {
            id: id.to_string(),
            role_visible: role_visible.map(str::to_string),
            hidden: false,
        });
        self
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.element(id).map_or(false, |e| e.hidden)
    }
}

impl PageDocument for MemoryDocument {
    /// Index into the element list
    type Element = usize;

    fn role_marked_elements(&self) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.role_visible.is_some())
            .map(|(i, _)| i)
            .collect()
    }

    fn role_allowlist(&self, element: &usize) -> Option<String> {
        self.elements.get(*element).and_then(|e| e.role_visible.clone())
    }

    fn hide(&mut self, element: &usize) {
        if let Some(e) = self.elements.get_mut(*element) {
            e.hidden = true;
        }
    }
}
