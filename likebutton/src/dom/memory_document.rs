use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dom::{Document, ElementId, Selector};

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<ElementId>,
}

/// In-memory page used by the headless binary and tests.
///
/// Elements are stored in insertion order, which doubles as document order.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: RwLock<Vec<Element>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, tag: &str, attributes: &[(&str, &str)]) -> ElementId {
        let mut elements = self.write();
        let id = ElementId(elements.len());

        elements.push(Element {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            ..Default::default()
        });

        id
    }

    pub fn append_child(&self, parent: ElementId, tag: &str, attributes: &[(&str, &str)]) -> ElementId {
        let id = self.append(tag, attributes);

        if let Some(parent) = self.write().get_mut(parent.0) {
            parent.children.push(id);
        }

        id
    }

    pub fn append_text(&self, tag: &str, attributes: &[(&str, &str)], text: &str) -> ElementId {
        let id = self.append(tag, attributes);
        self.set_text(id, text);

        id
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Element>> {
        self.elements.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Element>> {
        self.elements.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Document for MemoryDocument {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        match selector {
            Selector::Attribute { name, value } => self
                .read()
                .iter()
                .enumerate()
                .filter(|(_, el)| el.attributes.get(name) == Some(value))
                .map(|(idx, _)| ElementId(idx))
                .collect(),
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.read().get(element.0)?.attributes.get(name).cloned()
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        if let Some(el) = self.write().get_mut(element.0) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, element: ElementId) -> Option<String> {
        self.read().get(element.0).map(|el| el.text.clone())
    }

    fn set_text(&self, element: ElementId, text: &str) {
        if let Some(el) = self.write().get_mut(element.0) {
            el.text = text.to_string();
        }
    }

    fn children(&self, element: ElementId, tag: &str) -> Vec<ElementId> {
        let elements = self.read();

        match elements.get(element.0) {
            Some(el) => el
                .children
                .iter()
                .copied()
                .filter(|child| elements.get(child.0).is_some_and(|c| c.tag == tag))
                .collect(),
            None => vec![],
        }
    }
}
