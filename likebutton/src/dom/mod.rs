pub mod memory_document;

use std::fmt;

pub use memory_document::MemoryDocument;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attribute-keyed element selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Attribute { name: String, value: String },
}

impl Selector {
    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Selector::Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The page the controller is bound to.
///
/// Implementations use interior mutability: the controller only holds a shared reference and
/// mutates elements at settlement.
pub trait Document {
    /// Matching elements in document order.
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&self, element: ElementId, name: &str, value: &str);

    fn text(&self, element: ElementId) -> Option<String>;

    fn set_text(&self, element: ElementId, text: &str);

    /// Direct children of `element` with the given tag name.
    fn children(&self, element: ElementId, tag: &str) -> Vec<ElementId>;
}
