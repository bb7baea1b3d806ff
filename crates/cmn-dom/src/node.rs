//! DOM Node
//!
//! Nodes link to each other through `NodeId`s into the tree arena, so a
//! node can be detached and re-attached without touching its payload.

use crate::{ClassList, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether this node may hold children
    #[inline]
    pub fn is_container(&self) -> bool {
        !self.is_text()
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercased tag name
    pub tag: String,
    attrs: NamedNodeMap,
    classes: ClassList,
    /// Live control value, once set through the property rather than the attribute
    pub(crate) value: Option<String>,
    /// Live checkedness (selectedness for `<option>`)
    pub(crate) checked: Option<bool>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            classes: ClassList::new(),
            value: None,
            checked: None,
        }
    }

    /// Check the tag name (ASCII case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attributes(&self) -> &NamedNodeMap {
        &self.attrs
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    /// Set an attribute; `class` also replaces the class list
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case("class") {
            self.classes = ClassList::from_string(value);
        }
        self.attrs.set_attribute(name, value);
    }

    pub fn remove_attr(&mut self, name: &str) {
        if name.eq_ignore_ascii_case("class") {
            self.classes = ClassList::new();
        }
        self.attrs.remove_attribute(name);
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_attr("name")
    }

    pub fn class_list(&self) -> &ClassList {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add or remove a class, keeping the `class` attribute in sync.
    /// Returns true if the class list changed.
    pub fn set_class(&mut self, class: &str, on: bool) -> bool {
        let changed = if on {
            self.classes.add(class)
        } else {
            self.classes.remove(class)
        };
        if changed {
            let value = self.classes.value();
            self.attrs.set_attribute("class", &value);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_attribute_sync() {
        let mut el = ElementData::new("DIV");
        assert_eq!(el.tag, "div");

        el.set_attr("class", "modal hidden");
        assert!(el.has_class("modal"));
        assert!(el.has_class("hidden"));

        assert!(el.set_class("hidden", false));
        assert_eq!(el.get_attr("class"), Some("modal"));
        assert!(!el.set_class("hidden", false));

        el.set_class("shown", true);
        assert_eq!(el.get_attr("class"), Some("modal shown"));
    }

    #[test]
    fn test_node_kinds() {
        let text = Node::text("hi".to_string());
        assert!(text.is_text());
        assert!(!text.is_container());
        assert_eq!(text.as_text(), Some("hi"));

        let el = Node::element("span");
        assert!(el.is_element());
        assert!(el.as_element().is_some_and(|e| e.is("SPAN")));
    }
}
