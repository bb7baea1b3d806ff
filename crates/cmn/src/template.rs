//! Template renderer
//!
//! Builds DOM subtrees from nested [`Template`] descriptions.

use std::fmt;
use std::rc::Rc;

use cmn_dom::{Document, DomError, DomResult, Event, EventType, Listener, NodeId};

use crate::helpers::bind_click;

/// Description of a DOM subtree
#[derive(Clone)]
pub enum Template {
    /// Rendered as a text node
    Text(String),
    /// Element with attributes, listeners and children
    Element(ElementTemplate),
    /// Existing node, used as is
    Raw(NodeId),
}

impl Template {
    pub fn text(value: impl ToString) -> Self {
        Template::Text(value.to_string())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Template::Element(element) => element.fmt(f),
            Template::Raw(id) => f.debug_tuple("Raw").field(id).finish(),
        }
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::Text(text.to_string())
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::Text(text)
    }
}

impl From<NodeId> for Template {
    fn from(id: NodeId) -> Self {
        Template::Raw(id)
    }
}

impl From<ElementTemplate> for Template {
    fn from(element: ElementTemplate) -> Self {
        Template::Element(element)
    }
}

/// Element part of a [`Template`]
#[derive(Clone)]
pub struct ElementTemplate {
    pub tag: String,
    /// Attributes in the order they are set
    pub attributes: Vec<(String, String)>,
    pub events: Vec<(EventType, Listener)>,
    pub children: Vec<Template>,
}

/// Start an element template
pub fn el(tag: &str) -> ElementTemplate {
    ElementTemplate::new(tag)
}

impl ElementTemplate {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            events: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Bind `handler` to one of [`EventType::BINDABLE`]
    pub fn on<F>(mut self, event_type: EventType, handler: F) -> Self
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        debug_assert!(
            EventType::BINDABLE.contains(&event_type),
            "{event_type} cannot be bound from a template"
        );
        let listener: Listener = Rc::new(handler);
        self.events.push((event_type, listener));
        self
    }

    pub fn child(mut self, child: impl Into<Template>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, T>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Template>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

impl fmt::Debug for ElementTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events: Vec<&str> = self.events.iter().map(|(ty, _)| ty.name()).collect();
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("events", &events)
            .field("children", &self.children)
            .finish()
    }
}

/// Fail before allocating when `parent` cannot take children
fn check_parent(doc: &Document, parent: Option<NodeId>) -> DomResult<()> {
    let Some(parent) = parent else { return Ok(()) };
    match doc.tree().get(parent) {
        None => Err(DomError::NotFound(parent)),
        Some(node) if !node.is_container() => Err(DomError::HierarchyRequest),
        Some(_) => Ok(()),
    }
}

/// Create an element, appended to `parent` if given
pub fn create_tag(doc: &mut Document, tag: &str, parent: Option<NodeId>) -> DomResult<NodeId> {
    check_parent(doc, parent)?;
    let id = doc.tree_mut().create_element(tag);
    if let Some(parent) = parent {
        doc.tree_mut().append_child(parent, id)?;
    }
    Ok(id)
}

/// Create a text node, appended to `parent` if given
pub fn create_text(doc: &mut Document, text: &str, parent: Option<NodeId>) -> DomResult<NodeId> {
    check_parent(doc, parent)?;
    let id = doc.tree_mut().create_text(text);
    if let Some(parent) = parent {
        doc.tree_mut().append_child(parent, id)?;
    }
    Ok(id)
}

/// Render a template, appending the result to `parent` if given.
///
/// [`Template::Raw`] nodes are returned as they are and never re-parented.
/// Click listeners go through [`bind_click`] so the default action is
/// suppressed.
pub fn render(doc: &mut Document, template: &Template, parent: Option<NodeId>) -> DomResult<NodeId> {
    match template {
        Template::Text(text) => create_text(doc, text, parent),
        Template::Raw(id) => Ok(*id),
        Template::Element(element) => {
            let id = create_tag(doc, &element.tag, parent)?;

            if let Some(data) = doc.tree_mut().element_mut(id) {
                for (name, value) in &element.attributes {
                    data.set_attr(name, value);
                }
            }

            for (event_type, listener) in &element.events {
                match event_type {
                    EventType::Click => {
                        let listener = Rc::clone(listener);
                        bind_click(doc, id, move |doc, event| listener(doc, event));
                    }
                    _ => doc.add_listener(id, *event_type, Rc::clone(listener)),
                }
            }

            for child in &element.children {
                render(doc, child, Some(id))?;
            }
            Ok(id)
        }
    }
}

/// Render `templates` in order. A given `parent` is emptied first.
pub fn render_all(doc: &mut Document, templates: &[Template], parent: Option<NodeId>) -> DomResult<Vec<NodeId>> {
    if let Some(parent) = parent {
        let removed = doc.tree_mut().clear_children(parent)?;
        tracing::debug!("render_all: cleared {} children of {:?}", removed, parent);
    }
    templates.iter().map(|t| render(doc, t, parent)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_render_element_with_text() {
        let mut doc = Document::default();
        let template = el("div").attr("id", "x").child("hello").into();
        let div = render(&mut doc, &template, None).unwrap();

        let tree = doc.tree();
        assert_eq!(tree.element(div).unwrap().tag, "div");
        assert_eq!(tree.element(div).unwrap().id(), Some("x"));
        let children: Vec<NodeId> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(tree.get(children[0]).unwrap().as_text(), Some("hello"));
        assert!(tree.parent(div).is_none());
    }

    #[test]
    fn test_attribute_values_stringified() {
        let mut doc = Document::default();
        let body = doc.body();
        let template = el("input").attr("maxlength", 32).attr("data-on", true).into();
        let input = render(&mut doc, &template, Some(body)).unwrap();

        let data = doc.tree().element(input).unwrap();
        assert_eq!(data.get_attr("maxlength"), Some("32"));
        assert_eq!(data.get_attr("data-on"), Some("true"));
        assert_eq!(doc.tree().parent(input), Some(body));
    }

    #[test]
    fn test_raw_passthrough() {
        let mut doc = Document::default();
        let body = doc.body();
        let existing = create_tag(&mut doc, "span", Some(body)).unwrap();
        let host = create_tag(&mut doc, "div", None).unwrap();

        assert_eq!(render(&mut doc, &existing.into(), Some(host)).unwrap(), existing);
        assert_eq!(doc.tree().parent(existing), Some(body));
    }

    #[test]
    fn test_click_handler_prevents_default() {
        let mut doc = Document::default();
        let clicked = Rc::new(Cell::new(false));
        let flag = Rc::clone(&clicked);
        let template = el("button")
            .on(EventType::Click, move |_, event| {
                assert_eq!(event.current_target, event.target);
                flag.set(true);
            })
            .child("Save")
            .into();
        let button = render(&mut doc, &template, None).unwrap();

        assert!(!doc.click(button));
        assert!(clicked.get());
    }

    #[test]
    fn test_other_events_keep_default() {
        let mut doc = Document::default();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let template = el("input")
            .on(EventType::KeyUp, move |_, _| counter.set(counter.get() + 1))
            .into();
        let input = render(&mut doc, &template, None).unwrap();

        assert!(doc.dispatch_event(input, EventType::KeyUp));
        assert_eq!(count.get(), 1);
        assert_eq!(doc.listener_count(input, EventType::Click), 0);
    }

    #[test]
    fn test_render_all_replaces_children() {
        let mut doc = Document::default();
        let body = doc.body();
        let list = create_tag(&mut doc, "ul", Some(body)).unwrap();

        let first: Vec<Template> = ["a", "b", "c"].iter().map(|s| el("li").child(*s).into()).collect();
        render_all(&mut doc, &first, Some(list)).unwrap();
        let second: Vec<Template> = ["x", "y"].iter().map(|s| el("li").child(*s).into()).collect();
        let nodes = render_all(&mut doc, &second, Some(list)).unwrap();

        let children: Vec<NodeId> = doc.tree().children(list).map(|(id, _)| id).collect();
        assert_eq!(children, nodes);
        assert_eq!(doc.tree().text_content(list), "xy");
    }

    #[test]
    fn test_render_into_text_fails() {
        let mut doc = Document::default();
        let text = create_text(&mut doc, "t", None).unwrap();
        assert!(render(&mut doc, &"more".into(), Some(text)).is_err());
    }

    #[test]
    fn test_bad_parent_allocates_nothing() {
        let mut doc = Document::default();
        let text = create_text(&mut doc, "t", None).unwrap();
        let before = doc.tree().len();

        let template: Template = el("div").child("x").into();
        assert_eq!(render(&mut doc, &template, Some(text)), Err(DomError::HierarchyRequest));
        assert_eq!(render(&mut doc, &template, Some(NodeId::NONE)), Err(DomError::NotFound(NodeId::NONE)));
        assert_eq!(create_text(&mut doc, "y", Some(text)), Err(DomError::HierarchyRequest));
        assert_eq!(doc.tree().len(), before);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot be bound")]
    fn test_load_event_not_bindable() {
        let _ = el("div").on(EventType::DomContentLoaded, |_, _| {});
    }
}
