//! Document - High-level document API

use std::collections::HashMap;
use std::rc::Rc;

use crate::{DomTree, Event, EventType, Listener, NodeId};

/// HTML Document
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    listeners: HashMap<(NodeId, EventType), Vec<Listener>>,
    loaded: bool,
}

impl Document {
    /// Create a new document with an `<html><head/><body/></html>` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh elements under containers: cannot fail
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: HashMap::new(),
            loaded: false,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// First connected element whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// Connected elements carrying `class`, in tree order
    pub fn get_elements_by_class_name(&self, class: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&n| self.tree.element(n).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    /// Register a listener closure on `target`
    pub fn add_event_listener<F>(&mut self, target: NodeId, event_type: EventType, listener: F)
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.add_listener(target, event_type, Rc::new(listener));
    }

    /// Register an already shared listener on `target`
    pub fn add_listener(&mut self, target: NodeId, event_type: EventType, listener: Listener) {
        self.listeners.entry((target, event_type)).or_default().push(listener);
    }

    /// Number of listeners registered on `target` for `event_type`
    pub fn listener_count(&self, target: NodeId, event_type: EventType) -> usize {
        self.listeners.get(&(target, event_type)).map_or(0, Vec::len)
    }

    /// Dispatch an event at `target`, walking up through ancestors for
    /// bubbling types. Returns false if a listener prevented the default.
    pub fn dispatch_event(&mut self, target: NodeId, event_type: EventType) -> bool {
        let mut event = Event::new(event_type, target);

        let mut path = vec![target];
        if event.bubbles {
            let mut current = target;
            while let Some(parent) = self.tree.parent(current) {
                path.push(parent);
                current = parent;
            }
        }

        tracing::debug!("dispatch {} at {:?} ({} nodes on path)", event_type, target, path.len());

        for node in path {
            // Clone the handles out so listeners can mutate the document
            let handlers: Vec<Listener> = match self.listeners.get(&(node, event_type)) {
                Some(list) => list.iter().map(Rc::clone).collect(),
                None => continue,
            };
            event.current_target = node;
            for handler in handlers {
                handler(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        !event.is_default_prevented()
    }

    /// Simulate a click on `target`
    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch_event(target, EventType::Click)
    }

    /// Fire `DOMContentLoaded` at the document node, once
    pub fn finish_loading(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.dispatch_event(self.tree.root(), EventType::DomContentLoaded);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .field("listeners", &self.listeners.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}
