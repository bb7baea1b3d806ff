//! Edge case tests for cmn-dom
//!
//! Tree mutation corner cases, event propagation and form state.

use std::cell::RefCell;
use std::rc::Rc;

use cmn_dom::{ClassList, ControlKind, Document, DomError, DomTree, EventType, NodeId};

fn element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.tree_mut().create_element(tag);
    for (k, v) in attrs {
        doc.tree_mut().element_mut(id).unwrap().set_attr(k, v);
    }
    doc.tree_mut().append_child(parent, id).unwrap();
    id
}

// ============================================================================
// TREE EDGE CASES
// ============================================================================

#[test]
fn test_reappend_within_same_parent() {
    let mut tree = DomTree::new();
    let list = tree.create_element("ul");
    let items: Vec<NodeId> = (0..3).map(|_| tree.create_element("li")).collect();
    for &item in &items {
        tree.append_child(list, item).unwrap();
    }

    tree.append_child(list, items[0]).unwrap();
    let order: Vec<NodeId> = tree.children(list).map(|(id, _)| id).collect();
    assert_eq!(order, vec![items[1], items[2], items[0]]);

    // Last child appended again stays put
    tree.append_child(list, items[0]).unwrap();
    assert_eq!(tree.children(list).count(), 3);
    assert_eq!(tree.children(list).last().map(|(id, _)| id), Some(items[0]));
    assert_eq!(tree.get(list).unwrap().first_child, items[1]);
}

#[test]
fn test_append_into_text_rejected() {
    let mut tree = DomTree::new();
    let text = tree.create_text("x");
    let span = tree.create_element("span");
    assert_eq!(tree.append_child(text, span), Err(DomError::HierarchyRequest));
}

#[test]
fn test_append_cycle_rejected() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("div");
    tree.append_child(outer, inner).unwrap();

    assert_eq!(tree.append_child(inner, outer), Err(DomError::HierarchyRequest));
    assert_eq!(tree.append_child(outer, outer), Err(DomError::HierarchyRequest));
}

#[test]
fn test_unknown_nodes() {
    let mut tree = DomTree::new();
    assert!(tree.get(NodeId::NONE).is_none());
    assert_eq!(tree.children(NodeId::NONE).count(), 0);
    assert!(tree.descendants(NodeId::NONE).is_empty());
    assert!(matches!(tree.clear_children(NodeId::NONE), Err(DomError::NotFound(_))));
}

#[test]
fn test_remove_non_child() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    assert_eq!(tree.remove_child(a, b), Err(DomError::NotAChild));
}

#[test]
fn test_clear_middle_links() {
    let mut tree = DomTree::new();
    let list = tree.create_element("ul");
    let items: Vec<NodeId> = (0..3).map(|_| tree.create_element("li")).collect();
    for &item in &items {
        tree.append_child(list, item).unwrap();
    }

    tree.remove_child(list, items[1]).unwrap();
    let remaining: Vec<NodeId> = tree.children(list).map(|(id, _)| id).collect();
    assert_eq!(remaining, vec![items[0], items[2]]);

    assert_eq!(tree.clear_children(list).unwrap(), 2);
    assert_eq!(tree.children(list).count(), 0);
    assert!(tree.parent(items[0]).is_none());
}

#[test]
fn test_detached_lookup_ignored() {
    let mut doc = Document::default();
    let loose = doc.tree_mut().create_element("div");
    doc.tree_mut().element_mut(loose).unwrap().set_attr("id", "ghost");
    assert_eq!(doc.get_element_by_id("ghost"), None);

    let body = doc.body();
    doc.tree_mut().append_child(body, loose).unwrap();
    assert_eq!(doc.get_element_by_id("ghost"), Some(loose));
}

// ============================================================================
// CLASS LIST EDGE CASES
// ============================================================================

#[test]
fn test_class_list_whitespace_and_duplicates() {
    let list = ClassList::from_string("  a\tb  a\nc ");
    assert_eq!(list.value(), "a b c");
    assert_eq!(list.length(), 3);
}

#[test]
fn test_class_attribute_resets_list() {
    let mut doc = Document::default();
    let body = doc.body();
    let div = element(&mut doc, body, "div", &[("class", "modal hidden")]);

    let data = doc.tree_mut().element_mut(div).unwrap();
    assert!(data.has_class("hidden"));
    data.set_attr("class", "modal");
    assert!(!data.has_class("hidden"));
    assert!(!data.set_class("hidden", false));
}

// ============================================================================
// EVENT EDGE CASES
// ============================================================================

#[test]
fn test_bubbling_order_and_stop() {
    let mut doc = Document::default();
    let body = doc.body();
    let outer = element(&mut doc, body, "div", &[]);
    let inner = element(&mut doc, outer, "button", &[]);
    let log = Rc::new(RefCell::new(Vec::new()));

    for (node, name) in [(inner, "inner"), (outer, "outer"), (body, "body")] {
        let log = Rc::clone(&log);
        doc.add_event_listener(node, EventType::Click, move |_, event| {
            log.borrow_mut().push(name);
            if event.current_target == outer {
                event.stop_propagation();
            }
        });
    }

    assert!(doc.click(inner));
    assert_eq!(*log.borrow(), vec!["inner", "outer"]);
}

#[test]
fn test_prevent_default_needs_cancelable() {
    let mut doc = Document::default();
    let body = doc.body();
    let input = element(&mut doc, body, "input", &[]);
    doc.add_event_listener(input, EventType::Change, |_, event| event.prevent_default());
    doc.add_event_listener(input, EventType::Submit, |_, event| event.prevent_default());

    assert!(doc.dispatch_event(input, EventType::Change));
    assert!(!doc.dispatch_event(input, EventType::Submit));
}

#[test]
fn test_event_names() {
    for ty in EventType::BINDABLE {
        assert_eq!(EventType::from_name(ty.name()), Some(ty));
    }
    assert_eq!(EventType::from_name("DOMContentLoaded"), None);
    assert_eq!(EventType::from_name("mouseover"), None);
}

// ============================================================================
// FORM EDGE CASES
// ============================================================================

#[test]
fn test_control_kinds() {
    let mut doc = Document::default();
    let body = doc.body();
    let cases = [
        ("input", None, ControlKind::Text),
        ("input", Some("PASSWORD"), ControlKind::Text),
        ("input", Some("Checkbox"), ControlKind::Checkbox),
        ("input", Some("submit"), ControlKind::Button),
        ("textarea", None, ControlKind::Textarea),
    ];
    for (tag, ty, kind) in cases {
        let attrs: Vec<(&str, &str)> = ty.map(|t| ("type", t)).into_iter().collect();
        let id = element(&mut doc, body, tag, &attrs);
        assert_eq!(doc.tree().control_kind(id), Some(kind));
    }
    assert_eq!(doc.tree().control_kind(body), None);
}

#[test]
fn test_select_value_falls_back_to_first_option() {
    let mut doc = Document::default();
    let body = doc.body();
    let select = element(&mut doc, body, "select", &[("name", "mode")]);
    let first = element(&mut doc, select, "option", &[]);
    let text = doc.tree_mut().create_text(" Auto ");
    doc.tree_mut().append_child(first, text).unwrap();
    element(&mut doc, select, "option", &[("value", "manual")]);

    assert_eq!(doc.tree().control_value(select).as_deref(), Some("Auto"));
    assert!(doc.tree_mut().set_control_value(select, "manual"));
    assert_eq!(doc.tree().control_value(select).as_deref(), Some("manual"));
    assert!(doc.tree_mut().set_control_value(select, "none"));
    assert_eq!(doc.tree().control_value(select).as_deref(), Some("Auto"));
}

#[test]
fn test_textarea_value() {
    let mut doc = Document::default();
    let body = doc.body();
    let area = element(&mut doc, body, "textarea", &[]);
    let text = doc.tree_mut().create_text("notes");
    doc.tree_mut().append_child(area, text).unwrap();

    assert_eq!(doc.tree().control_value(area).as_deref(), Some("notes"));
    doc.tree_mut().set_control_value(area, "edited");
    assert_eq!(doc.tree().control_value(area).as_deref(), Some("edited"));
}

#[test]
fn test_radio_groups_scoped_to_form() {
    let mut doc = Document::default();
    let body = doc.body();
    let form_a = element(&mut doc, body, "form", &[]);
    let form_b = element(&mut doc, body, "form", &[]);
    let a = element(&mut doc, form_a, "input", &[("type", "radio"), ("name", "r"), ("checked", "")]);
    let b = element(&mut doc, form_b, "input", &[("type", "radio"), ("name", "r")]);

    doc.tree_mut().set_checked(b, true);
    assert!(doc.tree().is_checked(a));
    assert!(doc.tree().is_checked(b));
}

#[test]
fn test_checkbox_default_value() {
    let mut doc = Document::default();
    let body = doc.body();
    let boxed = element(&mut doc, body, "input", &[("type", "checkbox")]);
    assert_eq!(doc.tree().control_value(boxed).as_deref(), Some("on"));
    assert!(!doc.tree().is_checked(boxed));
}
