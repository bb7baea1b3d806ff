//! DOM helpers
//!
//! Element lookup, visibility through the `hidden` class, modal bookkeeping,
//! form access and event binding. Unknown nodes are ignored: helpers return
//! `None`, `false` or an empty collection instead of failing.

use std::collections::{BTreeMap, HashSet};

use cmn_dom::{ControlKind, Document, Event, EventType, NodeId};

/// Class that hides an element
pub const HIDDEN: &str = "hidden";
/// Class marking modal dialogs
pub const MODAL: &str = "modal";
/// Class put on `<body>` while any modal is shown
pub const MODAL_SHOWN: &str = "modal-shown";

/// An element given either directly or by its `id` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Node(NodeId),
    Id(&'a str),
}

impl From<NodeId> for Target<'_> {
    fn from(id: NodeId) -> Self {
        Target::Node(id)
    }
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(id: &'a str) -> Self {
        Target::Id(id)
    }
}

/// Resolve a target to a node of `doc`
pub fn resolve<'a>(doc: &Document, target: impl Into<Target<'a>>) -> Option<NodeId> {
    match target.into() {
        Target::Node(id) => doc.tree().get(id).map(|_| id),
        Target::Id(id) => doc.get_element_by_id(id),
    }
}

/// Add (`on`) or remove a class. Returns false if there is no such element.
pub fn set_class<'a>(doc: &mut Document, el: impl Into<Target<'a>>, class: &str, on: bool) -> bool {
    let Some(id) = resolve(doc, el) else { return false };
    match doc.tree_mut().element_mut(id) {
        Some(element) => {
            if element.set_class(class, on) {
                tracing::debug!("{} class '{}' on {:?}", if on { "add" } else { "remove" }, class, id);
            }
            true
        }
        None => false,
    }
}

pub fn is_hidden<'a>(doc: &Document, el: impl Into<Target<'a>>) -> bool {
    resolve(doc, el)
        .and_then(|id| doc.tree().element(id))
        .is_some_and(|e| e.has_class(HIDDEN))
}

pub fn is_shown<'a>(doc: &Document, el: impl Into<Target<'a>>) -> bool {
    resolve(doc, el)
        .and_then(|id| doc.tree().element(id))
        .is_some_and(|e| !e.has_class(HIDDEN))
}

pub fn set_visible<'a>(doc: &mut Document, el: impl Into<Target<'a>>, show: bool) -> bool {
    set_class(doc, el, HIDDEN, !show)
}

/// Show or hide a modal, then put `modal-shown` on `<body>` iff any modal
/// in the document is shown.
pub fn set_modal<'a>(doc: &mut Document, el: impl Into<Target<'a>>, show: bool) -> bool {
    let found = set_visible(doc, el, show);

    let any_shown = doc
        .get_elements_by_class_name(MODAL)
        .into_iter()
        .any(|m| !is_hidden(doc, m));
    let body = doc.body();
    set_class(doc, body, MODAL_SHOWN, any_shown);

    found
}

/// Controls of `form` with the given name, in tree order
fn named_controls(doc: &Document, form: NodeId, name: &str) -> Vec<NodeId> {
    let tree = doc.tree();
    tree.form_controls(form)
        .into_iter()
        .filter(|&c| tree.element(c).and_then(|e| e.name()) == Some(name))
        .collect()
}

/// Value of the first control named `name`, after optionally assigning
/// `value` to it.
pub fn get_field_value<'a>(
    doc: &mut Document,
    form: impl Into<Target<'a>>,
    name: &str,
    value: Option<&str>,
) -> Option<String> {
    let form = resolve(doc, form)?;
    let control = named_controls(doc, form, name).into_iter().next()?;
    if let Some(value) = value {
        doc.tree_mut().set_control_value(control, value);
    }
    doc.tree().control_value(control)
}

/// Which checkable controls to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checked {
    /// Only the control with this value
    One(String),
    /// Every control whose value is in the set
    AnyOf(HashSet<String>),
}

impl Checked {
    pub fn one(value: impl Into<String>) -> Self {
        Checked::One(value.into())
    }

    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Checked::AnyOf(values.into_iter().map(Into::into).collect())
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Checked::One(v) => v == value,
            Checked::AnyOf(set) => set.contains(value),
        }
    }
}

/// Values of the checked checkboxes/radios named `name`, in tree order.
///
/// With `select`, each of those controls is first checked iff its value
/// matches.
pub fn get_checked_values<'a>(
    doc: &mut Document,
    form: impl Into<Target<'a>>,
    name: &str,
    select: Option<&Checked>,
) -> Vec<String> {
    let Some(form) = resolve(doc, form) else { return Vec::new() };
    let controls: Vec<NodeId> = named_controls(doc, form, name)
        .into_iter()
        .filter(|&c| doc.tree().control_kind(c).is_some_and(ControlKind::is_checkable))
        .collect();

    if let Some(select) = select {
        for &control in &controls {
            let value = doc.tree().control_value(control).unwrap_or_default();
            doc.tree_mut().set_checked(control, select.matches(&value));
        }
    }

    let tree = doc.tree();
    controls
        .into_iter()
        .filter(|&c| tree.is_checked(c))
        .filter_map(|c| tree.control_value(c))
        .collect()
}

/// Name → value map of a form's controls.
///
/// Unchecked checkboxes/radios, buttons and nameless controls are skipped.
/// With `filter`, only the listed names are kept. A later control with the
/// same name overwrites an earlier one.
pub fn serialize_form<'a>(
    doc: &Document,
    form: impl Into<Target<'a>>,
    filter: Option<&[&str]>,
) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    let Some(form) = resolve(doc, form) else { return data };
    let tree = doc.tree();

    for control in tree.form_controls(form) {
        let Some(kind) = tree.control_kind(control) else { continue };
        if kind == ControlKind::Button || (kind.is_checkable() && !tree.is_checked(control)) {
            continue;
        }
        let Some(name) = tree.element(control).and_then(|e| e.name()).filter(|n| !n.is_empty()) else {
            continue;
        };
        if filter.is_some_and(|allowed| !allowed.contains(&name)) {
            continue;
        }
        if let Some(value) = tree.control_value(control) {
            data.insert(name.to_string(), value);
        }
    }

    data
}

/// Register a click handler that suppresses the default action
pub fn bind_click<'a, F>(doc: &mut Document, el: impl Into<Target<'a>>, handler: F) -> bool
where
    F: Fn(&mut Document, &mut Event) + 'static,
{
    let Some(id) = resolve(doc, el) else { return false };
    doc.add_event_listener(id, EventType::Click, move |doc, event| {
        event.prevent_default();
        handler(doc, event);
    });
    true
}

/// Register a plain event listener
pub fn on<'a, F>(doc: &mut Document, el: impl Into<Target<'a>>, event_type: EventType, handler: F) -> bool
where
    F: Fn(&mut Document, &mut Event) + 'static,
{
    let Some(id) = resolve(doc, el) else { return false };
    doc.add_event_listener(id, event_type, handler);
    true
}

/// Run `handler` once the document has finished loading
pub fn ready<F>(doc: &mut Document, handler: F)
where
    F: Fn(&mut Document) + 'static,
{
    let root = doc.tree().root();
    doc.add_event_listener(root, EventType::DomContentLoaded, move |doc, _| handler(doc));
}
