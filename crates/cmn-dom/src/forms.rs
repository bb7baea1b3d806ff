//! Form Controls
//!
//! Live value and checkedness of `input`, `select`, `textarea` and
//! `button` elements. The live state starts out mirroring the element's
//! attributes and diverges once it is written through these methods.

use crate::{DomTree, ElementData, NodeId};

/// Kind of form control, derived from tag and `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Any text-like `<input>` (text, password, hidden, number, ...)
    Text,
    Checkbox,
    Radio,
    /// `<button>` and submit/reset/button/image inputs
    Button,
    Select,
    Textarea,
}

impl ControlKind {
    /// Classify an element, `None` if it is not a form control
    pub fn of(element: &ElementData) -> Option<Self> {
        match element.tag.as_str() {
            "input" => {
                let input_type = element.get_attr("type").unwrap_or("text").to_ascii_lowercase();
                Some(match input_type.as_str() {
                    "checkbox" => Self::Checkbox,
                    "radio" => Self::Radio,
                    "submit" | "reset" | "button" | "image" => Self::Button,
                    _ => Self::Text,
                })
            }
            "button" => Some(Self::Button),
            "select" => Some(Self::Select),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }

    /// Checkboxes and radios contribute only while checked
    pub fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

impl DomTree {
    /// Control kind of `id`
    pub fn control_kind(&self, id: NodeId) -> Option<ControlKind> {
        self.element(id).and_then(ControlKind::of)
    }

    /// Controls inside `form`, in tree order
    pub fn form_controls(&self, form: NodeId) -> Vec<NodeId> {
        self.descendants(form)
            .into_iter()
            .filter(|&n| self.control_kind(n).is_some())
            .collect()
    }

    /// Current value of a control
    pub fn control_value(&self, id: NodeId) -> Option<String> {
        let kind = self.control_kind(id)?;
        let el = self.element(id)?;
        let value = match kind {
            ControlKind::Select => self
                .selected_option(id)
                .map(|opt| self.option_value(opt))
                .unwrap_or_default(),
            ControlKind::Textarea => el.value.clone().unwrap_or_else(|| self.text_content(id)),
            ControlKind::Checkbox | ControlKind::Radio => el
                .value
                .clone()
                .or_else(|| el.get_attr("value").map(str::to_string))
                .unwrap_or_else(|| "on".to_string()),
            ControlKind::Text | ControlKind::Button => el
                .value
                .clone()
                .or_else(|| el.get_attr("value").map(str::to_string))
                .unwrap_or_default(),
        };
        Some(value)
    }

    /// Assign a control's value. For `<select>` this selects the first
    /// option with that value. Returns false if `id` is not a control.
    pub fn set_control_value(&mut self, id: NodeId, value: &str) -> bool {
        match self.control_kind(id) {
            None => false,
            Some(ControlKind::Select) => {
                let mut matched = false;
                for opt in self.options(id) {
                    let hit = !matched && self.option_value(opt) == value;
                    matched |= hit;
                    if let Some(el) = self.element_mut(opt) {
                        el.checked = Some(hit);
                    }
                }
                true
            }
            Some(_) => {
                if let Some(el) = self.element_mut(id) {
                    el.value = Some(value.to_string());
                }
                true
            }
        }
    }

    /// Checkedness of a checkbox/radio, selectedness of an `<option>`
    pub fn is_checked(&self, id: NodeId) -> bool {
        let Some(el) = self.element(id) else { return false };
        let default_attr = if el.is("option") { "selected" } else { "checked" };
        el.checked.unwrap_or_else(|| el.has_attr(default_attr))
    }

    /// Set checkedness; checking a radio unchecks the rest of its group
    pub fn set_checked(&mut self, id: NodeId, on: bool) {
        if on && self.control_kind(id) == Some(ControlKind::Radio) {
            for other in self.radio_group(id) {
                if other != id {
                    if let Some(el) = self.element_mut(other) {
                        el.checked = Some(false);
                    }
                }
            }
        }
        if let Some(el) = self.element_mut(id) {
            el.checked = Some(on);
        }
    }

    /// Radios sharing `id`'s name within the same form (or detached subtree)
    fn radio_group(&self, id: NodeId) -> Vec<NodeId> {
        let Some(name) = self.element(id).and_then(|e| e.name()).map(str::to_string) else {
            return vec![id];
        };
        let scope = self.closest(id, "form").unwrap_or_else(|| self.tree_root(id));
        self.descendants(scope)
            .into_iter()
            .filter(|&n| {
                self.control_kind(n) == Some(ControlKind::Radio)
                    && self.element(n).and_then(|e| e.name()) == Some(name.as_str())
            })
            .collect()
    }

    /// `<option>` elements of a select, including those inside `<optgroup>`
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| e.is("option")))
            .collect()
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.element(option).and_then(|e| e.get_attr("value")) {
            Some(v) => v.to_string(),
            None => self.text_content(option).trim().to_string(),
        }
    }

    /// First selected option, falling back to the first option
    fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        let options = self.options(select);
        options
            .iter()
            .copied()
            .find(|&o| self.is_checked(o))
            .or_else(|| options.first().copied())
    }
}
