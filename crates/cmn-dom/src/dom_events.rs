//! DOM Events
//!
//! Event types the helpers bind, the event object handed to listeners,
//! and the listener callback type.

use std::rc::Rc;

use crate::{Document, NodeId};

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Change,
    KeyDown,
    KeyPress,
    KeyUp,
    Submit,
    Focus,
    DomContentLoaded,
}

impl EventType {
    /// Event names a template may bind directly
    pub const BINDABLE: [EventType; 7] = [
        EventType::Click,
        EventType::Change,
        EventType::KeyDown,
        EventType::KeyPress,
        EventType::KeyUp,
        EventType::Submit,
        EventType::Focus,
    ];

    /// DOM event name
    pub fn name(self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::Change => "change",
            EventType::KeyDown => "keydown",
            EventType::KeyPress => "keypress",
            EventType::KeyUp => "keyup",
            EventType::Submit => "submit",
            EventType::Focus => "focus",
            EventType::DomContentLoaded => "DOMContentLoaded",
        }
    }

    /// Look up a bindable event by name
    pub fn from_name(name: &str) -> Option<EventType> {
        Self::BINDABLE.into_iter().find(|e| e.name() == name)
    }

    /// Check if this event type bubbles to ancestors
    pub fn bubbles(self) -> bool {
        !matches!(self, EventType::Focus)
    }

    /// Check if listeners may suppress the default action
    pub fn cancelable(self) -> bool {
        matches!(
            self,
            EventType::Click
                | EventType::KeyDown
                | EventType::KeyPress
                | EventType::KeyUp
                | EventType::Submit
        )
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Event object passed to listeners
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event was dispatched at
    pub target: NodeId,
    /// Node whose listener is running (the listener's `this`)
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event listener; receives the document so it can mutate the tree
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;
