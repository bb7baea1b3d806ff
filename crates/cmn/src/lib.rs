//! cmn
//!
//! Small helpers for device web pages: a DOM template renderer, visibility
//! and form helpers, and an API client whose requests go out one at a time.
//!
//! # Example
//! ```rust,ignore
//! use cmn::{el, render, serialize_form, Document};
//! use cmn::net::{ApiClient, ApiParams, HttpTransport, ApiConfig};
//!
//! let mut doc = Document::new("http://192.168.4.1/index.html");
//! let body = doc.body();
//! let form = render(&mut doc, &el("form").child(el("input").attr("name", "ssid")).into(), Some(body))?;
//!
//! let api = ApiClient::new(doc.url(), Rc::new(HttpTransport::new(&ApiConfig::default())?))?;
//! let result = api.call_api("wifi", ApiParams::post().form(serialize_form(&doc, form, None))).await;
//! ```

mod helpers;
mod template;

pub use helpers::{
    bind_click, get_checked_values, get_field_value, is_hidden, is_shown, on, ready, resolve, serialize_form,
    set_class, set_modal, set_visible, Checked, Target, HIDDEN, MODAL, MODAL_SHOWN,
};
pub use template::{create_tag, create_text, el, render, render_all, ElementTemplate, Template};

pub use cmn_dom::{Document, DomError, DomResult, Event, EventType, NodeId};

// Re-export sub-crates for advanced usage
pub use cmn_dom as dom;
pub use cmn_net as net;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
