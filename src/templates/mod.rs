// src/templates/mod.rs
pub mod modal;

mod layout;

pub use layout::render_page;
pub use modal::{Modal, ModalItem, ModalItemKind};

// Helper function for HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
