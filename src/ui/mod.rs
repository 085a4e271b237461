// src/ui/mod.rs
pub mod layout;
pub mod page;

pub use layout::{Control, LayoutController, PanelKind, PanelState, Width};
pub use page::Page;

// Panel state classes
pub const COLLAPSED_CLASS: &str = "is-collapsed";
pub const PINNED_CLASS: &str = "is-pinned";

// Controls
pub const MENU_TOGGLE_CLASS: &str = "js-menu-toggle";
pub const MENU_CLOSE_CLASS: &str = "js-menu-close";
pub const MENU_PIN_CLASS: &str = "js-menu-pin";
pub const ASIDE_OPEN_CLASS: &str = "js-aside-open";
pub const ASIDE_CLOSE_CLASS: &str = "js-aside-close";
pub const ASIDE_RESIZE_CLASS: &str = "js-aside-resize";
pub const ASIDE_PIN_CLASS: &str = "js-aside-pin";

pub const PIN_ICON_CLASS: &str = "p-icon--pin";
pub const CLOSE_ICON_CLASS: &str = "p-icon--close";

pub const FORM_GROUP_CLASS: &str = "p-form__group";
pub const REPOSITORY_SECTION_ID: &str = "repository-section";

pub const ARIA_CONTROLS: &str = "aria-controls";
pub const DATA_RESIZE_CLASS: &str = "data-resize-class";
pub const DATA_ID: &str = "data-id";

/// Handle to an element owned by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Class(&'a str),
    Id(&'a str),
}

impl std::fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Id(id) => write!(f, "#{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    Select,
}

impl FieldKind {
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::Select => "select",
        }
    }
}

/// Current state of one control in a form field group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub kind: FieldKind,
    pub value: String,
}

/// The part of a rendered page the console reads and mutates.
///
/// Element handles stay valid for the lifetime of the surface. Lookups that
/// find nothing return `None` or an empty list; callers treat absence as
/// expected.
pub trait UiSurface {
    /// First element matching `selector`, in document order.
    fn query(&self, selector: Selector<'_>) -> Option<ElementId>;

    /// Every element matching `selector`, in document order.
    fn query_all(&self, selector: Selector<'_>) -> Vec<ElementId>;

    /// First descendant of `parent` with the given tag name.
    fn descendant(&self, parent: ElementId, tag: &str) -> Option<ElementId>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&mut self, element: ElementId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn text(&self, element: ElementId) -> String;

    fn set_text(&mut self, element: ElementId, text: &str);

    /// Drops focus from whichever element currently holds it.
    fn blur_active(&mut self);

    /// Input and select controls inside the form field group, in document order.
    fn form_fields(&self) -> Vec<FormField>;
}
