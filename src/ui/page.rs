// src/ui/page.rs
//! In-memory page model used wherever no browser is present.

use std::collections::{BTreeMap, BTreeSet};

use super::{
    ElementId, FieldKind, FormField, Selector, UiSurface, ARIA_CONTROLS, ASIDE_CLOSE_CLASS,
    ASIDE_OPEN_CLASS, ASIDE_PIN_CLASS, ASIDE_RESIZE_CLASS, DATA_RESIZE_CLASS, FORM_GROUP_CLASS,
    MENU_CLOSE_CLASS, MENU_PIN_CLASS, MENU_TOGGLE_CLASS, PIN_ICON_CLASS,
};
use crate::ui::layout::{PanelKind, Width};

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<ElementId>,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<Element>,
    active: Option<ElementId>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new element; it is attached when the builder is finished.
    pub fn element(&mut self, tag: &str) -> ElementBuilder<'_> {
        ElementBuilder {
            page: self,
            element: Element {
                tag: tag.to_ascii_lowercase(),
                id: None,
                classes: BTreeSet::new(),
                attributes: BTreeMap::new(),
                text: String::new(),
                value: String::new(),
                parent: None,
            },
        }
    }

    /// Standard console shell: both panels plus every layout control.
    ///
    /// The aside carries the id `aside-panel` and gets one resize button per
    /// width variant.
    pub fn application_layout() -> Self {
        let mut page = Page::new();

        page.element("nav").class(PanelKind::Navigation.class()).finish();
        page.element("aside")
            .id("aside-panel")
            .class(PanelKind::Aside.class())
            .class(super::COLLAPSED_CLASS)
            .finish();

        page.element("button").class(MENU_TOGGLE_CLASS).text("Menu").finish();
        page.element("button").class(MENU_CLOSE_CLASS).text("Close menu").finish();
        let menu_pin = page.element("button").class(MENU_PIN_CLASS).finish();
        page.element("i").class(PIN_ICON_CLASS).child_of(menu_pin).finish();

        page.element("button").class(ASIDE_OPEN_CLASS).text("Open").finish();
        page.element("button").class(ASIDE_CLOSE_CLASS).text("Close").finish();
        page.element("button").class(ASIDE_PIN_CLASS).text("Pin").finish();

        for width in Width::ALL {
            page.element("button")
                .class(ASIDE_RESIZE_CLASS)
                .attr(ARIA_CONTROLS, "aside-panel")
                .attr(DATA_RESIZE_CLASS, width.class())
                .finish();
        }

        page
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query(Selector::Id(id))
    }

    pub fn classes(&self, element: ElementId) -> Vec<&str> {
        self.get(element)
            .map(|e| e.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(e) = self.get_mut(element) {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn value(&self, element: ElementId) -> Option<&str> {
        self.get(element).map(|e| e.value.as_str())
    }

    pub fn set_value(&mut self, element: ElementId, value: &str) {
        if let Some(e) = self.get_mut(element) {
            e.value = value.to_string();
        }
    }

    /// Sets the value of the form control with the given id. Returns false if
    /// no such element exists.
    pub fn fill(&mut self, id: &str, value: &str) -> bool {
        match self.element_by_id(id) {
            Some(element) => {
                self.set_value(element, value);
                true
            }
            None => false,
        }
    }

    pub fn focus(&mut self, element: ElementId) {
        if self.get(element).is_some() {
            self.active = Some(element);
        }
    }

    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn get(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(element.0)
    }

    fn get_mut(&mut self, element: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(element.0)
    }

    fn matches(element: &Element, selector: Selector<'_>) -> bool {
        match selector {
            Selector::Class(class) => element.classes.contains(class),
            Selector::Id(id) => element.id.as_deref() == Some(id),
        }
    }

    fn is_descendant_of(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.get(element).and_then(|e| e.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.get(parent).and_then(|e| e.parent);
        }
        false
    }

    fn in_form_group(&self, element: ElementId) -> bool {
        let mut current = self.get(element).and_then(|e| e.parent);
        while let Some(parent) = current {
            match self.get(parent) {
                Some(e) if e.classes.contains(FORM_GROUP_CLASS) => return true,
                Some(e) => current = e.parent,
                None => return false,
            }
        }
        false
    }
}

impl UiSurface for Page {
    fn query(&self, selector: Selector<'_>) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| Self::matches(e, selector))
            .map(ElementId)
    }

    fn query_all(&self, selector: Selector<'_>) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| Self::matches(e, selector))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn descendant(&self, parent: ElementId, tag: &str) -> Option<ElementId> {
        (0..self.elements.len())
            .map(ElementId)
            .find(|&id| self.elements[id.0].tag == tag && self.is_descendant_of(id, parent))
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.get(element).is_some_and(|e| e.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(e) = self.get_mut(element) {
            e.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(e) = self.get_mut(element) {
            e.classes.remove(class);
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.get(element).and_then(|e| e.attributes.get(name).cloned())
    }

    fn text(&self, element: ElementId) -> String {
        self.get(element).map(|e| e.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(e) = self.get_mut(element) {
            e.text = text.to_string();
        }
    }

    fn blur_active(&mut self) {
        self.active = None;
    }

    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = Vec::new();

        for (index, element) in self.elements.iter().enumerate() {
            let kind = match element.tag.as_str() {
                "input" => FieldKind::Input,
                "select" => FieldKind::Select,
                _ => continue,
            };

            if !self.in_form_group(ElementId(index)) {
                continue;
            }

            // A control without an id reports the empty id, as the DOM does.
            fields.push(FormField {
                id: element.id.clone().unwrap_or_default(),
                kind,
                value: element.value.clone(),
            });
        }

        fields
    }
}

pub struct ElementBuilder<'a> {
    page: &'a mut Page,
    element: Element,
}

impl ElementBuilder<'_> {
    pub fn id(mut self, id: &str) -> Self {
        self.element.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.element.classes.insert(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.element.value = value.to_string();
        self
    }

    pub fn child_of(mut self, parent: ElementId) -> Self {
        self.element.parent = Some(parent);
        self
    }

    /// Attaches the element. A parent that is not already on this page is
    /// dropped, so every ancestor chain ends.
    pub fn finish(mut self) -> ElementId {
        let id = ElementId(self.page.elements.len());
        if let Some(parent) = self.element.parent {
            if parent.0 >= id.0 {
                tracing::debug!("Dropping unknown parent {:?} for <{}>", parent, self.element.tag);
                self.element.parent = None;
            }
        }
        self.page.elements.push(self.element);
        id
    }
}
