// src/ui/layout.rs
use tracing::debug;

use super::{
    ElementId, Selector, UiSurface, ARIA_CONTROLS, ASIDE_CLOSE_CLASS, ASIDE_OPEN_CLASS,
    ASIDE_PIN_CLASS, ASIDE_RESIZE_CLASS, CLOSE_ICON_CLASS, COLLAPSED_CLASS, DATA_RESIZE_CLASS,
    MENU_CLOSE_CLASS, MENU_PIN_CLASS, MENU_TOGGLE_CLASS, PINNED_CLASS, PIN_ICON_CLASS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Navigation,
    Aside,
}

impl PanelKind {
    pub fn class(&self) -> &'static str {
        match self {
            PanelKind::Navigation => "l-navigation",
            PanelKind::Aside => "l-aside",
        }
    }

    pub fn find<S: UiSurface + ?Sized>(&self, surface: &S) -> Option<ElementId> {
        surface.query(Selector::Class(self.class()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Narrow,
    Medium,
    Wide,
}

impl Width {
    pub const ALL: [Width; 3] = [Width::Narrow, Width::Medium, Width::Wide];

    pub fn class(&self) -> &'static str {
        match self {
            Width::Narrow => "is-narrow",
            Width::Medium => "is-medium",
            Width::Wide => "is-wide",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Width::Narrow => "Narrow",
            Width::Medium => "Medium",
            Width::Wide => "Wide",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.class() == class)
    }
}

/// Snapshot of a panel's state classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub collapsed: bool,
    pub pinned: bool,
    pub width: Option<Width>,
}

impl PanelState {
    pub fn read<S: UiSurface + ?Sized>(surface: &S, panel: ElementId) -> Self {
        Self {
            collapsed: surface.has_class(panel, COLLAPSED_CLASS),
            pinned: surface.has_class(panel, PINNED_CLASS),
            width: Width::ALL.into_iter().find(|w| surface.has_class(panel, w.class())),
        }
    }

    pub fn of<S: UiSurface + ?Sized>(surface: &S, kind: PanelKind) -> Option<Self> {
        kind.find(surface).map(|panel| Self::read(surface, panel))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    MenuToggle,
    MenuClose,
    MenuPin,
    AsideOpen,
    AsideClose,
    AsideResize,
    AsidePin,
}

impl Control {
    const SINGLE: [(Control, &'static str); 6] = [
        (Control::MenuToggle, MENU_TOGGLE_CLASS),
        (Control::MenuClose, MENU_CLOSE_CLASS),
        (Control::MenuPin, MENU_PIN_CLASS),
        (Control::AsideOpen, ASIDE_OPEN_CLASS),
        (Control::AsideClose, ASIDE_CLOSE_CLASS),
        (Control::AsidePin, ASIDE_PIN_CLASS),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    control: Control,
    element: ElementId,
}

/// Click handlers for the layout controls found on a page.
#[derive(Debug, Clone, Default)]
pub struct LayoutController {
    bindings: Vec<Binding>,
}

impl LayoutController {
    /// Binds every control present on `surface`. Missing controls are skipped.
    pub fn bind<S: UiSurface + ?Sized>(surface: &S) -> Self {
        let mut bindings = Vec::new();

        for (control, class) in Control::SINGLE {
            match surface.query(Selector::Class(class)) {
                Some(element) => bindings.push(Binding { control, element }),
                None => debug!("Layout control .{} not present", class),
            }
        }

        for element in surface.query_all(Selector::Class(ASIDE_RESIZE_CLASS)) {
            bindings.push(Binding {
                control: Control::AsideResize,
                element,
            });
        }

        debug!("Bound {} layout controls", bindings.len());
        Self { bindings }
    }

    pub fn control_for(&self, element: ElementId) -> Option<Control> {
        self.bindings
            .iter()
            .find(|b| b.element == element)
            .map(|b| b.control)
    }

    /// Elements bound to `control`, in document order.
    pub fn elements(&self, control: Control) -> Vec<ElementId> {
        self.bindings
            .iter()
            .filter(|b| b.control == control)
            .map(|b| b.element)
            .collect()
    }

    /// Runs the handler bound to `element`. Returns false when nothing is bound.
    pub fn click<S: UiSurface + ?Sized>(&self, surface: &mut S, element: ElementId) -> bool {
        let Some(control) = self.control_for(element) else {
            return false;
        };

        match control {
            Control::MenuToggle => {
                if let Some(nav) = PanelKind::Navigation.find(&*surface) {
                    surface.toggle_class(nav, COLLAPSED_CLASS);
                }
            }
            Control::MenuClose => {
                if let Some(nav) = PanelKind::Navigation.find(&*surface) {
                    surface.add_class(nav, COLLAPSED_CLASS);
                }
                surface.blur_active();
            }
            Control::AsideOpen => {
                if let Some(aside) = PanelKind::Aside.find(&*surface) {
                    surface.remove_class(aside, COLLAPSED_CLASS);
                }
            }
            Control::AsideClose => {
                if let Some(aside) = PanelKind::Aside.find(&*surface) {
                    surface.add_class(aside, COLLAPSED_CLASS);
                }
            }
            Control::AsideResize => resize(surface, element),
            Control::MenuPin => pin_menu(surface, element),
            Control::AsidePin => pin_aside(surface, element),
        }

        true
    }

    /// Clicks the first element bound to `control`.
    pub fn trigger<S: UiSurface + ?Sized>(&self, surface: &mut S, control: Control) -> bool {
        match self.elements(control).first() {
            Some(&element) => self.click(surface, element),
            None => false,
        }
    }
}

fn resize<S: UiSurface + ?Sized>(surface: &mut S, button: ElementId) {
    let Some(target) = surface.attribute(button, ARIA_CONTROLS) else {
        debug!("Resize button has no {} reference", ARIA_CONTROLS);
        return;
    };
    let Some(panel) = surface.query(Selector::Id(&target)) else {
        debug!("Resize target #{} not present", target);
        return;
    };

    for width in Width::ALL {
        surface.remove_class(panel, width.class());
    }

    if let Some(class) = surface.attribute(button, DATA_RESIZE_CLASS).filter(|c| !c.is_empty()) {
        match Width::from_class(&class) {
            Some(width) => surface.add_class(panel, width.class()),
            None => tracing::warn!("Ignoring unknown width variant {} for #{}", class, target),
        }
    }
}

fn pin_menu<S: UiSurface + ?Sized>(surface: &mut S, button: ElementId) {
    let pinned = match PanelKind::Navigation.find(&*surface) {
        Some(nav) => surface.toggle_class(nav, PINNED_CLASS),
        None => return,
    };

    if let Some(icon) = surface.descendant(button, "i") {
        let (add, remove) = if pinned {
            (CLOSE_ICON_CLASS, PIN_ICON_CLASS)
        } else {
            (PIN_ICON_CLASS, CLOSE_ICON_CLASS)
        };
        surface.add_class(icon, add);
        surface.remove_class(icon, remove);
    }

    surface.blur_active();
}

fn pin_aside<S: UiSurface + ?Sized>(surface: &mut S, button: ElementId) {
    let Some(aside) = PanelKind::Aside.find(&*surface) else {
        return;
    };
    let label = if surface.toggle_class(aside, PINNED_CLASS) {
        "Unpin"
    } else {
        "Pin"
    };
    surface.set_text(button, label);
}
