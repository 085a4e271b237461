// src/templates/layout.rs
use super::html_escape;
use crate::ui::{
    Width, ARIA_CONTROLS, ASIDE_CLOSE_CLASS, ASIDE_OPEN_CLASS, ASIDE_PIN_CLASS, ASIDE_RESIZE_CLASS,
    COLLAPSED_CLASS, DATA_RESIZE_CLASS, MENU_CLOSE_CLASS, MENU_PIN_CLASS, MENU_TOGGLE_CLASS,
    PIN_ICON_CLASS,
};
use crate::ui::PanelKind;

const ASIDE_ID: &str = "aside-panel";

/// Console shell with the navigation menu, aside panel and their controls.
/// `aside` is placed in the collapsed aside panel.
pub fn render_page(title: &str, content: &str, aside: &str) -> String {
    let resize_buttons: String = Width::ALL
        .iter()
        .map(|width| {
            format!(
                r#"<button class="p-button--base {resize}" {controls}="{aside_id}" {data}="{class}">{label}</button>"#,
                resize = ASIDE_RESIZE_CLASS,
                controls = ARIA_CONTROLS,
                aside_id = ASIDE_ID,
                data = DATA_RESIZE_CLASS,
                class = width.class(),
                label = width.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - Ophelia CI</title>
</head>
<body>
    <div class="l-application" role="presentation">
        <header class="l-navigation-bar">
            <button class="p-panel__toggle {menu_toggle}">Menu</button>
        </header>
        <nav class="{navigation}" aria-label="Main">
            <div class="l-navigation__drawer">
                <button class="p-button--base has-icon {menu_pin}"><i class="{pin_icon}">Pin menu</i></button>
                <button class="p-button--base {menu_close}">Close menu</button>
                <a class="p-side-navigation__link" href="/repositories/">Repositories</a>
            </div>
        </nav>
        <main class="l-main">
            <button class="p-button {aside_open}">Open panel</button>
            {content}
        </main>
        <aside class="{aside_panel} {collapsed}" id="{aside_id}">
            <div class="p-panel__controls">
                {resize_buttons}
                <button class="p-button--base {aside_pin}">Pin</button>
                <button class="p-button--base {aside_close}">Close</button>
            </div>
            {aside}
        </aside>
    </div>
</body>
</html>"#,
        title = html_escape(title),
        menu_toggle = MENU_TOGGLE_CLASS,
        navigation = PanelKind::Navigation.class(),
        menu_pin = MENU_PIN_CLASS,
        pin_icon = PIN_ICON_CLASS,
        menu_close = MENU_CLOSE_CLASS,
        aside_open = ASIDE_OPEN_CLASS,
        content = content,
        aside_panel = PanelKind::Aside.class(),
        collapsed = COLLAPSED_CLASS,
        aside_id = ASIDE_ID,
        resize_buttons = resize_buttons,
        aside_pin = ASIDE_PIN_CLASS,
        aside_close = ASIDE_CLOSE_CLASS,
        aside = aside,
    )
}
