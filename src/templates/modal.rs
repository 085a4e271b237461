// src/templates/modal.rs
use super::html_escape;
use crate::models::{
    ModalTrigger, GITIGNORE_OPTIONS, REPOSITORY_DESCRIPTION_FIELD, REPOSITORY_GITIGNORE_FIELD,
    REPOSITORY_NAME_FIELD,
};
use crate::ui::{ElementId, Page, FORM_GROUP_CLASS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalItemKind {
    Text,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalItem {
    pub id: String,
    pub label: String,
    pub kind: ModalItemKind,
    pub autocomplete: String,
    pub options: Vec<String>,
}

impl ModalItem {
    pub fn text(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: ModalItemKind::Text,
            autocomplete: "off".to_string(),
            options: Vec::new(),
        }
    }

    pub fn select(id: &str, label: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: ModalItemKind::Select,
            autocomplete: "off".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Value the control shows before the user touches it.
    pub fn initial_value(&self) -> &str {
        match self.kind {
            ModalItemKind::Text => "",
            ModalItemKind::Select => self.options.first().map(String::as_str).unwrap_or(""),
        }
    }

    fn render(&self) -> String {
        let control = match self.kind {
            ModalItemKind::Text => format!(
                r#"<input type="text" id="{id}" name="{id}" autocomplete="{autocomplete}">"#,
                id = html_escape(&self.id),
                autocomplete = html_escape(&self.autocomplete),
            ),
            ModalItemKind::Select => {
                let options: String = self
                    .options
                    .iter()
                    .map(|o| format!(r#"<option value="{0}">{0}</option>"#, html_escape(o)))
                    .collect();
                format!(
                    r#"<select id="{id}" name="{id}">{options}</select>"#,
                    id = html_escape(&self.id),
                    options = options,
                )
            }
        };

        format!(
            r#"<div class="row">
                    <label for="{id}">{label}</label>
                    {control}
                </div>"#,
            id = html_escape(&self.id),
            label = html_escape(&self.label),
            control = control,
        )
    }
}

/// Modal form whose submit button fires a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub items: Vec<ModalItem>,
    pub submit: String,
    pub submit_id: ModalTrigger,
}

impl Modal {
    pub fn repository_create() -> Self {
        Self {
            title: "Create repository".to_string(),
            items: vec![
                ModalItem::text(REPOSITORY_NAME_FIELD, "Repository name"),
                ModalItem::text(REPOSITORY_DESCRIPTION_FIELD, "Repository description"),
                ModalItem::select(REPOSITORY_GITIGNORE_FIELD, "Repository gitignore", &GITIGNORE_OPTIONS),
            ],
            submit: "Add repository".to_string(),
            submit_id: ModalTrigger::RepositoryCreate,
        }
    }

    pub fn repository_update() -> Self {
        Self {
            title: "Update repository".to_string(),
            items: vec![
                ModalItem::text(REPOSITORY_NAME_FIELD, "Repository name"),
                ModalItem::text(REPOSITORY_DESCRIPTION_FIELD, "Repository description"),
            ],
            submit: "Update repository".to_string(),
            submit_id: ModalTrigger::RepositoryUpdate,
        }
    }

    pub fn for_trigger(trigger: ModalTrigger) -> Self {
        match trigger {
            ModalTrigger::RepositoryCreate => Self::repository_create(),
            ModalTrigger::RepositoryUpdate => Self::repository_update(),
        }
    }

    pub fn render(&self) -> String {
        let items: String = self.items.iter().map(ModalItem::render).collect();

        format!(
            r#"<div class="p-modal" id="modal">
    <section class="p-modal__dialog" role="dialog" aria-labelledby="modal-title">
        <header class="p-modal__header">
            <h2 class="p-modal__title" id="modal-title">{title}</h2>
        </header>
        <form id="modal-form">
            <div class="{group}">
                {items}
            </div>
        </form>
        <footer class="p-modal__footer">
            <button class="p-button--positive" data-submit="{submit_id}">{submit}</button>
        </footer>
    </section>
</div>"#,
            title = html_escape(&self.title),
            group = FORM_GROUP_CLASS,
            items = items,
            submit_id = self.submit_id,
            submit = html_escape(&self.submit),
        )
    }

    /// Adds the modal's form to `page` under `parent` and returns the field group.
    pub fn mount(&self, page: &mut Page, parent: Option<ElementId>) -> ElementId {
        let mut form = page.element("form").id("modal-form");
        if let Some(parent) = parent {
            form = form.child_of(parent);
        }
        let form = form.finish();
        let group = page.element("div").class(FORM_GROUP_CLASS).child_of(form).finish();

        for item in &self.items {
            let row = page.element("div").class("row").child_of(group).finish();
            let tag = match item.kind {
                ModalItemKind::Text => "input",
                ModalItemKind::Select => "select",
            };
            page.element(tag)
                .id(&item.id)
                .attr("autocomplete", &item.autocomplete)
                .value(item.initial_value())
                .child_of(row)
                .finish();
        }

        group
    }
}
