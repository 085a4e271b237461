// src/handlers/modal.rs
use tracing::debug;

use super::Console;
use crate::error::ConsoleError;
use crate::models::{ModalTrigger, Phase, RequestPayload, Settled};
use crate::services::{Navigator, Transport};
use crate::ui::UiSurface;

/// Collects the form field group into a request payload. Values are taken
/// verbatim; a later field with a repeated id replaces the earlier one.
pub fn build_request<S: UiSurface + ?Sized>(surface: &S) -> RequestPayload {
    surface
        .form_fields()
        .into_iter()
        .map(|field| (field.id, field.value))
        .collect()
}

impl<T: Transport, N: Navigator> Console<T, N> {
    /// Runs the submission behind a modal's submit button.
    pub async fn submit_modal<S: UiSurface + ?Sized>(
        &self,
        surface: &S,
        trigger: ModalTrigger,
    ) -> Result<Settled, ConsoleError> {
        debug!("{}: {:?}", trigger, Phase::Idle);
        match trigger {
            ModalTrigger::RepositoryCreate => self.create_repository(surface).await,
            ModalTrigger::RepositoryUpdate => self.update_repository(surface).await,
        }
    }

    /// String entry point for submit buttons; unknown names fail before any
    /// request is built.
    pub async fn submit_named<S: UiSurface + ?Sized>(
        &self,
        surface: &S,
        trigger: &str,
    ) -> Result<Settled, ConsoleError> {
        let trigger: ModalTrigger = trigger.parse()?;
        self.submit_modal(surface, trigger).await
    }
}
