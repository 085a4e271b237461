// src/services/navigation.rs
use std::sync::Mutex;

pub trait Navigator: Send + Sync {
    fn reload(&self);

    fn navigate(&self, location: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Reload,
    Assign(String),
}

/// Navigator for contexts without a browser: records every transition.
#[derive(Debug, Default)]
pub struct HeadlessNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl HeadlessNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history().pop()
    }

    fn record(&self, navigation: Navigation) {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(navigation);
    }
}

impl Navigator for HeadlessNavigator {
    fn reload(&self) {
        tracing::info!("Reloading page");
        self.record(Navigation::Reload);
    }

    fn navigate(&self, location: &str) {
        tracing::info!("Navigating to {}", location);
        self.record(Navigation::Assign(location.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let navigator = HeadlessNavigator::new();
        assert_eq!(navigator.last(), None);

        navigator.reload();
        navigator.navigate("/repositories");

        assert_eq!(
            navigator.history(),
            vec![Navigation::Reload, Navigation::Assign("/repositories".to_string())]
        );
        assert_eq!(navigator.last(), Some(Navigation::Assign("/repositories".to_string())));
    }
}
