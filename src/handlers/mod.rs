// src/handlers/mod.rs
pub mod modal;
pub mod repository;

use crate::config::Config;
use crate::services::{Navigator, Transport};

pub use modal::build_request;

/// Submission context: where requests go and how the page moves afterwards.
pub struct Console<T, N> {
    config: Config,
    transport: T,
    navigator: N,
}

impl<T: Transport, N: Navigator> Console<T, N> {
    pub fn new(config: Config, transport: T, navigator: N) -> Self {
        Self {
            config,
            transport,
            navigator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
