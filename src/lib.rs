// src/lib.rs
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod templates;
pub mod ui;

pub use config::Config;
pub use error::{ConsoleError, SubmitError};
pub use handlers::Console;
pub use models::{Effect, ModalTrigger, Operation, Outcome, RequestPayload, Settled};
