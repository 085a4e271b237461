// src/services/mod.rs
pub mod navigation;
pub mod transport;

pub use navigation::{HeadlessNavigator, Navigation, Navigator};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
