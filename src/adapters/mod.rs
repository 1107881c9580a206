// Adapters layer: concrete implementations of the domain ports (HTTP, link opening).

pub mod http;
pub mod navigator;

pub use http::HttpTransport;
pub use navigator::{PrintNavigator, SystemNavigator};
