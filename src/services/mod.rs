pub mod transport;
pub mod session_store;
pub mod navigation;
pub mod export;
pub mod api_client;

#[cfg(test)]
pub mod testing;

pub use transport::{FetchTransport, Transport};
pub use navigation::{BrowserNavigator, Navigator};
pub use export::{trigger_download, ExportFile};
pub use api_client::ApiClient;
