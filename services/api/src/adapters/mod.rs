pub mod store;
pub mod webhook;

pub use store::InMemoryResultStore;
pub use webhook::WebhookDispatcher;
