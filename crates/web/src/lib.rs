//! HTTP host for the workshop application: configuration, session resolution,
//! route guarding and the tenant-scoped data endpoints.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod session;

pub use config::AppConfig;
pub use session::{InMemorySessionProvider, ProviderError, SessionProvider};
