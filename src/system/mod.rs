pub mod collector;
pub mod platform;
pub mod process;
pub mod provider;
pub mod services;
pub mod sessions;
pub mod snapshot;

pub use collector::SysinfoProvider;
pub use provider::{MetricsProvider, ProviderError, ProviderResult};
