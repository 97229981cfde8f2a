//! GoFood menu dashboard.
//!
//! Manages a restaurant's food plates over the `/foods` REST resource: list,
//! create, edit, delete and toggle availability. The [`dashboard`] module
//! holds the controller that keeps the local list in step with the server.

pub mod alerts;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod server;

pub use alerts::{Alerts, ConfirmOutcome, Confirmation, Notice, NoticeLevel, TerminalAlerts};
pub use api::{ApiError, FoodsApi, HttpFoodsApi};
pub use config::{Config, ConfigError, ConfigSource, ConfigValue};
pub use dashboard::{Dashboard, DashboardError, DeleteOutcome, LoadState};
pub use models::{FoodPlate, FoodPlateInput, NewFoodPlate};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
