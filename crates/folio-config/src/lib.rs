//! folio-config
//!
//! Dashboard connection settings and navigation routes.
//! Owns the DashboardConfig model plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{ApiSettings, DashboardConfig, RouteSettings};
