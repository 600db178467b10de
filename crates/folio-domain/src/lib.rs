//! folio-domain
//!
//! Records exchanged with the dashboard API (categories, portfolio items,
//! signup payloads) and the locally chosen image upload.
//! No I/O, no HTTP. Only data types and serde mappings.

pub mod category;
pub mod common;
pub mod portfolio;
pub mod signup;
pub mod upload;

pub use category::*;
pub use common::*;
pub use portfolio::*;
pub use signup::*;
pub use upload::*;
