#![doc(test(attr(deny(warnings))))]

//! Folio Admin provides the portfolio and signup form controllers of the
//! dashboard: field state, declarative validation, edit-mode prefill and
//! submission against the dashboard HTTP API.

pub mod api;
pub mod cli;
pub mod errors;
pub mod forms;
pub mod navigation;
pub mod notify;
pub mod utils;

pub use folio_config as config;
pub use folio_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Folio Admin tracing initialized.");
    });
}
