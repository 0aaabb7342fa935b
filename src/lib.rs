#![doc(test(attr(deny(warnings))))]

//! Resep Core holds the prescription entry workflow: per-session form state,
//! field validation, duplicate detection, sequential identifier assignment,
//! and persistence into a shared row store, plus the interactive CLI that
//! fronts it.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Resep Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
