#![doc(test(attr(deny(warnings))))]

//! Lex Office keeps a small law practice's books: contracts and their
//! installment schedules, payments, operating expenses, client reliability
//! scoring, and the reports built from all of it.

pub mod core;
pub mod domain;
pub mod errors;
pub mod messaging;
pub mod reports;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Lex Office tracing initialized.");
    });
}
