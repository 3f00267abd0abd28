#![doc(test(attr(deny(warnings))))]

//! Cashflow Core projects budget entries into dated occurrences, buckets them
//! into calendar periods, overlays what-if scenarios, and walks a running
//! balance that blends recorded payments with forecast amounts.

pub mod calendar;
pub mod clock;
pub mod errors;
pub mod generator;
pub mod model;
pub mod projection;
pub mod scenario;
pub mod utils;
pub mod vat;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
