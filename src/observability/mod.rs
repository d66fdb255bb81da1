//! Observability: structured logging lives in main (tracing-subscriber);
//! metrics collection and exposition live here.

pub mod metrics;
