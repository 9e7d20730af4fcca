//! Tracing initialization for binaries and tests embedding the recommender.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with_filter};
