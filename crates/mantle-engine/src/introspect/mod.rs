//! Introspection: classification and descriptor construction

pub mod builder;
pub mod classify;

pub use classify::{classify, Classification, MANAGEMENT_SUFFIX};
