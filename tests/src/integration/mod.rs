//! Cross-crate canvas scenarios.

pub mod concurrency;
pub mod flows;
pub mod properties;
