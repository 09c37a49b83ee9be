//! Tower middleware for the API.

pub mod metrics;
