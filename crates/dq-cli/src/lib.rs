//! CLI library components for the customer data-quality checker.

pub mod logging;
pub mod paths;
