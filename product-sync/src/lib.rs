//! Product catalogue sync for the sales system.
//!
//! Fetches one bounded page of products from the external catalogue and
//! remaps category and brand into the sales taxonomy, keyed by product id.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
