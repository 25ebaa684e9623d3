//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **catalogue**: reqwest-backed reader for the product catalogue API
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no taxonomy logic.

pub mod catalogue;
