//! Inbound adapters translating external requests into domain service calls.
//!
//! Framework details stay here, at the edge.

pub mod http;
