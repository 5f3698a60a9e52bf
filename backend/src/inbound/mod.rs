//! Inbound adapters translating external requests into driving port calls.
//!
//! The only transport is HTTP, under [`http`].

pub mod http;
