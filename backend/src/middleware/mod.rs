//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns; currently trace identifier
//! propagation.

pub mod trace;

pub use trace::Trace;
