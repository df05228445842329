//! Player profile lookup
//!
//! Thin client for the rating provider's player profile endpoint.

pub mod client;

pub use client::{PlayerProfileProvider, UtrClient};
