//! Providers Module - External Data Sources
//!
//! Outbound HTTP integrations. Currently only the public username lookup.

pub mod roblox;

pub use roblox::*;
