//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants and shared copy used across the application.

pub mod constants;

pub use constants::*;
