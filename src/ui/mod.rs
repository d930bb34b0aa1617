//! UI Module - terminal presentation

pub mod console;

pub use console::*;
