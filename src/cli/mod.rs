//! Command handlers for the `solar-crypto` developer tool

pub mod commands;

pub use commands::*;
