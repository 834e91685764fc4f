//! Core math modules.

pub mod curve;
pub mod sample;
