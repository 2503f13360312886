//! Report assembly and output.

pub mod generator;

pub use generator::*;
