//! Core data types for DIRS
//!
//! Pillars, scores and the records kept in the local store.

pub mod pillar;
pub mod records;

pub use pillar::*;
pub use records::*;
