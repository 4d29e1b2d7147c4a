//! Commands: a single pass and the forever loop around it

pub mod mirror;
pub mod sync;
