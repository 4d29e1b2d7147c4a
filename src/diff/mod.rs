//! Staleness check between a source file and its destination counterpart

mod compare;

pub use compare::compare_mtimes;
