//! Console rendering

pub mod console;
