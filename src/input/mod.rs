//! Raw log input.
//!
//! Lines come from standard input or from files read back to back,
//! in their original order.

pub mod reader;

pub use reader::{InputSource, LineSource};
